//! Yaz0Reader - decompressing reader over a seekable source
//!
//! Yaz0 declares its output size up front and back-references may reach
//! anywhere in the previous 4 KiB, so the reader decodes the whole stream on
//! first use and then serves the buffer through `Read`.

use super::{decompress_bytes, read_source};
use crate::common::{Yaz0Header, HEADER_SIZE};
use crate::Result;
use std::io::{Read, Seek, SeekFrom};

/// Decompressing reader implementing the Read trait
#[derive(Debug)]
pub struct Yaz0Reader<R: Read + Seek> {
    reader: R,
    header: Yaz0Header,
    output_buffer: Option<Vec<u8>>,
    output_pos: usize,
}

impl<R: Read + Seek> Yaz0Reader<R> {
    /// Create a new Yaz0Reader, validating the header immediately
    pub fn new(mut reader: R) -> Result<Self> {
        let mut header_buf = [0u8; HEADER_SIZE];
        reader.seek(SeekFrom::Start(0))?;
        let filled = read_up_to(&mut reader, &mut header_buf)?;
        let header = Yaz0Header::parse(&header_buf[..filled])?;

        Ok(Self {
            reader,
            header,
            output_buffer: None,
            output_pos: 0,
        })
    }

    /// Parsed stream header
    pub fn header(&self) -> &Yaz0Header {
        &self.header
    }

    /// Declared decompressed size
    pub fn decoded_length(&self) -> usize {
        self.header.decoded_length as usize
    }

    /// Recover the underlying source
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn decode(&mut self) -> Result<()> {
        if self.output_buffer.is_some() {
            return Ok(());
        }

        let data = read_source(&mut self.reader)?;
        self.output_buffer = Some(decompress_bytes(&data)?);
        Ok(())
    }
}

impl<R: Read + Seek> Read for Yaz0Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.decode()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let output = self.output_buffer.as_deref().unwrap_or_default();
        let available = output.len() - self.output_pos;
        let to_copy = buf.len().min(available);
        buf[..to_copy].copy_from_slice(&output[self.output_pos..self.output_pos + to_copy]);
        self.output_pos += to_copy;
        Ok(to_copy)
    }
}

/// Fill as much of `buf` as the source allows, stopping at end of input
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
