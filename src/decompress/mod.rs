//! Yaz0 decompression
//!
//! Decoding runs in two phases: the fixed 16-byte header is parsed (magic,
//! big-endian decoded length, eight reserved bytes), then the payload is
//! expanded into a buffer of exactly the declared length.

mod decoder;
mod reader;
mod state;

pub use reader::Yaz0Reader;
pub use state::{ControlWindow, DecodeState};

use crate::common::{CompressionStats, Yaz0Header, YAZ0_MAGIC};
use crate::{Result, Yaz0Error};
use std::io::{Read, Seek, SeekFrom};

/// Decompress a complete Yaz0 stream held in memory
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_stats(data).map(|(output, _)| output)
}

/// Decompress a complete Yaz0 stream and report what the payload contained
pub fn decompress_with_stats(data: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let header = Yaz0Header::parse(data)?;
    log::trace!(
        "Yaz0 header: {} bytes decoded from {} byte payload",
        header.decoded_length,
        data.len().saturating_sub(crate::HEADER_SIZE)
    );

    let mut state = DecodeState::new(data, &header)?;
    state.expand()?;
    Ok(state.finish())
}

/// Decompress if `data` is a Yaz0 stream
///
/// Foreign data yields `Ok(None)`; every other failure is still an error.
pub fn probe_bytes(data: &[u8]) -> Result<Option<Vec<u8>>> {
    match decompress_bytes(data) {
        Ok(output) => Ok(Some(output)),
        Err(Yaz0Error::NotThisFormat) => {
            log::debug!("input is not a Yaz0 stream, skipping");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Check the magic without decoding anything
pub fn is_yaz0(data: &[u8]) -> bool {
    data.starts_with(&YAZ0_MAGIC)
}

/// Decompress from a readable, seekable source of known size
///
/// The whole source is read from offset 0 regardless of its current position.
pub fn decompress_source<R: Read + Seek>(source: Option<R>) -> Result<Vec<u8>> {
    let mut source = source.ok_or_else(|| {
        Yaz0Error::InvalidArgument("no source passed to decompress_source".to_string())
    })?;

    let data = read_source(&mut source)?;
    decompress_bytes(&data)
}

/// Read a seekable source in full, sizing the buffer from its end offset
pub(crate) fn read_source<R: Read + Seek>(source: &mut R) -> Result<Vec<u8>> {
    let size = source.seek(SeekFrom::End(0))?;
    source.seek(SeekFrom::Start(0))?;

    let mut data = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    source.read_to_end(&mut data)?;
    Ok(data)
}
