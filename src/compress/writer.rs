//! Yaz0Writer - buffering compression writer
//!
//! The Yaz0 header carries the decompressed size, so input is collected until
//! `finish`, then encoded as groups of one control byte followed by up to
//! eight literals or back-references.

use super::{pattern::MatchResult, state::CompressState};
use crate::common::{CompressionLevel, CompressionStats, Yaz0Header, HEADER_SIZE, LONG_MATCH_BIAS};
use crate::{Result, Yaz0Error};
use std::io::Write;

/// Compression writer implementing the Write trait
#[derive(Debug)]
pub struct Yaz0Writer<W: Write> {
    writer: W,
    level: CompressionLevel,
    input_buffer: Vec<u8>,
}

impl<W: Write> Yaz0Writer<W> {
    /// Create a new Yaz0Writer
    pub fn new(writer: W, level: CompressionLevel) -> Self {
        Self {
            writer,
            level,
            input_buffer: Vec::new(),
        }
    }

    /// Number of uncompressed bytes buffered so far
    pub fn buffered_len(&self) -> usize {
        self.input_buffer.len()
    }

    /// Compress everything written and return the inner writer
    pub fn finish(self) -> Result<W> {
        self.finish_with_stats().map(|(writer, _)| writer)
    }

    /// Compress everything written, returning the inner writer and statistics
    pub fn finish_with_stats(mut self) -> Result<(W, CompressionStats)> {
        let (compressed, stats) = encode(&self.input_buffer, self.level)?;
        self.writer.write_all(&compressed)?;
        self.writer.flush()?;
        Ok((self.writer, stats))
    }
}

impl<W: Write> Write for Yaz0Writer<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.input_buffer.len() + buf.len() > u32::MAX as usize {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Yaz0 input cannot exceed 4 GiB",
            ));
        }
        self.input_buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        // Nothing reaches the inner writer before finish()
        Ok(())
    }
}

/// Encode `input` as a complete Yaz0 stream
pub(crate) fn encode(input: &[u8], level: CompressionLevel) -> Result<(Vec<u8>, CompressionStats)> {
    let decoded_length = u32::try_from(input.len()).map_err(|_| {
        Yaz0Error::InvalidArgument(format!(
            "input of {} bytes does not fit the 32-bit length field",
            input.len()
        ))
    })?;

    let mut state = CompressState::new(input, level);
    let mut output = Vec::with_capacity(HEADER_SIZE + input.len() + input.len() / 8 + 1);
    output.extend_from_slice(&Yaz0Header::new(decoded_length).to_bytes());

    let mut pos = 0;
    while pos < input.len() {
        let control_index = output.len();
        output.push(0);

        for bit in 0..8 {
            if pos >= input.len() {
                break;
            }

            let found = state.next_match(pos);
            if found.is_match() {
                write_back_reference(&mut output, found);
                state.stats.match_count += 1;
                state.stats.longest_match = state.stats.longest_match.max(found.length);
                pos += found.length;
            } else {
                output[control_index] |= 0x80 >> bit;
                output.push(input[pos]);
                state.stats.literal_count += 1;
                pos += 1;
            }
        }
    }

    let mut stats = state.stats;
    stats.finalize(output.len(), input.len());
    log::trace!(
        "compressed {} bytes into {} ({} literals, {} back-references)",
        input.len(),
        output.len(),
        stats.literal_count,
        stats.match_count
    );
    Ok((output, stats))
}

/// Append the two- or three-byte form of a back-reference
fn write_back_reference(output: &mut Vec<u8>, found: MatchResult) {
    let dist = found.distance - 1;
    let dist_high = (dist >> 8) as u8;
    let dist_low = (dist & 0xFF) as u8;

    if found.length >= LONG_MATCH_BIAS {
        output.push(dist_high);
        output.push(dist_low);
        output.push((found.length - LONG_MATCH_BIAS) as u8);
    } else {
        output.push((((found.length - 2) as u8) << 4) | dist_high);
        output.push(dist_low);
    }
}
