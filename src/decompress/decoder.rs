//! Control-bit decoding and the LZ77 expansion loop
//!
//! This module implements the core of Yaz0 decompression. Every payload read
//! and every index derived from stream data is checked before use, so a
//! corrupted or truncated stream ends in `MalformedStream` rather than an
//! out-of-bounds access.

use super::state::DecodeState;
use crate::common::LONG_MATCH_BIAS;
use crate::{Result, Yaz0Error};

impl DecodeState<'_> {
    /// Take the next payload byte
    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self
            .payload
            .get(self.input_offset)
            .ok_or(Yaz0Error::MalformedStream {
                offset: self.stream_offset(),
                reason: "payload exhausted before output was complete",
            })?;
        self.input_offset += 1;
        Ok(byte)
    }

    /// Consume one control bit, fetching a new control byte every eight bits
    ///
    /// Returns `true` for a literal and `false` for a back-reference.
    pub fn next_control_bit(&mut self) -> Result<bool> {
        self.window.mask >>= 1;
        if self.window.mask == 0 {
            self.window.header = self.read_byte()?;
            self.window.mask = 0x80;
        }
        Ok(u16::from(self.window.header) & self.window.mask != 0)
    }

    /// Copy one payload byte to the output
    ///
    /// Returns `false` without consuming input when the output is already full.
    pub fn copy_literal(&mut self) -> Result<bool> {
        if self.output_offset >= self.output.len() {
            return Ok(false);
        }

        let byte = self.read_byte()?;
        self.output[self.output_offset] = byte;
        self.output_offset += 1;
        self.stats.literal_count += 1;
        Ok(true)
    }

    /// Decode a back-reference and copy it from earlier output
    ///
    /// A reference reaching past the declared length is cut at the end of the
    /// buffer. Returns the number of bytes written.
    pub fn copy_back_reference(&mut self) -> Result<usize> {
        let start = self.stream_offset();
        let byte1 = self.read_byte()?;
        let byte2 = self.read_byte()?;

        let dist = (usize::from(byte1 & 0x0F) << 8) | usize::from(byte2);
        let length = match byte1 >> 4 {
            0 => usize::from(self.read_byte()?) + LONG_MATCH_BIAS,
            nibble => usize::from(nibble) + 2,
        };

        let position =
            self.output_offset
                .checked_sub(dist + 1)
                .ok_or(Yaz0Error::MalformedStream {
                    offset: start,
                    reason: "back-reference points before start of output",
                })?;

        let length = length.min(self.output.len().saturating_sub(self.output_offset));
        if length == 0 {
            return Ok(0);
        }
        let gap = self.output_offset - position;

        // Bytes up to the write cursor already exist and can move in bulk;
        // anything past that depends on bytes written by this same copy.
        let bulk = length.min(gap);
        self.output
            .copy_within(position..position + bulk, self.output_offset);
        for k in bulk..length {
            self.output[self.output_offset + k] = self.output[position + k];
        }

        self.output_offset += length;
        self.stats.match_count += 1;
        self.stats.longest_match = self.stats.longest_match.max(length);
        Ok(length)
    }

    /// Run the expansion loop until the declared length is produced
    pub fn expand(&mut self) -> Result<()> {
        while !self.is_complete() {
            if self.next_control_bit()? {
                if !self.copy_literal()? {
                    break;
                }
            } else {
                self.copy_back_reference()?;
            }
        }

        log::trace!(
            "expanded {} payload bytes into {} ({} literals, {} back-references)",
            self.input_offset,
            self.output_offset,
            self.stats.literal_count,
            self.stats.match_count
        );
        Ok(())
    }
}
