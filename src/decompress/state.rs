//! Decompression state management
//!
//! This module holds the transient state of a single Yaz0 decode: the
//! payload cursor, the exclusively owned output buffer, and the control
//! window tracking which bits of the current control byte remain.

use crate::common::{CompressionStats, Yaz0Header, HEADER_SIZE, MAX_MATCH_LENGTH};
use crate::{Result, Yaz0Error};

/// Current control byte and the bit still to be consumed from it
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlWindow {
    /// Single-bit mask over `header`; zero forces a fetch
    pub mask: u16,
    /// Most recently fetched control byte
    pub header: u8,
}

/// Decompression state for one stream
#[derive(Debug)]
pub struct DecodeState<'a> {
    /// Compressed bytes following the header
    pub payload: &'a [u8],
    /// Next unread payload byte
    pub input_offset: usize,
    /// Output buffer, sized to the declared length up front
    pub output: Vec<u8>,
    /// Next output byte to write
    pub output_offset: usize,
    /// Control-bit window
    pub window: ControlWindow,
    /// Literal/back-reference counters
    pub stats: CompressionStats,
}

impl<'a> DecodeState<'a> {
    /// Prepare a decode of `data`, whose header has already been parsed
    pub fn new(data: &'a [u8], header: &Yaz0Header) -> Result<Self> {
        let payload = data.get(HEADER_SIZE..).unwrap_or_default();
        let decoded_length = header.decoded_length as usize;

        // Each step consumes at least one payload byte and yields at most
        // MAX_MATCH_LENGTH bytes.
        if decoded_length > payload.len().saturating_mul(MAX_MATCH_LENGTH) {
            return Err(Yaz0Error::MalformedStream {
                offset: 4,
                reason: "declared length exceeds what the payload can encode",
            });
        }

        Ok(Self {
            payload,
            input_offset: 0,
            output: vec![0; decoded_length],
            output_offset: 0,
            window: ControlWindow::default(),
            stats: CompressionStats::default(),
        })
    }

    /// Absolute stream offset of the payload cursor, for error reporting
    pub fn stream_offset(&self) -> usize {
        HEADER_SIZE + self.input_offset
    }

    /// Whether every declared output byte has been produced
    pub fn is_complete(&self) -> bool {
        self.output_offset >= self.output.len()
    }

    /// Hand back the output buffer and counters
    pub fn finish(mut self) -> (Vec<u8>, CompressionStats) {
        let compressed = HEADER_SIZE + self.payload.len();
        self.stats.finalize(compressed, self.output.len());
        (self.output, self.stats)
    }
}
