//! Yaz0 compression
//!
//! A conformant encoder producing streams any Yaz0 decoder accepts. It
//! searches 3-byte hash chains over the 4 KiB window, with effort set by
//! [`CompressionLevel`].

mod hash;
mod pattern;
mod state;
mod writer;

pub use pattern::MatchResult;
pub use state::CompressState;
pub use writer::Yaz0Writer;

use crate::common::{CompressionLevel, CompressionStats};
use crate::Result;

/// Convenience function to compress data in memory
pub fn compress_bytes(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    writer::encode(data, level).map(|(output, _)| output)
}

/// Compress data in memory and report what the encoder emitted
pub fn compress_with_stats(
    data: &[u8],
    level: CompressionLevel,
) -> Result<(Vec<u8>, CompressionStats)> {
    writer::encode(data, level)
}
