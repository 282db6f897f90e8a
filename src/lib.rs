//! yaz0 - Rust implementation of the Nintendo Yaz0 compression format
//!
//! Yaz0 is a byte-oriented LZ77 variant used for `.szs` files in Nintendo
//! content packages, including the firmware avatar archive whose entries
//! decode to raw 256×256 RGBA images. A 16-byte header (magic `Yaz0`,
//! big-endian decompressed size, eight reserved bytes) is followed by groups
//! of one control byte and up to eight literals or back-references.
//!
//! Decoding is hardened for untrusted input: every payload read and every
//! back-reference index is checked, and corruption is reported as
//! [`Yaz0Error::MalformedStream`] instead of reading or writing out of bounds.
//!
//! # Features
//!
//! - Decompression with self-overlapping back-references
//! - Format probing: foreign data is [`Yaz0Error::NotThisFormat`], or `None`
//!   through [`probe_bytes`]
//! - Hash-chain compression with three effort levels
//! - `Read`/`Write` adapters
//! - Avatar archive scanning
//! - Async and batch processing behind the `async` feature
//!
//! # Example - Decompression
//!
//! ```no_run
//! use yaz0::{decompress_bytes, Yaz0Reader};
//! use std::io::Read;
//!
//! let compressed = std::fs::read("chara_00.szs")?;
//! let pixels = decompress_bytes(&compressed)?;
//!
//! // Or through the reader adapter
//! let mut reader = Yaz0Reader::new(std::io::Cursor::new(compressed))?;
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Compression
//!
//! ```
//! use yaz0::{compress_bytes, decompress_bytes, CompressionLevel};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress_bytes(data, CompressionLevel::Default)?;
//! assert_eq!(decompress_bytes(&compressed)?, data);
//! # Ok::<(), yaz0::Yaz0Error>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod archive;
pub mod common;
pub mod compress;
pub mod decompress;
pub mod error;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use archive::{scan_avatar_entries, AvatarImage, AvatarScan};
pub use common::{
    CompressionLevel, CompressionStats, Result, Yaz0Error, Yaz0Header, HEADER_SIZE,
    MAX_DISTANCE, MAX_MATCH_LENGTH, YAZ0_MAGIC,
};
pub use compress::{compress_with_stats, Yaz0Writer};
pub use decompress::{decompress_source, decompress_with_stats, is_yaz0, probe_bytes, Yaz0Reader};

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;

// Convenience functions

/// Compress data into a Yaz0 stream
///
/// # Arguments
/// * `data` - The data to compress (at most `u32::MAX` bytes)
/// * `level` - Encoder effort
///
/// # Returns
/// A vector containing the header and compressed payload
pub fn compress_bytes(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    compress::compress_bytes(data, level)
}

/// Decompress a Yaz0 stream
///
/// # Arguments
/// * `data` - The complete compressed stream, header included
///
/// # Returns
/// Exactly as many bytes as the header declares
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decompress::decompress_bytes(data)
}
