//! Common types and constants for the Yaz0 compression format
//!
//! This module defines the core types, constants, and structures used by both
//! the compression and decompression halves of the crate.

use thiserror::Error;

/// Magic bytes at the start of every Yaz0 stream
pub const YAZ0_MAGIC: [u8; 4] = *b"Yaz0";

/// Size of the fixed stream header (magic, length, reserved)
pub const HEADER_SIZE: usize = 0x10;

/// Furthest back a back-reference can reach (12-bit distance field, plus one)
pub const MAX_DISTANCE: usize = 0x1000;

/// Shortest match the encoder will emit as a back-reference
pub const MIN_MATCH_LENGTH: usize = 3;

/// Longest back-reference the format can express (0xFF + 0x12)
pub const MAX_MATCH_LENGTH: usize = 0x111;

/// Length bias for the three-byte back-reference form
pub const LONG_MATCH_BIAS: usize = 0x12;

/// Encoder effort setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Short hash-chain walks, greedy parsing
    Fast = 0,
    /// Balanced search depth, greedy parsing
    #[default]
    Default = 1,
    /// Full window search with one-step lazy matching
    Best = 2,
}

impl CompressionLevel {
    /// Create a CompressionLevel from a raw value
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CompressionLevel::Fast),
            1 => Ok(CompressionLevel::Default),
            2 => Ok(CompressionLevel::Best),
            _ => Err(Yaz0Error::InvalidArgument(format!(
                "compression level {value} (expected 0, 1, or 2)"
            ))),
        }
    }

    /// Maximum number of hash-chain candidates examined per position
    pub fn search_depth(&self) -> usize {
        match self {
            CompressionLevel::Fast => 16,
            CompressionLevel::Default => 256,
            CompressionLevel::Best => 4096,
        }
    }

    /// Whether the encoder defers a match by one byte when the next one is longer
    pub fn lazy_matching(&self) -> bool {
        matches!(self, CompressionLevel::Best)
    }
}

/// Error type for Yaz0 operations
#[derive(Debug, Error)]
pub enum Yaz0Error {
    /// Caller misuse, such as an absent source handle
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The stream does not start with the Yaz0 magic
    ///
    /// This is the expected outcome when probing entries of mixed formats and
    /// is not a corruption signal.
    #[error("Not a Yaz0 stream")]
    NotThisFormat,

    /// The input is shorter than the fixed header
    #[error("Truncated input: {len} bytes (header needs {HEADER_SIZE})")]
    Truncated {
        /// Total input length
        len: usize,
    },

    /// Control or back-reference data is inconsistent with the declared size
    #[error("Malformed stream at offset {offset:#x}: {reason}")]
    MalformedStream {
        /// Absolute offset into the compressed stream where decoding failed
        offset: usize,
        /// What went wrong
        reason: &'static str,
    },

    /// A decoded image is not the size its consumer requires
    #[error("Invalid image size: expected {expected} bytes, got {actual}")]
    InvalidImageSize {
        /// Required size in bytes
        expected: usize,
        /// Decoded size in bytes
        actual: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Yaz0Error {
    /// Whether this is the format-probe miss rather than a real failure
    pub fn is_not_this_format(&self) -> bool {
        matches!(self, Yaz0Error::NotThisFormat)
    }
}

/// Result type alias for Yaz0 operations
pub type Result<T> = std::result::Result<T, Yaz0Error>;

/// Parsed Yaz0 stream header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yaz0Header {
    /// Size of the decompressed data in bytes
    pub decoded_length: u32,
    /// Bytes 8..16, not interpreted by the decoder
    pub reserved: [u8; 8],
}

impl Yaz0Header {
    /// Create a header for `decoded_length` bytes with zeroed reserved bytes
    pub fn new(decoded_length: u32) -> Self {
        Self {
            decoded_length,
            reserved: [0; 8],
        }
    }

    /// Parse the header at the start of `data`
    ///
    /// A wrong magic wins over a short buffer as long as the magic itself is
    /// readable, so probing callers see `NotThisFormat` for foreign data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let magic = data
            .get(..4)
            .ok_or(Yaz0Error::Truncated { len: data.len() })?;
        if magic != YAZ0_MAGIC {
            return Err(Yaz0Error::NotThisFormat);
        }

        let header = data
            .get(..HEADER_SIZE)
            .ok_or(Yaz0Error::Truncated { len: data.len() })?;

        let decoded_length = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&header[8..HEADER_SIZE]);

        Ok(Self {
            decoded_length,
            reserved,
        })
    }

    /// Serialize the header
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..4].copy_from_slice(&YAZ0_MAGIC);
        out[4..8].copy_from_slice(&self.decoded_length.to_be_bytes());
        out[8..].copy_from_slice(&self.reserved);
        out
    }

    /// Data alignment hint stored by newer producers in the first reserved word
    pub fn alignment(&self) -> u32 {
        u32::from_be_bytes([
            self.reserved[0],
            self.reserved[1],
            self.reserved[2],
            self.reserved[3],
        ])
    }
}

/// Statistics for compression/decompression operations
#[derive(Debug, Default, Clone)]
pub struct CompressionStats {
    /// Number of literal bytes encoded/decoded
    pub literal_count: usize,
    /// Number of back-references encoded/decoded
    pub match_count: usize,
    /// Total uncompressed bytes processed
    pub bytes_processed: usize,
    /// Longest back-reference seen
    pub longest_match: usize,
    /// Compressed stream size including the header
    pub input_bytes: u64,
    /// Decompressed size
    pub output_bytes: u64,
    /// Compressed size as a fraction of the decompressed size
    pub compression_ratio: f64,
}

impl CompressionStats {
    /// Fill in the byte totals and ratio from the compressed and decompressed sizes
    pub fn finalize(&mut self, compressed: usize, decompressed: usize) {
        self.input_bytes = compressed as u64;
        self.output_bytes = decompressed as u64;
        self.bytes_processed = decompressed;
        self.compression_ratio = if decompressed == 0 {
            0.0
        } else {
            compressed as f64 / decompressed as f64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_level() {
        assert_eq!(CompressionLevel::from_u8(0).unwrap(), CompressionLevel::Fast);
        assert_eq!(
            CompressionLevel::from_u8(1).unwrap(),
            CompressionLevel::Default
        );
        assert_eq!(CompressionLevel::from_u8(2).unwrap(), CompressionLevel::Best);
        assert!(matches!(
            CompressionLevel::from_u8(3),
            Err(Yaz0Error::InvalidArgument(_))
        ));

        assert!(CompressionLevel::Fast.search_depth() < CompressionLevel::Best.search_depth());
        assert!(CompressionLevel::Best.lazy_matching());
        assert!(!CompressionLevel::Default.lazy_matching());
        assert_eq!(CompressionLevel::default(), CompressionLevel::Default);
    }

    #[test]
    fn test_header_parse() {
        let data = hex_header("59617a30000100000000200000000000");
        let header = Yaz0Header::parse(&data).unwrap();
        assert_eq!(header.decoded_length, 0x0001_0000);
        assert_eq!(header.alignment(), 0x2000);
        assert_eq!(header.to_bytes().as_slice(), data.as_slice());
    }

    #[test]
    fn test_header_magic_before_length() {
        // Foreign magic is reported even when the header is incomplete
        assert!(matches!(
            Yaz0Header::parse(b"SARC"),
            Err(Yaz0Error::NotThisFormat)
        ));
        assert!(matches!(
            Yaz0Header::parse(b"Yaz0\x00\x00"),
            Err(Yaz0Error::Truncated { len: 6 })
        ));
        assert!(matches!(
            Yaz0Header::parse(b"Ya"),
            Err(Yaz0Error::Truncated { len: 2 })
        ));
    }

    #[test]
    fn test_constants() {
        assert_eq!(HEADER_SIZE, 16);
        assert_eq!(MAX_DISTANCE, 4096);
        assert_eq!(MAX_MATCH_LENGTH, 0xFF + LONG_MATCH_BIAS);
        assert_eq!(&YAZ0_MAGIC, b"Yaz0");
    }

    #[test]
    fn test_stats_finalize() {
        let mut stats = CompressionStats::default();
        stats.finalize(50, 200);
        assert_eq!(stats.input_bytes, 50);
        assert_eq!(stats.output_bytes, 200);
        assert!((stats.compression_ratio - 0.25).abs() < f64::EPSILON);

        stats.finalize(16, 0);
        assert_eq!(stats.compression_ratio, 0.0);
    }

    fn hex_header(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }
}
