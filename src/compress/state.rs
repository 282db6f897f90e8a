//! Compression state management
//!
//! Holds the input being compressed, the hash-chain tables used for match
//! finding, and running statistics.

use super::hash::{HASH_TABLE_SIZE, NIL};
use crate::common::{CompressionLevel, CompressionStats};

/// Compression state for one input buffer
#[derive(Debug)]
pub struct CompressState<'a> {
    /// Uncompressed input
    pub input: &'a [u8],
    /// Effort setting
    pub level: CompressionLevel,
    /// Most recent position for each 3-byte hash, or `NIL`
    pub head: Vec<usize>,
    /// Previous position with the same hash, indexed by position
    pub prev: Vec<usize>,
    /// Positions below this have been inserted into the chains
    pub hashed_upto: usize,
    /// Literal/back-reference counters
    pub stats: CompressionStats,
}

impl<'a> CompressState<'a> {
    /// Create a new compression state
    pub fn new(input: &'a [u8], level: CompressionLevel) -> Self {
        Self {
            input,
            level,
            head: vec![NIL; HASH_TABLE_SIZE],
            prev: vec![NIL; input.len()],
            hashed_upto: 0,
            stats: CompressionStats::default(),
        }
    }
}
