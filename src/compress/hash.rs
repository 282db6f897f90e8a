//! Hash chains for Yaz0 compression
//!
//! Every position with at least three bytes remaining is filed under a hash
//! of those bytes. `head` holds the newest position per hash and `prev`
//! links each position to the previous one with the same hash, so a chain
//! walk visits candidates nearest first.

use super::state::CompressState;
use crate::common::MIN_MATCH_LENGTH;

/// Number of bits in a hash value
pub const HASH_BITS: u32 = 15;

/// Number of hash buckets
pub const HASH_TABLE_SIZE: usize = 1 << HASH_BITS;

/// Empty chain marker
pub const NIL: usize = usize::MAX;

/// Hash of the first three bytes of `bytes` (Fibonacci hashing)
pub fn triple_hash(bytes: &[u8]) -> usize {
    let value = u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2]);
    (value.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
}

impl CompressState<'_> {
    /// Hash bucket for the bytes at `pos`, if three bytes remain
    pub fn hash_at(&self, pos: usize) -> Option<usize> {
        self.input
            .get(pos..pos.checked_add(MIN_MATCH_LENGTH)?)
            .map(triple_hash)
    }

    /// File `pos` at the head of its chain
    pub fn insert_hash(&mut self, pos: usize) {
        if let Some(hash) = self.hash_at(pos) {
            self.prev[pos] = self.head[hash];
            self.head[hash] = pos;
        }
    }

    /// Insert every position below `target` not yet in the chains
    pub fn advance_hash(&mut self, target: usize) {
        while self.hashed_upto < target {
            self.insert_hash(self.hashed_upto);
            self.hashed_upto += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompressionLevel;

    #[test]
    fn test_triple_hash_range() {
        assert!(triple_hash(&[0xFF, 0xFF, 0xFF]) < HASH_TABLE_SIZE);
        assert_eq!(triple_hash(b"abc"), triple_hash(b"abcXYZ"));
        assert_ne!(triple_hash(b"abc"), triple_hash(b"abd"));
    }

    #[test]
    fn test_chain_links_newest_first() {
        let mut state = CompressState::new(b"abcabcabc", CompressionLevel::Default);
        state.advance_hash(7);

        let hash = triple_hash(b"abc");
        assert_eq!(state.head[hash], 6);
        assert_eq!(state.prev[6], 3);
        assert_eq!(state.prev[3], 0);
        assert_eq!(state.prev[0], NIL);
    }

    #[test]
    fn test_tail_positions_not_hashed() {
        let mut state = CompressState::new(b"abcd", CompressionLevel::Default);
        state.advance_hash(4);

        assert_eq!(state.hash_at(2), None);
        assert_eq!(state.head[triple_hash(b"bcd")], 1);
        assert_eq!(state.hashed_upto, 4);
    }
}
