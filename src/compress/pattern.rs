//! Match finding for Yaz0 compression
//!
//! Walks the hash chain for the current position and keeps the longest match
//! within the 4 KiB window. Matches may run into the bytes they are copying,
//! which the decoder handles as a self-overlapping back-reference.

use super::{hash::NIL, state::CompressState};
use crate::common::{MAX_DISTANCE, MAX_MATCH_LENGTH, MIN_MATCH_LENGTH};

/// Result of match finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Length of the found match (0 if no match)
    pub length: usize,
    /// Backward distance to the match (0 if no match)
    pub distance: usize,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(length: usize, distance: usize) -> Self {
        Self { length, distance }
    }

    /// Create a "no match" result
    pub fn no_match() -> Self {
        Self {
            length: 0,
            distance: 0,
        }
    }

    /// Check if this is worth encoding as a back-reference
    pub fn is_match(&self) -> bool {
        self.length >= MIN_MATCH_LENGTH
    }
}

impl CompressState<'_> {
    /// Find the longest match for the bytes at `pos`
    ///
    /// Candidates are visited nearest first, so among equal lengths the
    /// shortest distance wins.
    pub fn find_match(&mut self, pos: usize) -> MatchResult {
        self.advance_hash(pos);

        let max_length = self.input.len().saturating_sub(pos).min(MAX_MATCH_LENGTH);
        if max_length < MIN_MATCH_LENGTH {
            return MatchResult::no_match();
        }
        let Some(hash) = self.hash_at(pos) else {
            return MatchResult::no_match();
        };

        let mut best = MatchResult::no_match();
        let mut candidate = self.head[hash];
        let mut remaining = self.level.search_depth();

        while candidate != NIL && remaining > 0 {
            let distance = pos - candidate;
            if distance > MAX_DISTANCE {
                break;
            }

            let length = self.match_length(candidate, pos, max_length);
            if length > best.length {
                best = MatchResult::new(length, distance);
                if length == max_length {
                    break;
                }
            }

            candidate = self.prev[candidate];
            remaining -= 1;
        }

        if best.is_match() {
            best
        } else {
            MatchResult::no_match()
        }
    }

    /// Choose what to emit at `pos`, applying lazy matching when enabled
    ///
    /// Returns no match when a literal should be emitted because the match
    /// starting one byte later is strictly longer.
    pub fn next_match(&mut self, pos: usize) -> MatchResult {
        let found = self.find_match(pos);
        if !found.is_match() || !self.level.lazy_matching() || found.length == MAX_MATCH_LENGTH {
            return found;
        }

        let deferred = self.find_match(pos + 1);
        if deferred.length > found.length {
            MatchResult::no_match()
        } else {
            found
        }
    }

    /// Count equal bytes at `earlier` and `pos`, up to `max_length`
    fn match_length(&self, earlier: usize, pos: usize, max_length: usize) -> usize {
        self.input[earlier..]
            .iter()
            .zip(&self.input[pos..pos + max_length])
            .take_while(|(a, b)| a == b)
            .count()
    }
}
