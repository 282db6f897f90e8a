//! Error handling for Yaz0 operations
//!
//! This module defines the error types used throughout the crate.
//! It uses thiserror for ergonomic error handling and keeps the format-probe
//! miss (`NotThisFormat`) distinct from genuine corruption.

pub use crate::common::Result;
pub use crate::common::Yaz0Error;
