//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A read went past the end of the buffer
    #[error("read of {requested} bytes at offset {offset:#x} is out of range ({available} bytes available)")]
    OutOfRange {
        /// Offset the read started from
        offset: usize,
        /// Number of bytes the read needed
        requested: usize,
        /// Number of bytes left in the buffer
        available: usize,
    },

    /// A group count was negative
    #[error("negative record count {count} at offset {offset:#x}")]
    NegativeCount {
        /// Offset of the count field
        offset: usize,
        /// Value that was read
        count: i32,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
