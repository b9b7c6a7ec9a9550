//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`willow_io::error::Error`]
    #[error(transparent)]
    Io(#[from] willow_io::error::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file does not start with a known package signature
    #[error("file is not an STFS package (magic {magic:02X?})")]
    InvalidHeader {
        /// The first bytes of the file
        magic: [u8; 4],
    },

    /// file table slot {slot} does not describe a file
    #[error("file table slot {slot} does not describe a file")]
    MalformedRecord {
        /// Index of the slot in the file table
        slot: usize,
    },

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),

    /// in slot {0}
    #[error("in slot {0}")]
    Slot(usize),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
