//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`willow_io::error::Error`]
    #[error(transparent)]
    Io(#[from] willow_io::error::Error),

    /// Transparent wrapper for [`willow_stfs::error::Error`]
    #[error(transparent)]
    Stfs(#[from] willow_stfs::error::Error),

    /// save version {0:#010X} is not supported
    #[error("save version {0:#010X} is not supported")]
    UnknownVersion(i32),

    /// expected {expected} marker, found {found}
    #[error("expected `{expected}` marker, found `{found}`")]
    InvalidHeader {
        /// The marker required at this position
        expected: &'static str,
        /// What the file holds instead, with non printable bytes escaped
        found: String,
    },

    /// file is neither a save nor an Xbox 360 package
    #[error("file is neither a save nor an Xbox 360 package")]
    UnrecognizedFile,

    /// no save was selected from the package
    #[error("no save was selected from the package")]
    NoSaveSelected,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
