//! This library provides the byte-level primitives shared by the *Borderlands* save readers.
//!
//! # Save Stream Encoding
//!
//! Both the **WSG** save stream and the **STFS** package are decoded from an in-memory buffer
//! through a [`Cursor`], which keeps a read offset and a [`ByteOrder`]. The byte order is fixed
//! for the lifetime of a document once its version has been detected, but it can be switched on
//! the cursor at any time. [`Writer`] is the mirror image: it accumulates encoded values into a
//! private buffer.
//!
//! ## Strings
//!
//! Strings are stored with a signed 4-byte length prefix (in the current byte order) followed by
//! the payload and a null terminator.
//!
//! | Prefix        | Payload                                                              |
//! |---------------|----------------------------------------------------------------------|
//! | `0`           | Nothing: the string is empty                                         |
//! | `n > 0`       | `n - 1` single-byte characters followed by `0x00`                    |
//! | `n < 0`       | `-n - 1` UTF-16 code units (current byte order) followed by `0x0000` |
//!
//! - **Single-byte characters**: each byte is the code point of the same value (ISO-8859-1).
//! - **Selection**: the encoder uses the single-byte form whenever every character of the string
//!   has a code point of `0xFF` or below, and the UTF-16 form otherwise. Decoders accept both forms
//!   regardless of where the file came from.
//! - **Termination**: decoded text is truncated at the first null character.
//! - **Invalid UTF-16**: unpaired surrogates decode to `U+FFFD` instead of failing the read, the
//!   same policy the STFS header text uses.
//!
//! ## Counted Groups
//!
//! Most of a save is made of groups that start with a signed 4-byte count followed by that many
//! records. [`Cursor::read_counted`] and [`Writer::write_counted`] implement that pattern once.
//!

pub mod error;
pub mod read;
pub mod string;
pub mod types;
pub mod write;

pub use read::Cursor;
pub use types::ByteOrder;
pub use write::Writer;
