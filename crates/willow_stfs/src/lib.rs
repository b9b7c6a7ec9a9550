//! This library handles reading **STFS** packages, the container the *Xbox 360* uses for saved
//! games and downloadable content.
//!
//! # STFS Package Format Documentation
//!
//! An STFS package is a signed header followed by a data region split into 0x1000-byte blocks.
//! Blocks either hold file data or hash tables. The file system lives inside the data region: a
//! file table lists every entry and each entry points at the first block of a chain, the next
//! block of the chain being recorded in the hash tables.
//!
//! ## Header
//!
//! All multi-byte values are big endian unless noted.
//!
//! | Offset (bytes) | Field                  | Description                                                   |
//! |----------------|------------------------|---------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: `CON `, `PIRS` or `LIVE`                             |
//! | 0x0004         | Certificate            | Console certificate (`CON `) or 0x100 byte signature          |
//! | 0x022C         | License entries        | 0x100 bytes                                                   |
//! | 0x032C         | Content ID             | 0x14 bytes: SHA-1 of the header                               |
//! | 0x0340         | Entry ID               | 4 bytes: selects the hash table geometry                      |
//! | 0x0344         | Content type           | 4 bytes, see [`types::ContentType`]                           |
//! | 0x0348         | Metadata version       | 4 bytes                                                       |
//! | 0x034C         | Content size           | 8 bytes                                                       |
//! | 0x0360         | Title ID               | 4 bytes                                                       |
//! | 0x037C         | File table block count | 2 bytes, **little endian**                                    |
//! | 0x037E         | File table block       | 3 bytes, **little endian**: first block of the file table     |
//! | 0x0395         | Allocated blocks       | 4 bytes                                                       |
//! | 0x0399         | Unallocated blocks     | 4 bytes                                                       |
//! | 0x0411         | Display names          | 18 × 0x80 bytes: UTF-16, one entry per language               |
//! | 0x0D11         | Descriptions           | 18 × 0x80 bytes: UTF-16, one entry per language               |
//! | 0x1712         | Thumbnail size         | 4 bytes, followed by the title image size                     |
//! | 0x171A         | Thumbnail              | Only present when its size is not zero                        |
//! | 0x571A         | Title image            | Only present when its size is not zero                        |
//!
//! See [`types::StfsHeader`] for the complete list.
//!
//! ### Table Size Shift
//!
//! The shift is `0` when `((entry_id + 0xFFF) & 0xF000) >> 12` is `0xB` and `1` otherwise. With a
//! shift of `1` every hash table is stored twice and the record's status byte tells which copy is
//! current.
//!
//! ## Blocks
//!
//! Physical block `n` starts at `0xC000 + n * 0x1000`. A hash table is inserted every `0xAA` data
//! blocks and another one every `0x70E4` data blocks, see [`read::fix_block_number`] for the
//! translation from logical to physical numbers.
//!
//! ### Hash Records
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Hash                   | 0x14 bytes: SHA-1 of the block                          |
//! | 0x0014         | Status                 | 1 byte: `0x00` unused, `0x40` freed, `0x80` old, `0xC0` current |
//! | 0x0015         | Next block             | 3 bytes: next logical block of the chain                |
//!
//! ## File Table
//!
//! The file table is a chain of blocks split into 0x40 byte entries. Entries with an empty name
//! are unused and skipped. Every other entry becomes a listing, even when its path repeats an
//! earlier one; lookups by path return the first.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Name                   | 0x28 bytes: null padded                                 |
//! | 0x0028         | Flags                  | 1 byte: `0x80` marks a directory                        |
//! | 0x0029         | Block count            | 3 bytes, little endian                                  |
//! | 0x002F         | First block            | 3 bytes, little endian                                  |
//! | 0x0032         | Path index             | 2 bytes: slot of the parent directory, `-1` for root    |
//! | 0x0034         | Size                   | 4 bytes                                                 |
//! | 0x0038         | Update date and time   | 2 + 2 bytes                                             |
//! | 0x003C         | Access date and time   | 2 + 2 bytes                                             |
//!

pub mod error;
pub mod read;
pub mod types;

pub use read::StfsPackage;
pub use types::{FileListing, StfsHeader, StfsMagic};
