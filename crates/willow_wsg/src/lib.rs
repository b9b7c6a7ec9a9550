//! This library handles reading and writing **WSG** saves from *Borderlands*.
//!
//! # WSG Save Format Documentation
//!
//! A save is a single stream of fields. PC saves are little endian; PS3 saves are big endian,
//! which only shows in the version field since the signature and markers are plain bytes. Xbox
//! 360 saves are stored as a file inside an **STFS** package, see [`willow_stfs`].
//!
//! Strings and counted groups use the encodings of [`willow_io`].
//!
//! ## Header
//!
//! | Offset (bytes) | Field                  | Description                                                   |
//! |----------------|------------------------|---------------------------------------------------------------|
//! | 0x0000         | Magic number           | 3 bytes: `WSG`                                                |
//! | 0x0003         | Version                | 4 bytes: `2`, stored in the byte order of the save            |
//! | 0x0007         | Marker                 | 4 bytes: `PLYR`                                               |
//!
//! ## Character
//!
//! Every field following the marker uses the byte order selected by the version.
//!
//! | Field                  | Description                                                   |
//! |------------------------|---------------------------------------------------------------|
//! | Revision               | 4 bytes                                                       |
//! | Class                  | String                                                        |
//! | Level                  | 4 bytes                                                       |
//! | Experience             | 4 bytes                                                       |
//! | Skill points           | 4 bytes                                                       |
//! | Unknown                | 4 bytes                                                       |
//! | Cash                   | 4 bytes                                                       |
//! | Playthrough completed  | 4 bytes                                                       |
//! | Skills                 | Counted group of name (string), level, experience, in use    |
//! | Vehicles               | First color, second color, first type, second type           |
//! | Ammo pools             | Counted group of resource (string), pool (string), remaining amount (float), level |
//!
//! The rest of the save (items, weapons, missions, locations, echoes) is kept as raw bytes in
//! [`SaveDocument::trailing`].
//!

pub mod detect;
pub mod error;
pub mod load;
pub mod read;
pub mod types;
pub mod write;

pub use detect::{detect, Platform};
pub use load::{first_save_listing, load};
pub use types::SaveDocument;
