//! Classify a file from the first bytes of its contents

use derive_more::derive::Display;
use tracing::trace;
use willow_io::{ByteOrder, Cursor};
use willow_stfs::StfsMagic;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::MAGIC;

/// Largest prefix of a file that is looked at by [`detect`]
pub const DETECTION_WINDOW: usize = 0xCFFF;

/// Save version written by the PC release, little endian
pub const VERSION_PC: i32 = 2;

/// [`VERSION_PC`] written big endian by the PS3 release, as read little endian
pub const VERSION_PS3: i32 = 0x0200_0000;

/// Platform a file was written by
#[derive(Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Platform {
    #[display("PC")]
    Pc,

    #[display("PS3")]
    Ps3,

    /// An STFS package, the save itself is one of its files
    #[display("X360")]
    Xbox360,

    #[display("unknown")]
    Unknown,
}

impl Platform {
    /// Platform and byte order of a save from its version field, read little endian
    pub fn from_version(version: i32) -> Option<(Platform, ByteOrder)> {
        match version {
            VERSION_PC => Some((Platform::Pc, ByteOrder::Little)),
            VERSION_PS3 => Some((Platform::Ps3, ByteOrder::Big)),
            _ => None,
        }
    }
}

/// Detect the platform of a file
///
/// Inputs that are too short to hold a signature are [`Platform::Unknown`].
pub fn detect(data: &[u8]) -> Platform {
    let window = &data[..data.len().min(DETECTION_WINDOW)];

    if let Some(magic) = StfsMagic::from_bytes(window) {
        trace!(%magic, "found package signature");
        return Platform::Xbox360;
    }

    let mut cursor = Cursor::new(window);
    match (cursor.read_array::<3>(), cursor.read_i32()) {
        (Ok(magic), Ok(version)) if &magic == MAGIC => Platform::from_version(version)
            .map(|(platform, _)| platform)
            .unwrap_or(Platform::Unknown),
        _ => Platform::Unknown,
    }
}
