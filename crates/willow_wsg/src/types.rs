//! Decoded contents of a save file.

use willow_io::ByteOrder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::detect::Platform;

/// Signature at the start of every save
pub const MAGIC: &[u8; 3] = b"WSG";

/// Marker following the version field
pub const PLAYER_MARKER: &[u8; 4] = b"PLYR";

/// A decoded save
///
/// Every collection is the image of a count prefixed group; the count is taken from the length
/// of the collection when the document is written back, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaveDocument {
    /// Platform the save came from, [`Platform::Xbox360`] when loaded from a package
    pub platform: Platform,
    /// Byte order of every field after the version
    pub byte_order: ByteOrder,
    pub magic: [u8; 3],
    /// Version number, independent of the byte order it was stored with
    pub version: i32,
    pub marker: [u8; 4],
    pub revision: i32,
    /// Character class, such as `gd_Roland.Character.CharacterClass_Soldier`
    pub class: String,
    pub level: i32,
    pub experience: i32,
    pub skill_points: i32,
    /// Passed through unchanged, its meaning is unknown
    pub reserved: i32,
    pub cash: i32,
    pub playthrough_completed: i32,
    pub skills: Vec<Skill>,
    pub vehicles: Vehicles,
    pub ammo_pools: Vec<AmmoPool>,
    /// Everything following the decoded groups, kept as is
    #[cfg_attr(feature = "serde", serde(with = "hex_bytes"))]
    pub trailing: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Skill {
    pub name: String,
    pub level: i32,
    pub experience: i32,
    pub in_use: i32,
}

impl Skill {
    /// Whether the skill is assigned to the character
    pub fn is_in_use(&self) -> bool {
        self.in_use != 0
    }
}

/// Paint and model of the two vehicle slots
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vehicles {
    pub first_color: i32,
    pub second_color: i32,
    pub first_type: i32,
    pub second_type: i32,
}

/// Ammunition carried for one weapon type
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmmoPool {
    pub resource: String,
    pub pool: String,
    pub remaining: f32,
    /// Capacity upgrade level
    pub level: i32,
}

#[cfg(feature = "serde")]
mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        if text.len() % 2 != 0 || !text.is_ascii() {
            return Err(D::Error::custom("expected pairs of hex digits"));
        }

        (0..text.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&text[i..i + 2], 16).map_err(D::Error::custom))
            .collect()
    }
}
