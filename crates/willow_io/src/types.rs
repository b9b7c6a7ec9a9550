//! Shared value types.

use derive_more::derive::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interpretation of multi-byte values
///
/// PC saves are little endian, PS3 and Xbox 360 saves are big endian. The order also applies to
/// the code units of UTF-16 strings.
#[derive(Display, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    #[display("little")]
    Little,

    /// Most significant byte first
    #[display("big")]
    Big,
}
