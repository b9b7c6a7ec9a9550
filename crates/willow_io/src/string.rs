//! Length-prefixed string codec
//!
//! See the [crate level documentation](crate#strings) for the layout.

use widestring::U16CString;

use crate::{
    error::Result,
    read::Cursor,
    types::ByteOrder,
    write::Writer,
};

/// Whether `value` can be stored with one byte per character
pub fn is_single_byte(value: &str) -> bool {
    value.chars().all(|c| u32::from(c) <= 0xFF)
}

impl Cursor<'_> {
    /// Read a length-prefixed string in either its single-byte or its UTF-16 form
    ///
    /// Unpaired surrogates in the UTF-16 form are replaced with `U+FFFD`.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_i32()?;

        if length == 0 {
            return Ok(String::new());
        }

        if length > 0 {
            let bytes = self.read_bytes(length as usize)?;
            return Ok(bytes
                .iter()
                .take_while(|&&b| b != 0)
                .map(|&b| char::from(b))
                .collect());
        }

        let units = length.unsigned_abs() as usize;
        let order = self.order();
        let bytes = self.read_bytes(units.saturating_mul(2))?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| match order {
                ByteOrder::Little => u16::from_le_bytes([pair[0], pair[1]]),
                ByteOrder::Big => u16::from_be_bytes([pair[0], pair[1]]),
            })
            .collect();

        Ok(U16CString::from_vec_truncate(units).to_string_lossy())
    }
}

impl Writer {
    /// Write a length-prefixed string
    ///
    /// The single-byte form is used when every character fits in one byte, the UTF-16 form
    /// otherwise. An empty string is written as a bare zero prefix.
    ///
    /// # Panics
    ///
    /// Panics if the string is longer than a 32-bit length prefix can describe.
    pub fn write_string(&mut self, value: &str) {
        if value.is_empty() {
            self.write_i32(0);
            return;
        }

        if is_single_byte(value) {
            let bytes: Vec<u8> = value.chars().map(|c| u32::from(c) as u8).collect();
            let length = i32::try_from(bytes.len() + 1).expect("string is too long to encode");
            self.write_i32(length);
            self.write_bytes(&bytes);
            self.write_u8(0);
        } else {
            let units: Vec<u16> = value.encode_utf16().collect();
            let length = i32::try_from(units.len() + 1).expect("string is too long to encode");
            self.write_i32(-length);
            for unit in units {
                self.write_u16(unit);
            }
            self.write_u16(0);
        }
    }
}
