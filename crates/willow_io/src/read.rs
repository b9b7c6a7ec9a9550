//! Types for reading values out of an in-memory buffer
//!

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use tracing::trace;

use crate::{
    error::{Error, Result},
    types::ByteOrder,
};

/// Sequential reader over a borrowed byte buffer
///
/// Every read honours the cursor's current [`ByteOrder`] and advances the offset. A read that
/// would go past the end of the buffer fails with [`Error::OutOfRange`] and leaves the offset
/// where it was.
///
/// ```
/// use willow_io::{ByteOrder, Cursor};
///
/// let data = [0x00, 0x00, 0x00, 0x2A, 0x2A, 0x00];
/// let mut cursor = Cursor::with_order(&data, ByteOrder::Big);
/// assert_eq!(cursor.read_i32()?, 42);
///
/// cursor.set_order(ByteOrder::Little);
/// assert_eq!(cursor.read_i16()?, 42);
/// # Ok::<(), willow_io::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
    order: ByteOrder,
}

impl<'a> Cursor<'a> {
    /// Create a little endian cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_order(data, ByteOrder::Little)
    }

    /// Create a cursor with the given byte order positioned at the start of `data`
    pub fn with_order(data: &'a [u8], order: ByteOrder) -> Self {
        Cursor {
            data,
            offset: 0,
            order,
        }
    }

    /// The byte order used for multi-byte reads
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Switch the byte order used for all following reads
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Current offset from the start of the buffer
    pub fn tell(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Move to an absolute offset. The end of the buffer is a valid position.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::OutOfRange {
                offset: self.offset,
                requested: position - self.offset,
                available: self.remaining(),
            });
        }
        self.offset = position;
        Ok(())
    }

    /// Advance the offset by `count` bytes
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read the next `count` bytes without copying them
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if count > available {
            return Err(Error::OutOfRange {
                offset: self.offset,
                requested: count,
                available,
            });
        }

        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    /// Read a fixed number of bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut result = [0u8; N];
        result.copy_from_slice(self.read_bytes(N)?);
        Ok(result)
    }

    /// Consume everything up to the end of the buffer
    pub fn rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.offset..];
        self.offset = self.data.len();
        bytes
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_bytes(2)?;
        Ok(match self.order {
            ByteOrder::Little => LittleEndian::read_i16(bytes),
            ByteOrder::Big => BigEndian::read_i16(bytes),
        })
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(match self.order {
            ByteOrder::Little => LittleEndian::read_u16(bytes),
            ByteOrder::Big => BigEndian::read_u16(bytes),
        })
    }

    /// Read a packed 3-byte unsigned integer
    pub fn read_u24(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(3)?;
        Ok(match self.order {
            ByteOrder::Little => LittleEndian::read_u24(bytes),
            ByteOrder::Big => BigEndian::read_u24(bytes),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(match self.order {
            ByteOrder::Little => LittleEndian::read_i32(bytes),
            ByteOrder::Big => BigEndian::read_i32(bytes),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(match self.order {
            ByteOrder::Little => LittleEndian::read_u32(bytes),
            ByteOrder::Big => BigEndian::read_u32(bytes),
        })
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_bytes(8)?;
        Ok(match self.order {
            ByteOrder::Little => LittleEndian::read_u64(bytes),
            ByteOrder::Big => BigEndian::read_u64(bytes),
        })
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.read_bytes(4)?;
        Ok(match self.order {
            ByteOrder::Little => LittleEndian::read_f32(bytes),
            ByteOrder::Big => BigEndian::read_f32(bytes),
        })
    }

    /// Read a signed count followed by that many records decoded by `read`
    ///
    /// Errors from `read` are passed through untouched, so callers can use their own error type as
    /// long as it can be built from this crate's [`Error`].
    pub fn read_counted<T, E, F>(&mut self, mut read: F) -> core::result::Result<Vec<T>, E>
    where
        F: FnMut(&mut Self) -> core::result::Result<T, E>,
        E: From<Error>,
    {
        let offset = self.offset;
        let count = self.read_i32()?;
        let count = usize::try_from(count).map_err(|_| Error::NegativeCount { offset, count })?;
        trace!(offset, count, "reading counted group");

        // every record takes at least one byte, anything beyond that is a corrupt count
        let mut result = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            result.push(read(self)?);
        }
        Ok(result)
    }
}
