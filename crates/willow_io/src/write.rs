//! Types for encoding values into a byte buffer
//!

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::types::ByteOrder;

/// Accumulating writer, the counterpart of [`crate::Cursor`]
///
/// The writer never reads back what it produced; [`Writer::finish`] hands over the buffer.
///
/// ```
/// use willow_io::{ByteOrder, Writer};
///
/// let mut writer = Writer::new(ByteOrder::Big);
/// writer.write_i32(42);
/// writer.write_bytes(b"PLYR");
/// assert_eq!(writer.finish(), vec![0x00, 0x00, 0x00, 0x2A, b'P', b'L', b'Y', b'R']);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buffer: Vec<u8>,
    order: ByteOrder,
}

impl Writer {
    pub fn new(order: ByteOrder) -> Self {
        Writer {
            buffer: Vec::new(),
            order,
        }
    }

    /// The byte order used for multi-byte writes
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Switch the byte order used for all following writes
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        let mut buf = [0u8; 2];
        match self.order {
            ByteOrder::Little => LittleEndian::write_i16(&mut buf, value),
            ByteOrder::Big => BigEndian::write_i16(&mut buf, value),
        }
        self.write_bytes(&buf);
    }

    pub fn write_u16(&mut self, value: u16) {
        let mut buf = [0u8; 2];
        match self.order {
            ByteOrder::Little => LittleEndian::write_u16(&mut buf, value),
            ByteOrder::Big => BigEndian::write_u16(&mut buf, value),
        }
        self.write_bytes(&buf);
    }

    pub fn write_i32(&mut self, value: i32) {
        let mut buf = [0u8; 4];
        match self.order {
            ByteOrder::Little => LittleEndian::write_i32(&mut buf, value),
            ByteOrder::Big => BigEndian::write_i32(&mut buf, value),
        }
        self.write_bytes(&buf);
    }

    pub fn write_f32(&mut self, value: f32) {
        let mut buf = [0u8; 4];
        match self.order {
            ByteOrder::Little => LittleEndian::write_f32(&mut buf, value),
            ByteOrder::Big => BigEndian::write_f32(&mut buf, value),
        }
        self.write_bytes(&buf);
    }

    /// Write the length of `items` as a signed count, then each item with `write`
    ///
    /// # Panics
    ///
    /// Panics if `items` holds more than `i32::MAX` entries, which the format cannot express.
    pub fn write_counted<T, F>(&mut self, items: &[T], mut write: F)
    where
        F: FnMut(&mut Self, &T),
    {
        let count = i32::try_from(items.len()).expect("group is too large for a 32-bit count");
        self.write_i32(count);
        for item in items {
            write(self, item);
        }
    }

    /// Take the encoded bytes
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }
}
