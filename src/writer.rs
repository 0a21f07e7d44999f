extern crate alloc;
use alloc::vec::Vec;

use zerocopy::byteorder::{BE, LE, U16};
use zerocopy::IntoBytes;

use crate::handle::{ByteOrder, BytesHandle, HandleError, Result};

macro_rules! write_primitive {
    ($(#[$doc:meta])* $name:ident, $t:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, value: $t) -> Result<()> {
            let bytes = match self.order {
                ByteOrder::BigEndian => value.to_be_bytes(),
                ByteOrder::LittleEndian => value.to_le_bytes(),
            };
            self.write_bytes(&bytes)
        }
    };
}

impl BytesHandle {
    /// Writes `bytes` at the cursor, growing the buffer if needed. To write part of a buffer,
    /// pass a sub-slice.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve_at_cursor(bytes.len())?;
        self.data[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Writes a small, fixed-size array of bytes.
    #[inline]
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) -> Result<()> {
        self.write_bytes(&value)
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_bytes(&[value as u8])
    }

    /// Writes a `bool` value. True is encoded as 1. False is encoded as 0.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    write_primitive!(
        /// Writes a single `u16` value
        write_u16, u16
    );
    write_primitive!(
        /// Writes a single `i16` value
        write_i16, i16
    );
    write_primitive!(
        /// Writes a single `u32` value
        write_u32, u32
    );
    write_primitive!(
        /// Writes a single `i32` value
        write_i32, i32
    );
    write_primitive!(
        /// Writes a single `u64` value
        write_u64, u64
    );
    write_primitive!(
        /// Writes a single `i64` value
        write_i64, i64
    );
    write_primitive!(
        /// Writes an `f32` value using its IEEE 754 bit pattern.
        write_f32, f32
    );
    write_primitive!(
        /// Writes an `f64` value using its IEEE 754 bit pattern.
        write_f64, f64
    );

    /// Writes one UTF-16 code unit.
    #[inline]
    pub fn write_char16(&mut self, value: u16) -> Result<()> {
        self.write_u16(value)
    }

    /// Writes `s` as a sequence of UTF-16 code units, two bytes each, with no length prefix.
    pub fn write_chars(&mut self, s: &str) -> Result<()> {
        match self.order {
            ByteOrder::BigEndian => {
                let units: Vec<U16<BE>> = s.encode_utf16().map(U16::new).collect();
                self.write_bytes(units.as_bytes())
            }
            ByteOrder::LittleEndian => {
                let units: Vec<U16<LE>> = s.encode_utf16().map(U16::new).collect();
                self.write_bytes(units.as_bytes())
            }
        }
    }

    /// Writes the UTF-8 bytes of `s` with no length prefix.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Writes `s` as UTF-8, prefixed by its byte length as a 2-byte unsigned value.
    ///
    /// Fails with `StringTooLong`, writing nothing, if the encoded length exceeds 65535 bytes.
    pub fn write_utf(&mut self, s: &str) -> Result<()> {
        let len = u16::try_from(s.len()).map_err(|_| HandleError::StringTooLong(s.len()))?;
        self.reserve_at_cursor(2 + s.len())?;
        self.write_u16(len)?;
        self.write_bytes(s.as_bytes())
    }
}
