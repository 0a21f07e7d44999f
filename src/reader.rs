extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::borrow::Cow;

use zerocopy::byteorder::{BE, LE, U16};
use zerocopy::FromBytes;

use crate::handle::{ByteOrder, BytesHandle, HandleError, Result};

macro_rules! read_primitive {
    ($(#[$doc:meta])* $name:ident, $t:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self) -> Result<$t> {
            let bytes = self.read_cbytes()?;
            Ok(match self.order {
                ByteOrder::BigEndian => <$t>::from_be_bytes(bytes),
                ByteOrder::LittleEndian => <$t>::from_le_bytes(bytes),
            })
        }
    };
}

impl BytesHandle {
    /// Copies up to `dest.len()` bytes from the cursor into `dest` and returns the number of
    /// bytes copied. If fewer bytes remain, only those are copied; a short count is not an
    /// error. To read into part of a buffer, pass a sub-slice.
    pub fn read_partial(&mut self, dest: &mut [u8]) -> usize {
        let n = dest.len().min(self.remaining());
        dest[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    /// Fills all of `dest` from the cursor, or fails with `EndOfData` without moving it.
    pub fn read_fully(&mut self, dest: &mut [u8]) -> Result<()> {
        let bytes = self.read_bytes(dest.len())?;
        dest.copy_from_slice(bytes);
        Ok(())
    }

    /// Reads `len` bytes and returns a reference to them in place. This does not copy.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        self.require(len)?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..start + len])
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.read_fully(&mut out)?;
        Ok(out)
    }

    /// Reads a single `u8` value.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a single `i8` value.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a `bool`. Any nonzero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    read_primitive!(
        /// Reads a `u16`.
        read_u16, u16
    );
    read_primitive!(
        /// Reads an `i16`.
        read_i16, i16
    );
    read_primitive!(
        /// Reads a `u32`.
        read_u32, u32
    );
    read_primitive!(
        /// Reads an `i32`.
        read_i32, i32
    );
    read_primitive!(
        /// Reads a `u64`.
        read_u64, u64
    );
    read_primitive!(
        /// Reads an `i64`.
        read_i64, i64
    );
    read_primitive!(
        /// Reads an `f32` from its IEEE 754 bit pattern.
        read_f32, f32
    );
    read_primitive!(
        /// Reads an `f64` from its IEEE 754 bit pattern.
        read_f64, f64
    );

    /// Reads one UTF-16 code unit. The value is not validated; it may be half of a surrogate
    /// pair.
    #[inline]
    pub fn read_char16(&mut self) -> Result<u16> {
        self.read_u16()
    }

    /// Reads `count` UTF-16 code units, as written by
    /// [`write_chars`](BytesHandle::write_chars), and decodes them.
    ///
    /// Fails with `InvalidUtf16` if the units contain an unpaired surrogate. On any failure the
    /// cursor does not move.
    pub fn read_chars(&mut self, count: usize) -> Result<String> {
        let Some(len) = count.checked_mul(2) else {
            return Err(HandleError::EndOfData {
                offset: self.pos,
                needed: usize::MAX,
                available: self.remaining(),
            });
        };
        self.require(len)?;
        let bytes = &self.data[self.pos..self.pos + len];

        let units: Vec<u16> = match self.order {
            ByteOrder::BigEndian => <[U16<BE>]>::ref_from_bytes(bytes)
                .map_err(|_| HandleError::InvalidUtf16)?
                .iter()
                .map(|c| c.get())
                .collect(),
            ByteOrder::LittleEndian => <[U16<LE>]>::ref_from_bytes(bytes)
                .map_err(|_| HandleError::InvalidUtf16)?
                .iter()
                .map(|c| c.get())
                .collect(),
        };
        let s = String::from_utf16(&units).map_err(|_| HandleError::InvalidUtf16)?;
        self.pos += len;
        Ok(s)
    }

    /// Reads a string encoded with a 2-byte unsigned length prefix followed by that many bytes,
    /// and returns the payload bytes in place.
    ///
    /// The payload is not validated. If the prefix or the payload is incomplete, this fails with
    /// `EndOfData` and the cursor does not move.
    pub fn read_utf_bytes(&mut self) -> Result<&[u8]> {
        let start = self.pos;
        let len = self.read_u16()? as usize;
        if let Err(e) = self.require(len) {
            self.pos = start;
            return Err(e);
        }
        self.read_bytes(len)
    }

    /// Reads a length-prefixed string and returns its payload as a `bstr::BStr`.
    ///
    /// The payload is not validated.
    #[cfg(feature = "bstr")]
    pub fn read_utf_bstr(&mut self) -> Result<&bstr::BStr> {
        Ok(bstr::BStr::new(self.read_utf_bytes()?))
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// Fails with `InvalidUtf8` if the payload is not well-formed. On any failure the cursor does
    /// not move.
    pub fn read_utf(&mut self) -> Result<String> {
        let start = self.pos;
        let decoded = core::str::from_utf8(self.read_utf_bytes()?).map(String::from);
        match decoded {
            Ok(s) => Ok(s),
            Err(_) => {
                self.pos = start;
                Err(HandleError::InvalidUtf8)
            }
        }
    }

    /// Reads a length-prefixed string, replacing ill-formed UTF-8 sequences with the Unicode
    /// replacement character.
    #[cfg(feature = "std")]
    pub fn read_utf_lossy(&mut self) -> Result<Cow<'_, str>> {
        let bytes = self.read_utf_bytes()?;
        Ok(String::from_utf8_lossy(bytes))
    }

    /// Line-oriented reads are not supported. This always fails with `Unimplemented`.
    pub fn read_line(&mut self) -> Result<String> {
        Err(HandleError::Unimplemented("read_line"))
    }

    /// Advances the cursor by up to `n` bytes, stopping at the logical end. Returns the number of
    /// bytes actually skipped. Never grows the buffer.
    pub fn skip_bytes(&mut self, n: usize) -> usize {
        let skipped = n.min(self.remaining());
        self.pos += skipped;
        skipped
    }
}
