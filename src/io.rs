//! Adapters between `BytesHandle` and the `std::io` traits.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::handle::{BytesHandle, HandleError};

impl From<HandleError> for io::Error {
    fn from(e: HandleError) -> Self {
        let kind = match e {
            HandleError::EndOfData { .. } => io::ErrorKind::UnexpectedEof,
            HandleError::Unimplemented(_) => io::ErrorKind::Unsupported,
            HandleError::StringTooLong(_) | HandleError::CapacityOverflow => {
                io::ErrorKind::InvalidInput
            }
            HandleError::InvalidUtf8 | HandleError::InvalidUtf16 => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, e)
    }
}

/// Short reads are reported through the count, as with [`BytesHandle::read_partial`].
impl Read for BytesHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_partial(buf))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        Ok(self.read_fully(buf)?)
    }
}

/// Writes always consume the entire input, growing the buffer as needed.
impl Write for BytesHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Ok(self.write_bytes(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `SeekFrom::End` is relative to the logical length. Seeking past the end extends the
/// buffer; seeking before the start fails with `InvalidInput`.
impl Seek for BytesHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => usize::try_from(n).ok(),
            SeekFrom::End(delta) => offset_by(self.len(), delta),
            SeekFrom::Current(delta) => offset_by(self.offset(), delta),
        };
        let Some(target) = target else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            ));
        };
        BytesHandle::seek(self, target)?;
        Ok(target as u64)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.offset() as u64)
    }
}

fn offset_by(base: usize, delta: i64) -> Option<usize> {
    if delta >= 0 {
        base.checked_add(usize::try_from(delta).ok()?)
    } else {
        base.checked_sub(usize::try_from(delta.unsigned_abs()).ok()?)
    }
}
