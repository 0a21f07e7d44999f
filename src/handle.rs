extern crate alloc;
use alloc::vec::Vec;

use thiserror::Error;
use tracing::trace;

/// Result type for `BytesHandle` operations.
pub type Result<T> = core::result::Result<T, HandleError>;

/// Number of bytes allocated by [`BytesHandle::new`] when no explicit capacity is given.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1_000_000;

/// Byte order used to encode and decode multi-byte values.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ByteOrder {
    /// Most-significant byte first. This is the default.
    #[default]
    BigEndian,
    /// Least-significant byte first.
    LittleEndian,
}

/// Construction parameters for a [`BytesHandle`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct HandleConfig {
    /// Number of bytes to allocate up front. The logical length still starts at zero.
    pub initial_capacity: usize,
    /// Byte order for multi-byte reads and writes.
    pub order: ByteOrder,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            order: ByteOrder::default(),
        }
    }
}

impl HandleConfig {
    /// Returns the default configuration: [`DEFAULT_INITIAL_CAPACITY`] bytes, big-endian.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes to allocate up front.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the byte order.
    pub fn order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }
}

/// A random-access handle over a growable in-memory byte buffer.
///
/// The handle tracks three things: a backing store whose size is the *capacity*, a *logical
/// length* (the number of meaningful bytes), and a *cursor* at which the next read or write
/// happens. `0 <= offset() <= len() <= capacity()` always holds.
///
/// Reads never look past the logical length. Fixed-width reads fail with
/// [`HandleError::EndOfData`] if not enough bytes remain, and leave the cursor where it was.
/// [`read_partial`](Self::read_partial) is the exception: it copies whatever is available and
/// reports the count.
///
/// Writes extend the logical length as needed. When the backing store is too small it is
/// reallocated to twice the requested length. The store is only ever exposed through borrows
/// ([`backing`](Self::backing), [`as_bytes`](Self::as_bytes)), so a view obtained before a
/// reallocation cannot be used after it.
///
/// There is no internal synchronization. Every mutating operation takes `&mut self`; callers
/// sharing a handle between threads must wrap it in their own lock.
#[derive(Clone, Debug)]
pub struct BytesHandle {
    /// Backing store. `data.len()` is the capacity; bytes past `len` are cleared when the
    /// logical length grows over them.
    pub(crate) data: Vec<u8>,
    /// Logical length.
    pub(crate) len: usize,
    /// Cursor.
    pub(crate) pos: usize,
    pub(crate) order: ByteOrder,
}

impl Default for BytesHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl BytesHandle {
    /// Creates an empty handle with [`DEFAULT_INITIAL_CAPACITY`] bytes allocated.
    pub fn new() -> Self {
        Self::with_config(HandleConfig::default())
    }

    /// Creates an empty handle with `capacity` bytes allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(HandleConfig::default().initial_capacity(capacity))
    }

    /// Creates an empty handle from an explicit configuration.
    pub fn with_config(config: HandleConfig) -> Self {
        Self {
            data: alloc::vec![0; config.initial_capacity],
            len: 0,
            pos: 0,
            order: config.order,
        }
    }

    /// Wraps existing content. The logical length is the length of `bytes` and the cursor
    /// starts at zero.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            len: bytes.len(),
            data: bytes,
            pos: 0,
            order: ByteOrder::default(),
        }
    }

    /// Returns the logical length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the backing store.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the cursor position.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes between the cursor and the logical end.
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }

    /// Returns the byte order used for multi-byte values.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Changes the byte order. Bytes already in the buffer are not touched.
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Moves the cursor to `offset`. Seeking past the logical end extends the buffer to
    /// `offset` first.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.len {
            self.set_len(offset)?;
        }
        self.pos = offset;
        Ok(())
    }

    /// Sets the logical length.
    ///
    /// If `new_len` exceeds the capacity, the backing store is reallocated to `2 * new_len`
    /// bytes. Existing content, the cursor, and the byte order are preserved. Bytes between the
    /// old and new length read as zero, even if the buffer was shrunk over them earlier. If
    /// `new_len` is below the cursor, the cursor moves to `new_len`.
    pub fn set_len(&mut self, new_len: usize) -> Result<()> {
        if new_len > self.data.len() {
            let new_capacity = new_len.checked_mul(2).unwrap_or(new_len);
            trace!(
                old_capacity = self.data.len(),
                new_capacity,
                "reallocating bytes handle"
            );
            self.data
                .try_reserve_exact(new_capacity - self.data.len())
                .map_err(|_| HandleError::CapacityOverflow)?;
            self.data.resize(new_capacity, 0);
        }
        if new_len > self.len {
            self.data[self.len..new_len].fill(0);
        }
        self.len = new_len;
        if self.pos > new_len {
            self.pos = new_len;
        }
        Ok(())
    }

    /// Makes room for `count` bytes at the cursor, growing the logical length if needed.
    pub(crate) fn reserve_at_cursor(&mut self, count: usize) -> Result<()> {
        let end = self
            .pos
            .checked_add(count)
            .ok_or(HandleError::CapacityOverflow)?;
        if end > self.len {
            self.set_len(end)?;
        }
        Ok(())
    }

    /// Checks that `count` bytes are available at the cursor.
    pub(crate) fn require(&self, count: usize) -> Result<()> {
        if self.remaining() < count {
            Err(HandleError::EndOfData {
                offset: self.pos,
                needed: count,
                available: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    /// Returns the logical content, `[0, len())`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Returns the entire backing store, including the unused tail past the logical length.
    ///
    /// Writing through [`backing_mut`](Self::backing_mut) bypasses the cursor and length
    /// bookkeeping. Neither view can outlive a call that grows the buffer.
    pub fn backing(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the entire backing store. See [`backing`](Self::backing).
    pub fn backing_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copies the logical content into a new `Vec`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Extracts the logical content, dropping the unused tail of the backing store.
    pub fn into_inner(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }

    /// Does nothing. A handle holds no resources beyond its memory, so it can be dropped at any
    /// time; this exists for callers that treat handles uniformly with other closeable sources.
    pub fn close(&mut self) {}
}

impl From<Vec<u8>> for BytesHandle {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for BytesHandle {
    fn from(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

/// Error type for `BytesHandle`
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum HandleError {
    /// A read needed more bytes than remain before the logical end. The cursor did not move.
    #[error("end of data: needed {needed} bytes at offset {offset}, but only {available} remain")]
    EndOfData {
        /// Cursor position when the read was attempted.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes that were available.
        available: usize,
    },

    /// The operation is not supported by this handle.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// A string was too long to encode with a 16-bit length prefix.
    #[error("string of {0} bytes does not fit in a 16-bit length prefix")]
    StringTooLong(usize),

    /// A length computation overflowed, or the allocation failed.
    #[error("requested length exceeds addressable capacity")]
    CapacityOverflow,

    /// String data read from the buffer was not well-formed UTF-8.
    #[error("string data is not well-formed UTF-8")]
    InvalidUtf8,

    /// Character data read from the buffer was not well-formed UTF-16.
    #[error("character data is not well-formed UTF-16")]
    InvalidUtf16,
}
