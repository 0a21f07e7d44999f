//! A random-access handle over a growable in-memory byte buffer.
//!
//! [`BytesHandle`] supports seeking, reading and writing fixed-width primitives in a
//! configurable [`ByteOrder`], length-prefixed UTF-8 strings, UTF-16 character runs, and raw
//! byte ranges. Writes and seeks past the end grow the buffer; reads never look past the
//! logical length.
//!
//! ```
//! use bytes_handle::BytesHandle;
//!
//! let mut h = BytesHandle::with_capacity(16);
//! h.write_i32(42).unwrap();
//! h.write_utf("hi").unwrap();
//! h.seek(0).unwrap();
//! assert_eq!(h.read_i32(), Ok(42));
//! assert_eq!(h.read_utf().as_deref(), Ok("hi"));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod handle;
#[cfg(feature = "std")]
mod io;
mod reader;
mod writer;


pub use handle::{
    ByteOrder, BytesHandle, HandleConfig, HandleError, Result, DEFAULT_INITIAL_CAPACITY,
};
