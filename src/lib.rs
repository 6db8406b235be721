// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! # yalz
//!
//! A byte-oriented LZ77 compression codec with a streaming decoder built
//! for network byte streams: compressed messages are self-delimiting, may
//! arrive in arbitrary chunks, and may be followed by unrelated data that
//! is handed back untouched.
//!
//! ## Block example
//!
//! ```rust
//! use yalz::{compress, decompress};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress(data);
//! let decompressed = decompress(&compressed).expect("decompression failed");
//! assert_eq!(data, &decompressed[..]);
//! ```
//!
//! ## Streaming example
//!
//! ```rust
//! use yalz::{compress, Decompressor};
//!
//! let compressed = compress(b"fed one byte at a time");
//!
//! let mut dec = Decompressor::new();
//! for chunk in compressed.chunks(1) {
//!     dec.feed(chunk).expect("valid data");
//! }
//! assert_eq!(dec.take_result(), b"fed one byte at a time");
//! ```

mod constants;
mod decode;
mod encode;
mod error;
mod reader;
mod varint;
mod writer;

pub use constants::{DEFAULT_BLOCKSIZE, DEFAULT_MESSAGE_SIZE, DEFAULT_SEARCHLEN};
pub use decode::{decompress, Decompressor};
pub use encode::{compress, compress_fast, Encoder};
pub use error::{Error, Result};
pub use reader::Reader;
pub use writer::Writer;

#[cfg(test)]
mod tests;
