// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

/// Result type for yalz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for decompression
///
/// Compression never fails, and running out of input while decoding is not
/// an error either (see [`Decompressor::feed`](crate::Decompressor::feed)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input data is corrupt
    Corrupt,

    /// The declared output length exceeds the configured limit
    TooLarge,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Corrupt => write!(f, "yalz: corrupt input"),
            Error::TooLarge => write!(f, "yalz: declared output length is too large"),
        }
    }
}

impl std::error::Error for Error {}
