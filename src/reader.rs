// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Stream reader for decompression

use std::io::{self, Read};

use crate::decode::Decompressor;

/// How much compressed input to pull from the inner reader at a time
const READ_BUF_SIZE: usize = 64 * 1024;

/// Reader decompresses a stream of concatenated messages.
///
/// Messages carry their own length, so no outer framing exists; whatever
/// follows one message is fed to the decoder as the start of the next.
/// The stream must end exactly at a message boundary, otherwise the read
/// fails with [`io::ErrorKind::UnexpectedEof`].
///
/// # Example
///
/// ```
/// use std::io::{Read, Write};
/// use yalz::{Reader, Writer};
///
/// let mut compressed = Vec::new();
/// {
///     let mut writer = Writer::new(&mut compressed);
///     writer.write_all(b"Hello, World!").unwrap();
///     writer.flush().unwrap();
/// }
///
/// let mut reader = Reader::new(&compressed[..]);
/// let mut decompressed = Vec::new();
/// reader.read_to_end(&mut decompressed).unwrap();
///
/// assert_eq!(decompressed, b"Hello, World!");
/// ```
pub struct Reader<R: Read> {
    inner: R,
    dec: Decompressor,
    /// Decoded message currently being served
    out: Vec<u8>,
    out_pos: usize,
    /// Compressed bytes left over from the previous message
    pending: Vec<u8>,
    chunk: Vec<u8>,
    eof: bool,
}

impl<R: Read> Reader<R> {
    /// Create a new Reader over a compressed byte stream
    pub fn new(inner: R) -> Self {
        Reader {
            inner,
            dec: Decompressor::new(),
            out: Vec::new(),
            out_pos: 0,
            pending: Vec::new(),
            chunk: vec![0u8; READ_BUF_SIZE],
            eof: false,
        }
    }

    /// Get a reference to the underlying reader
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the underlying reader
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Decode messages until one is available or the stream ends cleanly.
    /// Returns false at end of stream.
    fn fill(&mut self) -> io::Result<bool> {
        loop {
            let done = if !self.pending.is_empty() {
                let pending = std::mem::take(&mut self.pending);
                self.advance(&pending)?
            } else if self.eof {
                if self.dec.in_progress() {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "truncated compressed stream",
                    ));
                }
                return Ok(false);
            } else {
                let n = self.inner.read(&mut self.chunk)?;
                if n == 0 {
                    self.eof = true;
                    continue;
                }
                let chunk = std::mem::take(&mut self.chunk);
                let done = self.advance(&chunk[..n]);
                self.chunk = chunk;
                done?
            };

            if done {
                return Ok(true);
            }
        }
    }

    /// Feed one buffer to the decoder, stashing the completed message and
    /// any leftover bytes. Returns true when a message completed.
    fn advance(&mut self, input: &[u8]) -> io::Result<bool> {
        match self.dec.feed(input) {
            // A partial header also reports completion; that one carries
            // no message and is recognized by the decoder still being
            // mid-stream.
            Ok(Some(leftover)) if !self.dec.in_progress() => {
                self.pending = leftover.to_vec();
                self.out = self.dec.take_result();
                self.out_pos = 0;
                Ok(true)
            }
            Ok(_) => Ok(false),
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        }
    }
}

impl<R: Read> Read for Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            if self.out_pos < self.out.len() {
                let n = (self.out.len() - self.out_pos).min(buf.len());
                buf[..n].copy_from_slice(&self.out[self.out_pos..self.out_pos + n]);
                self.out_pos += n;
                return Ok(n);
            }

            if !self.fill()? {
                return Ok(0);
            }
        }
    }
}
