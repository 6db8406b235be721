// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Stream writer for compression

use std::io::{self, Write};

use crate::constants::DEFAULT_MESSAGE_SIZE;
use crate::encode::Encoder;

/// Writer compresses data into a stream of concatenated messages.
///
/// Written bytes are buffered; each time the buffer reaches the configured
/// message size it is compressed and emitted as one self-delimiting
/// message. `flush` emits whatever is pending, so calling it mid-stream
/// cuts a message short but keeps the stream valid.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use yalz::Writer;
///
/// let mut compressed = Vec::new();
/// {
///     let mut writer = Writer::new(&mut compressed);
///     writer.write_all(b"Hello, World!").unwrap();
///     writer.flush().unwrap();
/// }
///
/// assert!(!compressed.is_empty());
/// ```
pub struct Writer<W: Write> {
    writer: W,
    encoder: Encoder,
    buf: Vec<u8>,
    message_size: usize,
}

impl<W: Write> Writer<W> {
    /// Create a new Writer with the default encoder and message size (1MB)
    pub fn new(writer: W) -> Self {
        Self::with_encoder(writer, Encoder::new(), DEFAULT_MESSAGE_SIZE)
    }

    /// Create a new Writer cutting messages at `message_size` uncompressed
    /// bytes
    pub fn with_message_size(writer: W, message_size: usize) -> Self {
        Self::with_encoder(writer, Encoder::new(), message_size)
    }

    /// Create a new Writer with explicit encoder parameters
    pub fn with_encoder(writer: W, encoder: Encoder, message_size: usize) -> Self {
        Writer {
            writer,
            encoder,
            buf: Vec::new(),
            message_size: message_size.max(1),
        }
    }

    /// Compress and emit the buffered bytes as one message
    fn flush_message(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }

        let compressed = self.encoder.compress(&self.buf);
        self.writer.write_all(&compressed)?;
        self.buf.clear();

        Ok(())
    }

    /// Get a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W: Write> Write for Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut written = 0;

        while written < buf.len() {
            let space = self.message_size - self.buf.len();
            if space == 0 {
                self.flush_message()?;
                continue;
            }

            let take = (buf.len() - written).min(space);
            self.buf.extend_from_slice(&buf[written..written + take]);
            written += take;
        }

        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_message()?;
        self.writer.flush()
    }
}

impl<W: Write> Drop for Writer<W> {
    fn drop(&mut self) {
        // Last-chance flush; errors have nowhere to go here.
        let _ = self.flush();
    }
}
