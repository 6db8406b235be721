// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::constants::RUN_BIAS;
use crate::error::{Error, Result};
use crate::varint::Uvarint;

/// Where the decoder resumes when the next chunk arrives
#[derive(Debug, Clone)]
enum State {
    /// Waiting for the message header (the declared output length)
    Header,
    /// Waiting for the next packet header
    Packet,
    /// Copying literal bytes from the input
    Literal { remaining: usize },
    /// Reading the long-form run of a back-reference packet
    Backref { msg: u64 },
}

/// Streaming decoder for a single message at a time.
///
/// Input may arrive in arbitrary chunks; the decoder suspends wherever the
/// data runs out and resumes on the next [`feed`](Decompressor::feed). A
/// message's end is detected from the declared output length, and any bytes
/// past it are handed back untouched so concatenated messages (or unrelated
/// trailing data) survive intact.
///
/// # Example
///
/// ```
/// let compressed = yalz::compress(b"to be or not to be or not to be");
///
/// let mut dec = yalz::Decompressor::new();
/// let leftover = dec.feed(&compressed).unwrap().expect("one whole message");
/// assert!(leftover.is_empty());
/// assert_eq!(dec.result(), b"to be or not to be or not to be");
/// ```
pub struct Decompressor {
    state: State,
    varint: Uvarint,
    out: Vec<u8>,
    pos: usize,
    max_len: Option<usize>,
}

impl Decompressor {
    /// Create a decoder with no output length limit
    pub fn new() -> Self {
        Decompressor {
            state: State::Header,
            varint: Uvarint::default(),
            out: Vec::new(),
            pos: 0,
            max_len: None,
        }
    }

    /// Create a decoder that rejects messages declaring more than `limit`
    /// output bytes with [`Error::TooLarge`], before allocating anything.
    /// The header length is otherwise trusted and allocated up front.
    pub fn with_max_output_len(limit: usize) -> Self {
        Decompressor {
            max_len: Some(limit),
            ..Self::new()
        }
    }

    /// Decode as much of `input` as possible.
    ///
    /// Returns `Ok(Some(leftover))` when the current message is complete;
    /// `leftover` is the unconsumed tail of `input` and the decoder is
    /// ready for the next message. Returns `Ok(None)` when `input` was
    /// exhausted mid-message; state is retained and the next call resumes.
    ///
    /// If input runs out before the message header is even complete, the
    /// call reports completion with no output and empty leftover; use
    /// [`in_progress`](Decompressor::in_progress) to tell this "no data
    /// yet" report from a real message boundary. Feeding more bytes
    /// resumes the header.
    ///
    /// On `Err` the message is malformed and the decoder must be discarded.
    pub fn feed<'a>(&mut self, input: &'a [u8]) -> Result<Option<&'a [u8]>> {
        let mut at = 0;

        loop {
            match self.state {
                State::Header => {
                    let declared = match self.varint.read(input, &mut at)? {
                        Some(v) => v,
                        None => return Ok(Some(&input[input.len()..])),
                    };

                    let declared = usize::try_from(declared).map_err(|_| Error::TooLarge)?;
                    if self.max_len.is_some_and(|max| declared > max) {
                        return Err(Error::TooLarge);
                    }

                    self.out = vec![0u8; declared];
                    self.pos = 0;
                    self.state = State::Packet;
                }

                State::Packet => {
                    // The declared length is the only end-of-message marker.
                    if self.pos == self.out.len() {
                        self.state = State::Header;
                        return Ok(Some(&input[at..]));
                    }

                    let msg = match self.varint.read(input, &mut at)? {
                        Some(v) => v,
                        None => return Ok(None),
                    };

                    if msg & 1 == 1 {
                        let len = msg >> 1;
                        if len > (self.out.len() - self.pos) as u64 {
                            return Err(Error::Corrupt);
                        }
                        self.state = State::Literal {
                            remaining: len as usize,
                        };
                    } else {
                        self.state = State::Backref { msg: msg >> 1 };
                    }
                }

                State::Literal { remaining } => {
                    let take = remaining.min(input.len() - at);
                    self.out[self.pos..self.pos + take].copy_from_slice(&input[at..at + take]);
                    self.pos += take;
                    at += take;

                    if take < remaining {
                        self.state = State::Literal {
                            remaining: remaining - take,
                        };
                        return Ok(None);
                    }
                    self.state = State::Packet;
                }

                State::Backref { msg } => {
                    let shortrun = msg & 0xf;
                    let biased = if shortrun != 0 {
                        shortrun
                    } else {
                        match self.varint.read(input, &mut at)? {
                            Some(v) => v,
                            None => return Ok(None),
                        }
                    };

                    let run = biased.saturating_add(RUN_BIAS as u64);
                    let offset = msg >> 4;
                    if offset == 0
                        || offset > self.pos as u64
                        || run > (self.out.len() - self.pos) as u64
                    {
                        return Err(Error::Corrupt);
                    }

                    let run = run as usize;
                    let offset = offset as usize;
                    copy_backref(&mut self.out, self.pos, offset, run);
                    self.pos += run;
                    self.state = State::Packet;
                }
            }
        }
    }

    /// True while a message is partially decoded and more input is expected
    pub fn in_progress(&self) -> bool {
        !matches!(self.state, State::Header) || self.varint.is_partial()
    }

    /// The decoded message. Meaningful only after a `feed` call reported
    /// completion and before the next `feed`.
    pub fn result(&self) -> &[u8] {
        &self.out
    }

    /// Take ownership of the decoded message, leaving the decoder ready
    /// for the next one
    pub fn take_result(&mut self) -> Vec<u8> {
        self.pos = 0;
        std::mem::take(&mut self.out)
    }
}

impl Default for Decompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot decompression of a single complete message.
///
/// The whole of `src` must be exactly one message: truncated input or
/// trailing bytes are corrupt. For chunked or concatenated input use
/// [`Decompressor`] directly.
pub fn decompress(src: &[u8]) -> Result<Vec<u8>> {
    if src.is_empty() {
        return Err(Error::Corrupt);
    }

    let mut dec = Decompressor::new();
    match dec.feed(src)? {
        Some(leftover) if leftover.is_empty() && !dec.in_progress() => Ok(dec.take_result()),
        _ => Err(Error::Corrupt),
    }
}

/// Copy `run` bytes ending at `pos` from `offset` bytes back.
///
/// When the ranges overlap the copy must proceed byte by byte, left to
/// right, so freshly written bytes are re-read and a short seed expands
/// into a repeated pattern.
fn copy_backref(out: &mut [u8], pos: usize, offset: usize, run: usize) {
    let src_start = pos - offset;

    if offset >= run {
        out.copy_within(src_start..src_start + run, pos);
    } else {
        for k in 0..run {
            out[pos + k] = out[src_start + k];
        }
    }
}
