// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Default number of prior positions retained per hash bucket
pub const DEFAULT_SEARCHLEN: usize = 8;

/// Smallest accepted searchlen
pub const MIN_SEARCHLEN: usize = 1;

/// Default hash table modulus (64K)
pub const DEFAULT_BLOCKSIZE: usize = 64 * 1024;

/// Largest useful hash table modulus; prefix hashes are 16-bit,
/// so any larger modulus behaves identically to this one
pub const MAX_BLOCKSIZE: usize = 1 << 16;

/// Shortest match worth emitting as a back-reference
pub const MIN_MATCH: usize = 4;

/// Back-reference lengths are stored with this bias subtracted
pub const RUN_BIAS: usize = 3;

/// Largest biased run that packs into the short back-reference form
pub const SHORT_RUN_MAX: u64 = 15;

/// Bytes hashed per position; positions closer than this to the end
/// of the input always join the pending literal run
pub const PREFIX_LEN: usize = 6;

/// Default uncompressed payload of a single message emitted by `Writer` (1MB)
pub const DEFAULT_MESSAGE_SIZE: usize = 1 << 20;
