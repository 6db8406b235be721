// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{compress, compress_fast, decompress, Decompressor, Encoder, Error};

fn roundtrip(data: &[u8]) -> Result<(), String> {
    let original = data.to_vec();

    let encoded = compress(data);
    let decoded = decompress(&encoded).map_err(|e| format!("decode error: {}", e))?;
    if decoded != original {
        return Err(format!(
            "roundtrip mismatch: original len={}, decoded len={}",
            original.len(),
            decoded.len()
        ));
    }

    let encoded_fast = compress_fast(data);
    let decoded_fast = decompress(&encoded_fast).map_err(|e| format!("fast decode error: {}", e))?;
    if decoded_fast != original {
        return Err(format!(
            "fast roundtrip mismatch: original len={}, decoded len={}",
            original.len(),
            decoded_fast.len()
        ));
    }

    let encoded_small = Encoder::with_params(2, 4096).compress(data);
    let decoded_small =
        decompress(&encoded_small).map_err(|e| format!("small decode error: {}", e))?;
    if decoded_small != original {
        return Err(format!(
            "small roundtrip mismatch: original len={}, decoded len={}",
            original.len(),
            decoded_small.len()
        ));
    }

    Ok(())
}

/// Feed a compressed buffer in fixed-size chunks, returning the decoded
/// message and whatever followed it.
fn feed_chunked(compressed: &[u8], chunk_size: usize) -> (Vec<u8>, Vec<u8>) {
    let mut dec = Decompressor::new();
    let mut off = 0;

    while off < compressed.len() {
        let end = (off + chunk_size).min(compressed.len());
        let chunk = &compressed[off..end];
        off = end;

        if let Some(leftover) = dec.feed(chunk).unwrap() {
            // A chunk ending mid-header also reports completion with no
            // output; only a quiescent decoder marks a real boundary.
            if !dec.in_progress() {
                let mut rest = leftover.to_vec();
                rest.extend_from_slice(&compressed[off..]);
                return (dec.take_result(), rest);
            }
        }
    }

    panic!("input ran out before the message completed");
}

#[test]
fn test_empty() {
    assert_eq!(compress(&[]), [0x00]);
    assert_eq!(decompress(&[0x00]).unwrap(), Vec::<u8>::new());
    roundtrip(&[]).unwrap();
}

#[test]
fn test_boundary_sizes() {
    for n in [0, 1, 2, 5, 6, 7, 8, 9] {
        roundtrip(&vec![b'x'; n]).unwrap();

        let distinct: Vec<u8> = (0..n as u8).collect();
        roundtrip(&distinct).unwrap();
    }
}

#[test]
fn test_wire_single_literal() {
    assert_eq!(compress(b"A"), [0x01, 0x03, 0x41]);
}

#[test]
fn test_wire_overlap_backref() {
    // Eight "A"s: one literal seed, then a run of 7 at offset 1 packed
    // into the short form ((1 << 4) | (7 - 3)) << 1.
    assert_eq!(compress(b"AAAAAAAA"), [0x08, 0x03, 0x41, 0x28]);
    assert_eq!(decompress(&[0x08, 0x03, 0x41, 0x28]).unwrap(), b"AAAAAAAA");
}

#[test]
fn test_wire_six_byte_match() {
    // The repeat is found through the 6-byte prefix table; run 6 offset 6
    // packs into the short form ((6 << 4) | 3) << 1 = 0xc6, two VLQ bytes.
    let expected = [
        0x0c, 0x0d, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0xc6, 0x01,
    ];
    assert_eq!(compress(b"ABCDEFABCDEF"), expected);
    assert_eq!(decompress(&expected).unwrap(), b"ABCDEFABCDEF");
}

#[test]
fn test_wire_long_backref() {
    // 64K of zeros: multi-byte header, literal seed, one long-form
    // back-reference of run 65535 at offset 1.
    let data = vec![0u8; 65536];
    let compressed = compress(&data);
    assert_eq!(
        compressed,
        [0x80, 0x80, 0x04, 0x03, 0x00, 0x20, 0xfc, 0xff, 0x03]
    );
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn test_repeated_byte_ratio() {
    let data = vec![b'a'; 1000];
    let compressed = compress(&data);
    assert!(compressed.len() < 100, "got {} bytes", compressed.len());
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn test_incompressible_overhead() {
    // LCG noise; framing overhead stays within a few bytes of the input.
    let mut state = 0x2545f4914f6cdd1du64;
    let mut lcg_next = || -> u8 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 32) as u8
    };

    let data: Vec<u8> = (0..1000).map(|_| lcg_next()).collect();
    let compressed = compress(&data);
    assert!(compressed.len() <= data.len() + 16);
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn test_small_rand() {
    let mut state = 1u64;
    let mut lcg_next = || -> u8 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 32) as u8
    };

    let mut n = 1;
    while n < 8000 {
        let b: Vec<u8> = (0..n).map(|_| lcg_next()).collect();
        roundtrip(&b).unwrap();
        n += 97;
    }
}

#[test]
fn test_small_regular() {
    let mut n = 1;
    while n < 8000 {
        let b: Vec<u8> = (0..n).map(|i| (i % 10) as u8 + b'a').collect();
        roundtrip(&b).unwrap();
        n += 97;
    }
}

#[test]
fn test_small_repeat() {
    let mut n = 1;
    while n < 8000 {
        roundtrip(&vec![b'a'; n]).unwrap();
        n += 97;
    }
}

#[test]
fn test_chunked_feeding() {
    let data = b"she sells sea shells by the sea shore, she sells sea shells".to_vec();
    let compressed = compress(&data);

    for chunk_size in [1, 2, 3, 5, 7, 16, compressed.len()] {
        let (decoded, rest) = feed_chunked(&compressed, chunk_size);
        assert_eq!(decoded, data, "chunk size {}", chunk_size);
        assert!(rest.is_empty(), "chunk size {}", chunk_size);
    }
}

#[test]
fn test_chunked_feeding_multibyte_header() {
    // A message longer than 127 bytes has a multi-byte header, so tiny
    // chunks exercise the resumable header path too.
    let data: Vec<u8> = (0..5000u32).map(|i| (i % 200) as u8).collect();
    let compressed = compress(&data);

    for chunk_size in [1, 2, 64] {
        let (decoded, rest) = feed_chunked(&compressed, chunk_size);
        assert_eq!(decoded, data, "chunk size {}", chunk_size);
        assert!(rest.is_empty(), "chunk size {}", chunk_size);
    }
}

#[test]
fn test_leftover_after_message() {
    let mut stream = compress(b"payload bytes");
    stream.extend_from_slice(&[0xff, 0xff]);

    let mut dec = Decompressor::new();
    let leftover = dec.feed(&stream).unwrap().expect("complete");
    assert_eq!(leftover, [0xff, 0xff]);
    assert_eq!(dec.take_result(), b"payload bytes");
}

#[test]
fn test_concatenated_messages() {
    let first = b"first message body".to_vec();
    let second = b"second message, somewhat longer than the first one".repeat(3);

    let mut stream = compress(&first);
    stream.extend(compress(&second));

    let mut dec = Decompressor::new();
    let leftover = dec.feed(&stream).unwrap().expect("first complete");
    assert_eq!(dec.take_result(), first);

    let leftover = leftover.to_vec();
    let tail = dec.feed(&leftover).unwrap().expect("second complete");
    assert!(tail.is_empty());
    assert_eq!(dec.take_result(), second);
}

#[test]
fn test_every_byte_consumed() {
    // A single message decodes with nothing left over.
    let data = b"exhaustively consumed".to_vec();
    let compressed = compress(&data);
    let (decoded, rest) = feed_chunked(&compressed, compressed.len());
    assert_eq!(decoded, data);
    assert!(rest.is_empty());
}

#[test]
fn test_tuning_never_changes_output() {
    let data = b"abcabcabcabc the same input under every tuning abcabcabc".repeat(20);

    for searchlen in [1, 2, 8, 32] {
        for blocksize in [1, 512, 4096, 65536] {
            let compressed = Encoder::with_params(searchlen, blocksize).compress(&data);
            assert_eq!(
                decompress(&compressed).unwrap(),
                data,
                "searchlen={} blocksize={}",
                searchlen,
                blocksize
            );
        }
    }
}

#[test]
fn test_decompress_rejects_truncated() {
    let compressed = compress(&b"long enough to not fit one chunk".repeat(4));
    assert_eq!(
        decompress(&compressed[..compressed.len() - 3]),
        Err(Error::Corrupt)
    );
}

#[test]
fn test_decompress_rejects_trailing_bytes() {
    let mut compressed = compress(b"message");
    compressed.push(0x00);
    assert_eq!(decompress(&compressed), Err(Error::Corrupt));
}

#[test]
fn test_decompress_rejects_empty_input() {
    assert_eq!(decompress(&[]), Err(Error::Corrupt));
}

#[test]
fn test_result_borrow_after_completion() {
    let compressed = compress(b"peek without taking");
    let mut dec = Decompressor::new();
    dec.feed(&compressed).unwrap().expect("complete");
    assert_eq!(dec.result(), b"peek without taking");
}
