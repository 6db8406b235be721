#![no_main]

use libfuzzer_sys::fuzz_target;
use yalz::{compress, Decompressor};

fuzz_target!(|input: (Vec<u8>, u8)| {
    let (data, chunk_seed) = input;
    if data.len() > 100_000 {
        return;
    }

    let compressed = compress(&data);
    let chunk_size = chunk_seed as usize % 64 + 1;

    // Chunked feeding over any partition must reassemble the input.
    let mut dec = Decompressor::new();
    let mut off = 0;
    while off < compressed.len() {
        let end = (off + chunk_size).min(compressed.len());
        let chunk = &compressed[off..end];
        off = end;

        if let Some(leftover) = dec.feed(chunk).expect("valid stream") {
            if !dec.in_progress() {
                assert!(leftover.is_empty(), "unexpected leftover");
                assert!(off == compressed.len(), "completed early");
                assert_eq!(dec.take_result(), data, "stream roundtrip failed");
                return;
            }
        }
    }

    panic!("message never completed");
});
