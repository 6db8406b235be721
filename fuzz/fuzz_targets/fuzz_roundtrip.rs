#![no_main]

use libfuzzer_sys::fuzz_target;
use yalz::{compress, compress_fast, decompress, Encoder};

fuzz_target!(|data: &[u8]| {
    // Skip very large inputs to avoid OOM
    if data.len() > 1_000_000 {
        return;
    }

    let compressed = compress(data);
    let decompressed = decompress(&compressed).expect("default decode failed");
    assert_eq!(data, &decompressed[..], "default roundtrip failed");

    let compressed = compress_fast(data);
    let decompressed = decompress(&compressed).expect("fast decode failed");
    assert_eq!(data, &decompressed[..], "fast roundtrip failed");

    let compressed = Encoder::with_params(4, 4096).compress(data);
    let decompressed = decompress(&compressed).expect("tuned decode failed");
    assert_eq!(data, &decompressed[..], "tuned roundtrip failed");
});
