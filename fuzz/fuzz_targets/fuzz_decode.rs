#![no_main]

use libfuzzer_sys::fuzz_target;
use yalz::Decompressor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either decode or error, never panic. The cap
    // keeps a bogus header from demanding a huge allocation.
    let mut dec = Decompressor::with_max_output_len(1 << 22);
    let _ = dec.feed(data);
});
