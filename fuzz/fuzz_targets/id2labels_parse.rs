//! Fuzz target for id→labels decoding and inversion.
//!
//! Feeds arbitrary bytes through decoding, inversion and ranking,
//! checking for panics, crashes, or hangs.

#![no_main]

use labelbench::aggregate::fuzz_invert_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_invert_slice(data);
});
