//! Fuzz target for item list decoding.

#![no_main]

use labelbench::ir::io_json::items_from_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(items) = items_from_slice(data) {
        for item in &items {
            let _ = item.text();
            let _ = item.to_json();
        }
    }
});
