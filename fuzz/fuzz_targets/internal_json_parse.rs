//! Fuzz target for per-image internal markup JSON.

#![no_main]

use libfuzzer_sys::fuzz_target;
use markupconv::ir::io_internal::from_internal_json_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_internal_json_slice(data, "fuzz");
});
