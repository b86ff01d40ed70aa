//! Fuzz target for internalCSV parsing.
//!
//! Feeds arbitrary bytes to the CSV reader, checking for panics, crashes,
//! or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use markupconv::ir::io_internal_csv::from_internal_csv_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_internal_csv_slice(data);
});
