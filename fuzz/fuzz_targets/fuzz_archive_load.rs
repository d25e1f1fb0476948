//! Fuzz target for archive loading.
//!
//! Arbitrary bytes must produce either a loaded archive or an error, never a
//! panic. Loaded archives must be closed over their ancestors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zs_archive::{load, LoadLimits};

fuzz_target!(|data: &[u8]| {
    let limits = LoadLimits {
        max_entries: 4096,
        max_total_bytes: 16 * 1024 * 1024,
    };
    if let Ok(loaded) = load(data, &limits) {
        assert!(loaded.contents.directories.is_closed_over(&loaded.contents.files));
    }
});
