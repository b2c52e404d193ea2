#![no_main]

use katalog::{Catalog, LineEncoding};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("katalog.txt");
    std::fs::write(&path, data).unwrap();
    // Must not panic. Unreadable files may error, bad rows are skipped.
    for encoding in [LineEncoding::Positional, LineEncoding::Quoted] {
        let _ = Catalog::open_at(&path, encoding);
    }
});
