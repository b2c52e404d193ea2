#![no_main]

use katalog::{Client, ClientRegistry, FlatFileStore, LineEncoding};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("klienci.csv");
    std::fs::write(&path, data).unwrap();

    let Ok(clients) = ClientRegistry::open_at(&path) else {
        return;
    };
    // Whatever survived a load must survive a save and a second load unchanged.
    let copy = dir.path().join("copy.csv");
    clients.save_sorted(&copy).unwrap();
    let store = FlatFileStore::<Client>::new(&copy, LineEncoding::Quoted);
    let reloaded = store.load().unwrap();
    assert!(reloaded.skipped.is_empty());
    assert_eq!(reloaded.records.as_slice(), clients.list());
});
