//! Property-based tests for id assignment, persistence and sorting.

#![cfg(feature = "core")]

use katalog::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Positive prices with two decimal places, 0.01 ..= 10000.00.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Printable names; commas included to exercise the quoted encoding.
fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-zĄąĘęŁłŚś0-9 ,.\"-]{1,24}".prop_filter("needs a visible character", |s| {
        !s.trim().is_empty()
    })
}

#[derive(Debug, Clone)]
enum Op {
    Add(String, Decimal),
    Remove(u32),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (arb_name(), arb_price()).prop_map(|(n, p)| Op::Add(n, p)),
            1 => (1u32..12).prop_map(Op::Remove),
        ],
        1..30,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Consecutive adds yield unique, positive, strictly increasing ids.
    #[test]
    fn add_ids_strictly_increase(items in prop::collection::vec((arb_name(), arb_price()), 1..20)) {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open_at(dir.path().join("k.txt"), LineEncoding::Quoted).unwrap();
        let mut last = 0u32;
        for (name, price) in &items {
            let id = catalog.add(name, *price).unwrap().id();
            prop_assert!(id > last);
            last = id;
        }
        prop_assert_eq!(last as usize, items.len());
    }

    /// After any mix of adds and removes, reopening the file reproduces the
    /// in-memory catalog and ids stay unique.
    #[test]
    fn reopen_matches_memory(ops in arb_ops()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k.txt");
        let mut catalog = Catalog::open_at(&path, LineEncoding::Quoted).unwrap();
        for op in ops {
            match op {
                Op::Add(name, price) => { catalog.add(&name, price).unwrap(); }
                Op::Remove(id) => { catalog.remove(id).unwrap(); }
            }
        }

        let mut ids: Vec<u32> = catalog.list().iter().map(|p| p.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), catalog.len());

        let reopened = Catalog::open_at(&path, LineEncoding::Quoted).unwrap();
        prop_assert_eq!(reopened.list(), catalog.list());
        prop_assert!(reopened.skipped().is_empty());
    }

    /// Sorting by price twice changes nothing; sorting by id restores
    /// ascending id order regardless of what came before.
    #[test]
    fn sort_properties(items in prop::collection::vec((arb_name(), arb_price()), 1..20)) {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open_at(dir.path().join("k.txt"), LineEncoding::Quoted).unwrap();
        for (name, price) in &items {
            catalog.add(name, *price).unwrap();
        }

        catalog.sort(ProductSort::Price);
        let once = catalog.list().to_vec();
        catalog.sort(ProductSort::Price);
        prop_assert_eq!(catalog.list(), once.as_slice());
        prop_assert!(once.windows(2).all(|w| w[0].price() <= w[1].price()));

        catalog.sort(ProductSort::Name);
        catalog.sort(ProductSort::Id);
        let ids: Vec<u32> = catalog.list().iter().map(|p| p.id()).collect();
        prop_assert_eq!(ids, (1..=items.len() as u32).collect::<Vec<_>>());
    }

    /// Exactly ten ASCII digits is the only accepted NIP shape.
    #[test]
    fn nip_shape(nip in "[0-9]{1,12}") {
        let result = Client::new(1, "Anna", "Gdańsk", &nip);
        prop_assert_eq!(result.is_ok(), nip.len() == 10);
    }
}
