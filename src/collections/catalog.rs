use std::convert::Infallible;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::Collection;
use crate::core::{KatalogConfig, MalformedRecord, Product, Result};
use crate::store::{FlatFileStore, LineEncoding};

/// Sort criteria for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Id,
    Name,
    Price,
}

impl ProductSort {
    /// Unknown criteria fall back to [`ProductSort::Id`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "price" => Self::Price,
            _ => Self::Id,
        }
    }
}

impl FromStr for ProductSort {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

/// The product catalog, backed by one flat file.
#[derive(Debug)]
pub struct Catalog {
    inner: Collection<Product>,
}

impl Catalog {
    /// Open the catalog at the configured path and encoding.
    pub fn open(config: &KatalogConfig) -> Result<Self> {
        Self::open_at(&config.products_path, config.product_encoding)
    }

    /// Open the catalog stored at `path` in `encoding`. A missing file is an
    /// empty catalog; malformed rows end up in [`Catalog::skipped`].
    pub fn open_at(path: impl AsRef<Path>, encoding: LineEncoding) -> Result<Self> {
        let store = FlatFileStore::new(path.as_ref(), encoding);
        Ok(Self {
            inner: Collection::open(store)?,
        })
    }

    /// Add a product under the next free id and persist the catalog.
    ///
    /// # Errors
    ///
    /// `KatalogError::Validation` if the name or price is invalid; nothing is
    /// added in that case.
    pub fn add(&mut self, name: &str, price: Decimal) -> Result<Product> {
        self.inner.add_with(|id| Product::new(id, name, price))
    }

    /// Remove the product with `id`. Returns `false` (and leaves the file
    /// untouched) when there is no such product.
    pub fn remove(&mut self, id: u32) -> Result<bool> {
        self.inner.remove(id)
    }

    /// Products in their current order.
    pub fn list(&self) -> &[Product] {
        &self.inner.items
    }

    /// Look up a product by id.
    pub fn find(&self, id: u32) -> Option<&Product> {
        self.inner.find(id)
    }

    /// Reorder in memory. Does not touch the canonical file.
    pub fn sort(&mut self, by: ProductSort) {
        let items = &mut self.inner.items;
        match by {
            ProductSort::Id => items.sort_by_key(|p| p.id()),
            ProductSort::Name => items.sort_by(|a, b| a.name().cmp(b.name())),
            ProductSort::Price => items.sort_by_key(|p| p.price()),
        }
    }

    /// Write the current order to `path`, which must not be the canonical file.
    pub fn save_sorted(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.save_sorted(path.as_ref())
    }

    /// The canonical backing file.
    pub fn path(&self) -> &Path {
        self.inner.store.path()
    }

    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    /// Rows dropped when the file was loaded.
    pub fn skipped(&self) -> &[MalformedRecord] {
        &self.inner.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lenient_sort_parsing() {
        assert_eq!(ProductSort::parse_lenient("price"), ProductSort::Price);
        assert_eq!(ProductSort::parse_lenient(" Name "), ProductSort::Name);
        assert_eq!(ProductSort::parse_lenient("colour"), ProductSort::Id);
        assert_eq!("".parse::<ProductSort>().unwrap(), ProductSort::Id);
    }

    #[test]
    fn ids_follow_max_not_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open_at(dir.path().join("k.txt"), LineEncoding::Quoted).unwrap();
        catalog.add("A", dec!(1)).unwrap();
        catalog.add("B", dec!(2)).unwrap();
        catalog.add("C", dec!(3)).unwrap();
        assert!(catalog.remove(2).unwrap());
        assert_eq!(catalog.add("D", dec!(4)).unwrap().id(), 4);
        assert!(catalog.remove(4).unwrap());
        // The highest id is gone, so it is handed out again.
        assert_eq!(catalog.add("E", dec!(5)).unwrap().id(), 4);
    }

    #[test]
    fn sort_by_name_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open_at(dir.path().join("k.txt"), LineEncoding::Quoted).unwrap();
        catalog.add("Zeta", dec!(1)).unwrap();
        catalog.add("Alpha", dec!(2)).unwrap();
        catalog.add("Alpha", dec!(3)).unwrap();
        catalog.sort(ProductSort::Name);
        let ids: Vec<u32> = catalog.list().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn save_sorted_refuses_canonical_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k.txt");
        let mut catalog = Catalog::open_at(&path, LineEncoding::Quoted).unwrap();
        catalog.add("A", dec!(1)).unwrap();
        assert!(catalog.save_sorted(&path).is_err());
    }
}
