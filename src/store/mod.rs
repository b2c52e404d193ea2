//! Flat-file persistence: one entity type per file, one record per line.
//!
//! Loading never fails on bad rows. Rows with the wrong column count, values
//! that do not pass validation, or an id already taken by an earlier row are
//! skipped, logged with their line number, and returned in
//! [`LoadOutcome::skipped`]. A missing file is an empty collection.
//!
//! Saving always rewrites the whole file. The new content goes to a sibling
//! temp file first and is then renamed over the target.

mod encoding;
mod record;

use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub use encoding::LineEncoding;
pub use record::Record;

use crate::core::{KatalogError, MalformedRecord, Result};

/// Records read from a file plus the rows that had to be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome<T> {
    pub records: Vec<T>,
    pub skipped: Vec<MalformedRecord>,
}

/// A file holding records of type `T`.
#[derive(Debug, Clone)]
pub struct FlatFileStore<T> {
    path: PathBuf,
    encoding: LineEncoding,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> FlatFileStore<T> {
    /// A store for `path`. Nothing is read or created until the first
    /// load or save.
    pub fn new(path: impl Into<PathBuf>, encoding: LineEncoding) -> Self {
        Self {
            path: path.into(),
            encoding,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> LineEncoding {
        self.encoding
    }

    /// Read all records in file order.
    pub fn load(&self) -> Result<LoadOutcome<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "{} file absent, starting empty",
                    T::ENTITY
                );
                return Ok(LoadOutcome {
                    records: Vec::new(),
                    skipped: Vec::new(),
                });
            }
            Err(e) => return Err(KatalogError::io(&self.path, e)),
        };

        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut first_seen: HashMap<u32, usize> = HashMap::new();
        for row in self.encoding.decode::<T>(&self.path, &bytes)? {
            let row = row.and_then(|(line, record)| {
                if let Some(first) = first_seen.get(&record.id()) {
                    return Err(MalformedRecord {
                        line,
                        reason: format!("id {} already used on line {first}", record.id()),
                    });
                }
                first_seen.insert(record.id(), line);
                Ok(record)
            });
            match row {
                Ok(record) => records.push(record),
                Err(bad) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = bad.line,
                        reason = %bad.reason,
                        "skipping malformed {} row",
                        T::ENTITY
                    );
                    skipped.push(bad);
                }
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            loaded = records.len(),
            skipped = skipped.len(),
            "loaded {} file",
            T::ENTITY
        );
        Ok(LoadOutcome { records, skipped })
    }

    /// Replace the file content with `records`, in order.
    pub fn save(&self, records: &[T]) -> Result<()> {
        self.save_to(&self.path, records)
    }

    /// Write `records` to an arbitrary path using this store's encoding.
    pub fn save_to(&self, path: &Path, records: &[T]) -> Result<()> {
        let bytes = self.encoding.encode(path, records)?;
        write_replace(path, &bytes)?;
        tracing::debug!(path = %path.display(), count = records.len(), "saved {} file", T::ENTITY);
        Ok(())
    }
}

fn write_replace(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KatalogError::io(parent, e))?;
    }
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, bytes).map_err(|e| KatalogError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        KatalogError::io(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Product;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: FlatFileStore<Product> =
            FlatFileStore::new(dir.path().join("none.txt"), LineEncoding::Quoted);
        let outcome = store.load().unwrap();
        assert!(outcome.records.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn save_creates_parent_dirs_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/katalog.txt");
        let store = FlatFileStore::new(&path, LineEncoding::Positional);
        store
            .save(&[Product::new(1, "Widget", dec!(9.99)).unwrap()])
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,Widget,9.99\n");
        assert!(!dir.path().join("nested/katalog.txt.tmp").exists());
    }

    #[test]
    fn save_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("katalog.txt");
        let store = FlatFileStore::new(&path, LineEncoding::Quoted);
        let a = Product::new(1, "A", dec!(1)).unwrap();
        let b = Product::new(2, "B", dec!(2)).unwrap();
        store.save(&[a.clone(), b]).unwrap();
        store.save(&[a]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,A,1\n");
    }

    #[test]
    fn skipped_rows_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("katalog.txt");
        fs::write(&path, "1,Widget,9.99\n2,,5\n3,Gadget\n").unwrap();
        let store: FlatFileStore<Product> = FlatFileStore::new(&path, LineEncoding::Positional);
        let outcome = store.load().unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.skipped.iter().map(|s| s.line).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert!(outcome.skipped[0].reason.starts_with("name:"));
    }

    #[test]
    fn repeated_id_keeps_the_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("katalog.txt");
        fs::write(&path, "1,A,1\n2,B,2\n1,C,3\n").unwrap();
        let store: FlatFileStore<Product> = FlatFileStore::new(&path, LineEncoding::Quoted);
        let outcome = store.load().unwrap();
        assert_eq!(
            outcome.records.iter().map(|p| p.name()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].line, 3);
        assert_eq!(outcome.skipped[0].reason, "id 1 already used on line 1");
    }
}
