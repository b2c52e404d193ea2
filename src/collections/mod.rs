//! In-memory collections kept in lockstep with their backing file.
//!
//! Every mutation rewrites the file before returning. If the write fails the
//! in-memory sequence is rolled back, so memory and disk never disagree.
//! Collections are not synchronized; callers sharing one across threads
//! must wrap it in a mutex.

mod catalog;
mod clients;

use std::path::Path;

pub use catalog::{Catalog, ProductSort};
pub use clients::{ClientRegistry, ClientSort};

use crate::core::{MalformedRecord, Result, ValidationError};
use crate::store::{FlatFileStore, Record};

#[derive(Debug)]
struct Collection<T> {
    store: FlatFileStore<T>,
    items: Vec<T>,
    skipped: Vec<MalformedRecord>,
}

impl<T: Record + Clone> Collection<T> {
    fn open(store: FlatFileStore<T>) -> Result<Self> {
        let outcome = store.load()?;
        Ok(Self {
            store,
            items: outcome.records,
            skipped: outcome.skipped,
        })
    }

    /// 1 for an empty collection, otherwise one past the highest id.
    fn next_id(&self) -> Result<u32, ValidationError> {
        match self.items.iter().map(|r| r.id()).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| ValidationError::new("id", "id space exhausted")),
        }
    }

    fn add_with(&mut self, build: impl FnOnce(u32) -> Result<T, ValidationError>) -> Result<T> {
        let record = build(self.next_id()?)?;
        self.items.push(record.clone());
        if let Err(e) = self.store.save(&self.items) {
            self.items.pop();
            return Err(e);
        }
        tracing::info!(id = record.id(), "added {}", T::ENTITY);
        Ok(record)
    }

    fn remove(&mut self, id: u32) -> Result<bool> {
        if !self.items.iter().any(|r| r.id() == id) {
            tracing::debug!(id, "no {} to remove", T::ENTITY);
            return Ok(false);
        }
        let before = self.items.clone();
        self.items.retain(|r| r.id() != id);
        if let Err(e) = self.store.save(&self.items) {
            self.items = before;
            return Err(e);
        }
        tracing::info!(id, "removed {}", T::ENTITY);
        Ok(true)
    }

    fn find(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    fn save_sorted(&self, path: &Path) -> Result<()> {
        if path == self.store.path() {
            return Err(crate::core::KatalogError::Config(format!(
                "refusing to write a sorted view over the canonical file {}",
                path.display()
            )));
        }
        self.store.save_to(path, &self.items)
    }
}
