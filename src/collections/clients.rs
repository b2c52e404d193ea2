use std::convert::Infallible;
use std::path::Path;
use std::str::FromStr;

use super::Collection;
use crate::core::{Client, KatalogConfig, MalformedRecord, Result};
use crate::store::{FlatFileStore, LineEncoding};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientSort {
    #[default]
    Id,
    Name,
}

impl ClientSort {
    /// Unknown criteria fall back to [`ClientSort::Id`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            _ => Self::Id,
        }
    }
}

impl FromStr for ClientSort {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

/// Registered clients. The backing file always uses the quoted encoding,
/// addresses routinely contain commas.
#[derive(Debug)]
pub struct ClientRegistry {
    inner: Collection<Client>,
}

impl ClientRegistry {
    /// Open the registry at `config.clients_path`.
    pub fn open(config: &KatalogConfig) -> Result<Self> {
        Self::open_at(&config.clients_path)
    }

    /// Open the registry stored at `path`. A missing file is an empty registry.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let store = FlatFileStore::new(path.as_ref(), LineEncoding::Quoted);
        Ok(Self {
            inner: Collection::open(store)?,
        })
    }

    /// Register a client under the next free id and persist the registry.
    pub fn add(&mut self, name: &str, address: &str, nip: &str) -> Result<Client> {
        self.inner.add_with(|id| Client::new(id, name, address, nip))
    }

    /// Remove the client with `id`. Returns `false`, without writing, when
    /// there is no such client.
    pub fn remove(&mut self, id: u32) -> Result<bool> {
        self.inner.remove(id)
    }

    /// Clients in their current in-memory order.
    pub fn list(&self) -> &[Client] {
        &self.inner.items
    }

    pub fn find(&self, id: u32) -> Option<&Client> {
        self.inner.find(id)
    }

    /// Reorder in memory only; the backing file keeps its order until the
    /// next add or remove.
    pub fn sort(&mut self, by: ClientSort) {
        let items = &mut self.inner.items;
        match by {
            ClientSort::Id => items.sort_by_key(|c| c.id()),
            ClientSort::Name => items.sort_by(|a, b| a.name().cmp(b.name())),
        }
    }

    /// Write the current order to `path`, which must not be the backing file.
    pub fn save_sorted(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.save_sorted(path.as_ref())
    }

    pub fn path(&self) -> &Path {
        self.inner.store.path()
    }

    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    /// Rows dropped while loading the backing file.
    pub fn skipped(&self) -> &[MalformedRecord] {
        &self.inner.skipped
    }
}
