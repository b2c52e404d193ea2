//! # katalog
//!
//! A small shop back office: a product catalog and a client registry kept in
//! flat files, a VAT status check against the Polish VAT payer whitelist,
//! and invoices written into a spreadsheet template.
//!
//! Prices use [`rust_decimal::Decimal`], never floating point. Records are
//! validated on construction, so an invalid [`Product`] or [`Client`]
//! cannot exist.
//!
//! ## Quick Start
//!
//! ```rust
//! use katalog::*;
//! use rust_decimal_macros::dec;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut catalog = Catalog::open_at(dir.path().join("katalog.txt"), LineEncoding::Quoted).unwrap();
//! let widget = catalog.add("Widget", dec!(9.99)).unwrap();
//! let gadget = catalog.add("Gadget", dec!(19.99)).unwrap();
//! assert_eq!((widget.id(), gadget.id()), (1, 2));
//!
//! catalog.remove(1).unwrap();
//! let on_disk = std::fs::read_to_string(catalog.path()).unwrap();
//! assert_eq!(on_disk, "2,Gadget,19.99\n");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Entities, validation, flat-file store, catalog, clients |
//! | `registry` (default) | VAT whitelist lookup |
//! | `invoice` (default) | Spreadsheet invoices and the purchase workflow |
//! | `cli` | The `katalog` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod store;

#[cfg(feature = "core")]
pub mod collections;

#[cfg(feature = "core")]
pub mod commands;

#[cfg(feature = "registry")]
pub mod vat;

#[cfg(feature = "invoice")]
pub mod invoice;

#[cfg(feature = "cli")]
pub mod logging;

// Re-export the everyday types at crate root
#[cfg(feature = "core")]
pub use crate::collections::{Catalog, ClientRegistry, ClientSort, ProductSort};
#[cfg(feature = "core")]
pub use crate::core::*;
#[cfg(feature = "core")]
pub use crate::store::{FlatFileStore, LineEncoding, LoadOutcome, Record};
