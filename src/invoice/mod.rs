//! Invoice emission into a fixed-layout spreadsheet template, and the
//! purchase workflow built on it.
//!
//! Cell coordinates come from [`InvoiceLayout`](crate::InvoiceLayout); the
//! defaults match the shop's `faktura.xlsx` (client in `B7`, two line items
//! in `B11:C12`). Invoices are not numbered and no history is kept: each
//! emission overwrites the template file.
//!
//! # Example
//!
//! ```no_run
//! use katalog::invoice::{XlsxTemplate, purchase};
//! use katalog::{Catalog, ClientRegistry, KatalogConfig};
//!
//! let config = KatalogConfig::default();
//! let catalog = Catalog::open(&config)?;
//! let clients = ClientRegistry::open(&config)?;
//! let mut template = XlsxTemplate::new(&config.invoice.template_path);
//! let receipt = purchase(&catalog, &clients, &mut template, &config.invoice, 1, &[3, 7])?;
//! println!("total {}", receipt.total);
//! # Ok::<(), katalog::KatalogError>(())
//! ```

mod layout;
mod purchase;
mod xlsx;

pub use layout::{CellValue, CellWrite, plan_invoice};
pub use purchase::{PurchaseReceipt, purchase};
pub use xlsx::XlsxTemplate;

use crate::core::{Client, InvoiceLayout, Product, Result};

/// A document that accepts cell writes and persists them.
pub trait InvoiceTemplate {
    /// Apply all writes and persist. Missing or unreadable templates are
    /// `KatalogError::Precondition`.
    fn fill(&mut self, writes: &[CellWrite]) -> Result<()>;
}

/// Fill `template` with `client` and exactly `layout.line_items` products.
///
/// The layout is checked first; an invalid one is `KatalogError::Config`
/// and the template is not touched.
pub fn emit_invoice<T: InvoiceTemplate + ?Sized>(
    template: &mut T,
    layout: &InvoiceLayout,
    client: &Client,
    products: &[Product],
) -> Result<()> {
    layout.validate()?;
    let writes = plan_invoice(layout, client, products)?;
    template.fill(&writes)
}
