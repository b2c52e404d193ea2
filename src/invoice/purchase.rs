use rust_decimal::Decimal;

use super::{InvoiceTemplate, emit_invoice};
use crate::collections::{Catalog, ClientRegistry};
use crate::core::{Client, InvoiceLayout, KatalogError, Product, Result};

/// What was sold to whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub client: Client,
    pub products: Vec<Product>,
    pub total: Decimal,
}

/// Sell `product_ids` to `client_id` and emit the invoice.
///
/// Ids are resolved client first, then products in order; the first miss is
/// returned as `KatalogError::NotFound` before the template is touched. The
/// same product id may appear more than once.
pub fn purchase<T: InvoiceTemplate + ?Sized>(
    catalog: &Catalog,
    clients: &ClientRegistry,
    template: &mut T,
    layout: &InvoiceLayout,
    client_id: u32,
    product_ids: &[u32],
) -> Result<PurchaseReceipt> {
    let client = clients
        .find(client_id)
        .cloned()
        .ok_or(KatalogError::NotFound {
            entity: "client",
            id: client_id,
        })?;

    let products = product_ids
        .iter()
        .map(|&id| {
            catalog
                .find(id)
                .cloned()
                .ok_or(KatalogError::NotFound {
                    entity: "product",
                    id,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    emit_invoice(template, layout, &client, &products)?;

    let total = products.iter().map(Product::price).sum();
    tracing::info!(client_id, items = products.len(), %total, "invoice emitted");
    Ok(PurchaseReceipt {
        client,
        products,
        total,
    })
}
