//! Command handlers behind the `katalog` binary.
//!
//! Each handler takes the collections it works on, performs one operation
//! and returns a [`Status`] carrying a printable message. Recoverable
//! failures (bad input, unknown ids) become [`Status::Rejected`]; storage
//! and template failures are returned as errors.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::collections::{Catalog, ClientRegistry, ClientSort, ProductSort};
use crate::core::{KatalogError, Result, ValidationError};

/// Result of a command that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Done(String),
    Rejected(String),
}

impl Status {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Done(m) | Self::Rejected(m) => m,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn recover<T>(result: Result<T>, on_ok: impl FnOnce(T) -> String) -> Result<Status> {
    match result {
        Ok(value) => Ok(Status::Done(on_ok(value))),
        Err(e) if e.is_recoverable() => Ok(Status::Rejected(e.to_string())),
        Err(e) => Err(e),
    }
}

/// Parse a user-typed price; accepts a decimal comma ("9,99").
pub fn parse_price(raw: &str) -> std::result::Result<Decimal, ValidationError> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .map_err(|_| ValidationError::new("price", format!("'{}' is not a number", raw.trim())))
}

pub fn add_product(catalog: &mut Catalog, name: &str, price: &str) -> Result<Status> {
    let price = match parse_price(price) {
        Ok(p) => p,
        Err(e) => return Ok(Status::Rejected(KatalogError::from(e).to_string())),
    };
    recover(catalog.add(name, price), |p| format!("Added {p}"))
}

pub fn remove_product(catalog: &mut Catalog, id: u32) -> Result<Status> {
    Ok(if catalog.remove(id)? {
        Status::Done(format!("Removed product {id}"))
    } else {
        Status::Done(format!("No product with id {id}, nothing removed"))
    })
}

/// List products, optionally sorting first. Sorting only affects memory.
pub fn list_products(catalog: &mut Catalog, sort: Option<ProductSort>) -> Status {
    if let Some(by) = sort {
        catalog.sort(by);
    }
    if catalog.is_empty() {
        return Status::Done("Catalog is empty".into());
    }
    Status::Done(join_lines(catalog.list()))
}

pub fn save_sorted_products(
    catalog: &mut Catalog,
    sort: ProductSort,
    path: &Path,
) -> Result<Status> {
    catalog.sort(sort);
    catalog.save_sorted(path)?;
    Ok(Status::Done(format!(
        "Wrote {} products sorted by {sort:?} to {}",
        catalog.len(),
        path.display()
    )))
}

pub fn add_client(
    clients: &mut ClientRegistry,
    name: &str,
    address: &str,
    nip: &str,
) -> Result<Status> {
    recover(clients.add(name, address, nip), |c| format!("Added {c}"))
}

pub fn remove_client(clients: &mut ClientRegistry, id: u32) -> Result<Status> {
    Ok(if clients.remove(id)? {
        Status::Done(format!("Removed client {id}"))
    } else {
        Status::Done(format!("No client with id {id}, nothing removed"))
    })
}

pub fn list_clients(clients: &mut ClientRegistry, sort: Option<ClientSort>) -> Status {
    if let Some(by) = sort {
        clients.sort(by);
    }
    if clients.is_empty() {
        return Status::Done("No clients registered".into());
    }
    Status::Done(join_lines(clients.list()))
}

#[cfg(feature = "registry")]
pub fn check_status<R: crate::vat::VatRegistry + ?Sized>(
    registry: &R,
    clients: &ClientRegistry,
    id: u32,
    today: chrono::NaiveDate,
) -> Status {
    use crate::vat::VatStatusReport;

    let report = crate::vat::check_vat_status(registry, clients, id, today);
    match report {
        VatStatusReport::ClientNotFound { .. } | VatStatusReport::Connectivity { .. } => {
            Status::Rejected(report.to_string())
        }
        _ => Status::Done(report.to_string()),
    }
}

#[cfg(feature = "invoice")]
pub fn purchase<T: crate::invoice::InvoiceTemplate + ?Sized>(
    catalog: &Catalog,
    clients: &ClientRegistry,
    template: &mut T,
    layout: &crate::core::InvoiceLayout,
    client_id: u32,
    product_ids: &[u32],
) -> Result<Status> {
    recover(
        crate::invoice::purchase(catalog, clients, template, layout, client_id, product_ids),
        |receipt| {
            format!(
                "Invoice issued to {} for {} items, total {}",
                receipt.client.name(),
                receipt.products.len(),
                receipt.total
            )
        },
    )
}

fn join_lines<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LineEncoding;
    use rust_decimal_macros::dec;

    #[test]
    fn price_accepts_decimal_comma() {
        assert_eq!(parse_price("9,99").unwrap(), dec!(9.99));
        assert_eq!(parse_price(" 12 ").unwrap(), dec!(12));
        assert!(parse_price("dużo").is_err());
    }

    #[test]
    fn bad_input_is_rejected_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open_at(dir.path().join("k.txt"), LineEncoding::Quoted).unwrap();
        let status = add_product(&mut catalog, "Widget", "abc").unwrap();
        assert!(!status.is_done());
        let status = add_product(&mut catalog, "Widget", "-3").unwrap();
        assert!(status.message().contains("price"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn list_sorted_by_price() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open_at(dir.path().join("k.txt"), LineEncoding::Quoted).unwrap();
        add_product(&mut catalog, "Drogi", "100").unwrap();
        add_product(&mut catalog, "Tani", "1").unwrap();
        let status = list_products(&mut catalog, Some(ProductSort::Price));
        assert_eq!(
            status.message(),
            "ID: 2, Name: Tani, Price: 1\nID: 1, Name: Drogi, Price: 100"
        );
    }

    #[test]
    fn removing_unknown_client_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut clients = ClientRegistry::open_at(dir.path().join("c.csv")).unwrap();
        let status = remove_client(&mut clients, 9).unwrap();
        assert!(status.is_done());
        assert!(!dir.path().join("c.csv").exists());
    }
}
