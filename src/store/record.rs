use std::str::FromStr;

use rust_decimal::Decimal;

use crate::core::{Client, Product, ValidationError};

/// An entity that can be stored one-per-line in a flat file.
pub trait Record: Sized {
    /// Lower-case entity name used in logs and errors.
    const ENTITY: &'static str;
    /// Number of columns per line.
    const ARITY: usize;

    fn id(&self) -> u32;

    /// Columns in storage order.
    fn to_fields(&self) -> Vec<String>;

    /// Rebuild an entity from exactly [`Self::ARITY`] columns, re-running
    /// validation.
    fn from_fields(fields: &[&str]) -> Result<Self, ValidationError>;
}

fn parse_id(raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::new("id", format!("'{raw}' is not a positive integer")))
}

/// Accepts plain decimals and the exponent form older files may contain.
fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::new("price", format!("'{raw}' is not a number")))
}

impl Record for Product {
    const ENTITY: &'static str = "product";
    const ARITY: usize = 3;

    fn id(&self) -> u32 {
        Product::id(self)
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_string(),
            self.price().to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ValidationError> {
        let [id, name, price] = fields else {
            return Err(arity_error::<Self>(fields.len()));
        };
        Product::new(parse_id(id)?, name, parse_price(price)?)
    }
}

impl Record for Client {
    const ENTITY: &'static str = "client";
    const ARITY: usize = 4;

    fn id(&self) -> u32 {
        Client::id(self)
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_string(),
            self.address().to_string(),
            self.nip().to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ValidationError> {
        let [id, name, address, nip] = fields else {
            return Err(arity_error::<Self>(fields.len()));
        };
        Client::new(parse_id(id)?, name, address, nip)
    }
}

pub(crate) fn arity_error<T: Record>(found: usize) -> ValidationError {
    ValidationError::new(
        "record",
        format!("expected {} fields, found {found}", T::ARITY),
    )
}
