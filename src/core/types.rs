use std::fmt;

use rust_decimal::Decimal;

use super::error::ValidationError;
use super::validation::{validate_id, validate_nip, validate_price, validate_text};

/// A catalog entry. Only constructible through [`Product::new`], so every
/// value in circulation has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: u32,
    name: String,
    price: Decimal,
}

impl Product {
    /// Validate and build a product. Checks run id, name, price; the first
    /// failure is returned.
    pub fn new(id: u32, name: &str, price: Decimal) -> Result<Self, ValidationError> {
        let id = validate_id(id)?;
        let name = validate_text("name", name)?;
        let price = validate_price(price)?;
        Ok(Self { id, name, price })
    }

    /// Catalog-assigned id, unique within one catalog.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Trimmed, never empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price, always greater than zero.
    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}, Name: {}, Price: {}", self.id, self.name, self.price)
    }
}

/// A registered client with a Polish tax identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: u32,
    name: String,
    address: String,
    nip: String,
}

impl Client {
    /// Validate and build a client. Checks run id, name, address, nip.
    pub fn new(id: u32, name: &str, address: &str, nip: &str) -> Result<Self, ValidationError> {
        let id = validate_id(id)?;
        let name = validate_text("name", name)?;
        let address = validate_text("address", address)?;
        let nip = validate_nip(nip)?;
        Ok(Self {
            id,
            name,
            address,
            nip,
        })
    }

    /// Registry-assigned id, unique within one registry.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form postal address; may contain commas.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Ten digits, leading zeros preserved.
    pub fn nip(&self) -> &str {
        &self.nip
    }

    /// The identity line printed on invoices: `name, address, NIP: nip`.
    pub fn identity(&self) -> String {
        format!("{}, {}, NIP: {}", self.name, self.address, self.nip)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Address: {}, NIP: {}",
            self.id, self.name, self.address, self.nip
        )
    }
}
