//! Runtime configuration: file locations, registry endpoint and invoice layout.
//!
//! Every field has a default, so an empty or missing `katalog.toml` is valid.
//!
//! ```toml
//! products_path = "dane/katalog.txt"
//! product_encoding = "positional"
//! registry_timeout_secs = 5
//!
//! [invoice]
//! template_path = "szablony/faktura.xlsx"
//! line_items = 2
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{KatalogError, Result};
use crate::store::LineEncoding;

/// Base URL of the Ministry of Finance VAT payer whitelist.
pub const DEFAULT_REGISTRY_URL: &str = "https://wl-api.mf.gov.pl";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KatalogConfig {
    /// Canonical product file.
    pub products_path: PathBuf,
    /// Canonical client file.
    pub clients_path: PathBuf,
    /// Where `save_sorted` writes a sorted view of the catalog. Never read back.
    pub sorted_products_path: PathBuf,
    /// Line encoding of the product file. Clients are always quoted.
    pub product_encoding: LineEncoding,
    /// VAT whitelist base URL, without trailing slash.
    pub registry_url: String,
    /// Request timeout for the whitelist call.
    pub registry_timeout_secs: u64,
    /// The whitelist rejects requests without a browser-like user agent.
    pub user_agent: String,
    pub invoice: InvoiceLayout,
}

impl Default for KatalogConfig {
    fn default() -> Self {
        Self {
            products_path: PathBuf::from("katalog.txt"),
            clients_path: PathBuf::from("klienci.csv"),
            sorted_products_path: PathBuf::from("katalog_posortowany.txt"),
            product_encoding: LineEncoding::Quoted,
            registry_url: DEFAULT_REGISTRY_URL.into(),
            registry_timeout_secs: 10,
            user_agent: "Mozilla/5.0".into(),
            invoice: InvoiceLayout::default(),
        }
    }
}

impl KatalogConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| KatalogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(KatalogError::io(path, e)),
        }
    }

    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry_timeout_secs)
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        if self.registry_timeout_secs == 0 {
            return Err(KatalogError::Config(
                "registry_timeout_secs must be at least 1".into(),
            ));
        }
        if self.products_path == self.sorted_products_path {
            return Err(KatalogError::Config(
                "sorted_products_path must differ from products_path".into(),
            ));
        }
        self.invoice.validate()
    }
}

/// Builder for [`KatalogConfig`].
///
/// ```
/// use katalog::KatalogConfigBuilder;
///
/// let config = KatalogConfigBuilder::new("dane")
///     .registry_timeout_secs(3)
///     .build();
/// assert!(config.products_path.ends_with("katalog.txt"));
/// ```
pub struct KatalogConfigBuilder {
    config: KatalogConfig,
}

impl KatalogConfigBuilder {
    /// Start from the defaults with every data file placed under `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        let defaults = KatalogConfig::default();
        Self {
            config: KatalogConfig {
                products_path: dir.join(&defaults.products_path),
                clients_path: dir.join(&defaults.clients_path),
                sorted_products_path: dir.join(&defaults.sorted_products_path),
                invoice: InvoiceLayout {
                    template_path: dir.join(&defaults.invoice.template_path),
                    ..defaults.invoice.clone()
                },
                ..defaults
            },
        }
    }

    pub fn product_encoding(mut self, encoding: LineEncoding) -> Self {
        self.config.product_encoding = encoding;
        self
    }

    pub fn registry_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry_url = url.into();
        self
    }

    pub fn registry_timeout_secs(mut self, secs: u64) -> Self {
        self.config.registry_timeout_secs = secs;
        self
    }

    pub fn invoice(mut self, layout: InvoiceLayout) -> Self {
        self.config.invoice = layout;
        self
    }

    pub fn build(self) -> KatalogConfig {
        self.config
    }
}

/// Fixed cell coordinates of the invoice template.
///
/// The client identity goes into `client_cell`; line item `i` goes into
/// `{name_column}{first_item_row + i}` and `{price_column}{first_item_row + i}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceLayout {
    pub template_path: PathBuf,
    pub client_cell: String,
    pub first_item_row: u32,
    pub name_column: String,
    pub price_column: String,
    /// Exact number of products an invoice carries.
    pub line_items: usize,
}

impl Default for InvoiceLayout {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("faktura.xlsx"),
            client_cell: "B7".into(),
            first_item_row: 11,
            name_column: "B".into(),
            price_column: "C".into(),
            line_items: 2,
        }
    }
}

impl InvoiceLayout {
    pub fn validate(&self) -> Result<()> {
        if parse_cell_ref(&self.client_cell).is_none() {
            return Err(KatalogError::Config(format!(
                "invalid client cell '{}'",
                self.client_cell
            )));
        }
        for (label, col) in [("name", &self.name_column), ("price", &self.price_column)] {
            if !is_column(col) {
                return Err(KatalogError::Config(format!(
                    "invalid {label} column '{col}'"
                )));
            }
        }
        if self.first_item_row == 0 {
            return Err(KatalogError::Config("first_item_row must be at least 1".into()));
        }
        if self.line_items == 0 {
            return Err(KatalogError::Config("line_items must be at least 1".into()));
        }
        let last_row = u64::from(self.first_item_row) + self.line_items as u64 - 1;
        if last_row > u64::from(MAX_ROW) {
            return Err(KatalogError::Config(format!("line items would run past row {MAX_ROW}")));
        }
        Ok(())
    }

    /// Cell reference for a column on line item `index`.
    pub fn item_cell(&self, column: &str, index: usize) -> String {
        format!("{column}{}", self.first_item_row as usize + index)
    }
}

/// Last row of an `.xlsx` worksheet.
pub const MAX_ROW: u32 = 1_048_576;
/// Last column of an `.xlsx` worksheet (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

fn is_column(s: &str) -> bool {
    column_number(s).is_some()
}

/// `A` is 1, `Z` is 26, `AA` is 27.
fn column_number(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 3 || !s.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let n = s.bytes().fold(0u32, |acc, b| acc * 26 + u32::from(b - b'A' + 1));
    (n <= MAX_COLUMN).then_some(n)
}

/// Split an A1-style reference into column letters and a 1-based row.
///
/// Returns `None` for anything outside the `A1:XFD1048576` sheet range.
pub fn parse_cell_ref(cell: &str) -> Option<(&str, u32)> {
    let split = cell.find(|c: char| c.is_ascii_digit())?;
    let (col, row) = cell.split_at(split);
    if !is_column(col) || !row.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let row: u32 = row.parse().ok()?;
    (1..=MAX_ROW).contains(&row).then_some((col, row))
}
