//! VAT registration status lookup against the Polish VAT payer whitelist.
//!
//! # Example
//!
//! ```no_run
//! use katalog::vat::*;
//! use katalog::{ClientRegistry, KatalogConfig};
//!
//! let config = KatalogConfig::default();
//! let clients = ClientRegistry::open(&config)?;
//! let registry = WhitelistClient::from_config(&config)?;
//! println!("{}", check_vat_status_today(&registry, &clients, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod registry;
mod status;

pub use registry::{
    RegistryAnswer, RegistryError, VatRegistry, WhitelistClient, parse_registry_response,
};
pub use status::{
    ACTIVE_STATUS, VatStatusReport, check_vat_status, check_vat_status_today, reference_date,
};
