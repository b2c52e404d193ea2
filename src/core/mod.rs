//! Core entities, validation, errors and configuration.
//!
//! Nothing in this module touches the filesystem except
//! [`KatalogConfig::load`].

mod config;
mod error;
mod types;
pub mod validation;

pub use config::*;
pub use error::*;
pub use types::*;
