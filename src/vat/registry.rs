//! Client for the Ministry of Finance VAT payer whitelist ("biała lista").

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::core::KatalogConfig;

/// What the registry knows about a NIP on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryAnswer {
    /// Raw `statusVat` value, e.g. "Czynny", "Zwolniony", "Niezarejestrowany".
    Status(String),
    /// Non-200 response, unknown subject, or a body without `statusVat`.
    NoData,
}

/// The registry could not be reached at all.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Timeout, DNS failure, refused connection, broken body.
    #[error("network error: {0}")]
    Network(String),
    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

/// A source of VAT registration status.
///
/// [`WhitelistClient`] talks to the real service; tests substitute a fake.
pub trait VatRegistry {
    fn lookup(&self, nip: &str, date: NaiveDate) -> Result<RegistryAnswer, RegistryError>;
}

/// Blocking HTTP client for `GET {base}/api/search/nip/{nip}?date=YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct WhitelistClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl WhitelistClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, RegistryError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::Setup(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &KatalogConfig) -> Result<Self, RegistryError> {
        Self::new(
            config.registry_url.as_str(),
            config.registry_timeout(),
            &config.user_agent,
        )
    }

    pub fn request_url(&self, nip: &str, date: NaiveDate) -> String {
        format!(
            "{}/api/search/nip/{nip}?date={}",
            self.base_url,
            date.format("%Y-%m-%d")
        )
    }
}

impl VatRegistry for WhitelistClient {
    fn lookup(&self, nip: &str, date: NaiveDate) -> Result<RegistryAnswer, RegistryError> {
        let url = self.request_url(nip, date);
        tracing::debug!(%url, "querying VAT whitelist");

        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| RegistryError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        Ok(parse_registry_response(status, &body))
    }
}

#[derive(Debug, Deserialize)]
struct WhitelistResponse {
    result: Option<WhitelistResult>,
}

#[derive(Debug, Deserialize)]
struct WhitelistResult {
    subject: Option<Subject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Subject {
    status_vat: Option<String>,
}

/// Interpret a whitelist response. Only a 200 carrying
/// `result.subject.statusVat` yields a status.
pub fn parse_registry_response(status: u16, body: &str) -> RegistryAnswer {
    if status != 200 {
        tracing::debug!(status, "whitelist returned non-200");
        return RegistryAnswer::NoData;
    }
    let parsed: WhitelistResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "whitelist body is not the expected JSON");
            return RegistryAnswer::NoData;
        }
    };
    parsed
        .result
        .and_then(|r| r.subject)
        .and_then(|s| s.status_vat)
        .map_or(RegistryAnswer::NoData, RegistryAnswer::Status)
}
