use std::fmt;

use chrono::{Days, NaiveDate};

use super::registry::{RegistryAnswer, VatRegistry};
use crate::collections::ClientRegistry;
use crate::core::Client;

/// `statusVat` value of an active VAT payer.
pub const ACTIVE_STATUS: &str = "Czynny";

/// Outcome of a VAT status check. Every variant is a normal result; the
/// check itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VatStatusReport {
    ClientNotFound { id: u32 },
    Active { client: Client, date: NaiveDate },
    Inactive {
        client: Client,
        date: NaiveDate,
        status: String,
    },
    NoData { nip: String, date: NaiveDate },
    Connectivity { error: String },
}

impl VatStatusReport {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

impl fmt::Display for VatStatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientNotFound { id } => write!(f, "client {id} not found"),
            Self::Active { client, date } => write!(
                f,
                "{} (NIP {}) is an active VAT payer as of {date}",
                client.name(),
                client.nip()
            ),
            Self::Inactive {
                client,
                date,
                status,
            } => write!(
                f,
                "{} (NIP {}) is not an active VAT payer as of {date} (status: {status})",
                client.name(),
                client.nip()
            ),
            Self::NoData { nip, date } => {
                write!(f, "no registry data for NIP {nip} on {date}")
            }
            Self::Connectivity { error } => {
                write!(f, "could not reach the VAT registry: {error}")
            }
        }
    }
}

/// The day the registry is queried for. The whitelist settles a day late,
/// so this is always yesterday.
pub fn reference_date(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

/// Look up the VAT status of client `client_id` as of the day before `today`.
///
/// A missing client short-circuits without contacting the registry. Network
/// failures are folded into [`VatStatusReport::Connectivity`].
pub fn check_vat_status<R: VatRegistry + ?Sized>(
    registry: &R,
    clients: &ClientRegistry,
    client_id: u32,
    today: NaiveDate,
) -> VatStatusReport {
    let Some(client) = clients.find(client_id) else {
        return VatStatusReport::ClientNotFound { id: client_id };
    };
    let date = reference_date(today);

    match registry.lookup(client.nip(), date) {
        Ok(RegistryAnswer::Status(status)) if status == ACTIVE_STATUS => VatStatusReport::Active {
            client: client.clone(),
            date,
        },
        Ok(RegistryAnswer::Status(status)) => VatStatusReport::Inactive {
            client: client.clone(),
            date,
            status,
        },
        Ok(RegistryAnswer::NoData) => VatStatusReport::NoData {
            nip: client.nip().to_string(),
            date,
        },
        Err(e) => {
            tracing::warn!(client_id, error = %e, "VAT registry unreachable");
            VatStatusReport::Connectivity {
                error: e.to_string(),
            }
        }
    }
}

/// [`check_vat_status`] against the local calendar date.
pub fn check_vat_status_today<R: VatRegistry + ?Sized>(
    registry: &R,
    clients: &ClientRegistry,
    client_id: u32,
) -> VatStatusReport {
    check_vat_status(registry, clients, client_id, chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_date_is_yesterday() {
        let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(reference_date(d(2024, 3, 1)), d(2024, 2, 29));
        assert_eq!(reference_date(d(2025, 1, 1)), d(2024, 12, 31));
    }

    #[test]
    fn report_messages() {
        let report = VatStatusReport::NoData {
            nip: "0123456789".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        };
        assert_eq!(report.to_string(), "no registry data for NIP 0123456789 on 2024-05-06");
        assert!(!report.is_active());
    }
}
