//! Field validators shared by [`Product`](super::Product) and
//! [`Client`](super::Client).
//!
//! Every validator is pure and reports the first problem it finds for its
//! field. Entity constructors call them in a fixed order: id, then text
//! fields, then the numeric or domain-specific field.

use rust_decimal::Decimal;

use super::error::ValidationError;

/// Length of a Polish tax identifier (NIP).
pub const NIP_LENGTH: usize = 10;

/// Ids are assigned by the collections and start at 1.
pub fn validate_id(id: u32) -> Result<u32, ValidationError> {
    if id == 0 {
        return Err(ValidationError::new("id", "id must be a positive integer"));
    }
    Ok(id)
}

/// Returns the trimmed value, or an error if nothing is left after trimming.
pub fn validate_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Prices must be strictly positive.
pub fn validate_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::new(
            "price",
            format!("price must be greater than zero, got {price}"),
        ));
    }
    Ok(price)
}

/// Validate a NIP: exactly ten ASCII digits, no separators, no country prefix.
///
/// Surrounding whitespace is ignored. The identifier is kept as text so
/// leading zeros survive.
pub fn validate_nip(nip: &str) -> Result<String, ValidationError> {
    let nip = nip.trim();
    if nip.len() != NIP_LENGTH {
        return Err(ValidationError::new(
            "nip",
            format!(
                "NIP must be exactly {NIP_LENGTH} digits, got {} characters",
                nip.chars().count()
            ),
        ));
    }
    if !nip.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("nip", "NIP must contain only decimal digits"));
    }
    Ok(nip.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_id_rejected() {
        assert_eq!(validate_id(0).unwrap_err().field, "id");
        assert_eq!(validate_id(7).unwrap(), 7);
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(validate_text("name", "  Widget ").unwrap(), "Widget");
        assert!(validate_text("name", " \t ").is_err());
        assert!(validate_text("address", "").is_err());
    }

    #[test]
    fn price_must_be_positive() {
        assert!(validate_price(dec!(0)).is_err());
        assert!(validate_price(dec!(-1.50)).is_err());
        assert_eq!(validate_price(dec!(0.01)).unwrap(), dec!(0.01));
        assert_eq!(validate_price(dec!(20)).unwrap(), dec!(20));
    }

    #[test]
    fn nip_rules() {
        assert_eq!(validate_nip("0123456789").unwrap(), "0123456789");
        assert_eq!(validate_nip(" 5260250274 ").unwrap(), "5260250274");
        assert!(validate_nip("123456789").is_err());
        assert!(validate_nip("12345678901").is_err());
        assert!(validate_nip("PL52602502").is_err());
        assert!(validate_nip("526-025-02").is_err());
        assert!(validate_nip("abcdefghij").is_err());
    }

    #[test]
    fn nip_rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert!(validate_nip("٠١٢٣٤٥٦٧٨٩").is_err());
    }
}
