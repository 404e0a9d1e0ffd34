//! Parsing helpers for amounts and dates.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fundbook_core::store::DATE_FORMAT;

/// Parse an amount string into a decimal. Positivity is enforced by the
/// core validation, not here.
pub fn parse_amount(value: &str) -> anyhow::Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| anyhow::anyhow!("Invalid amount \"{}\": {}", value.trim(), e))
}

/// Parse a calendar date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("Invalid date \"{}\" (expected YYYY-MM-DD): {}", value.trim(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 500 ").unwrap().to_string(), "500");
        assert_eq!(parse_amount("120.75").unwrap().to_string(), "120.75");
        assert!(parse_amount("lots").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-09-01").is_ok());
        assert!(parse_date("01/09/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}
