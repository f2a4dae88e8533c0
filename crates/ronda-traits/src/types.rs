//! Common types used throughout the Ronda workspace.

use chrono::Datelike;

use crate::{Result, RondaError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker symbol identifier, such as "AAPL" or "MSFT".
pub type Symbol = String;

/// Date format used for parsing and rendering panel indices.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in `YYYY-MM-DD` format.
///
/// # Errors
///
/// Returns [`RondaError::InvalidDate`] when the string does not match [`DATE_FORMAT`].
pub fn parse_date(date_str: &str) -> Result<Date> {
    Date::parse_from_str(date_str.trim(), DATE_FORMAT)
        .map_err(|e| RondaError::InvalidDate(format!("{date_str:?}: {e}")))
}

/// Calendar month key of a date, used to group daily rows into months.
#[must_use]
pub fn year_month(date: Date) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date, Date::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        let result = parse_date("15/01/2024");
        assert!(matches!(result, Err(RondaError::InvalidDate(_))));
    }

    #[test]
    fn test_year_month() {
        let date = Date::from_ymd_opt(2023, 12, 29).unwrap();
        assert_eq!(year_month(date), (2023, 12));
    }

    #[test]
    fn test_symbol_type() {
        let symbol: Symbol = "AAPL".to_string();
        assert_eq!(symbol, "AAPL");
    }
}
