//! Cell model and field parsing primitives shared by the cleaning stages.
//!
//! A [`Cell`] is either `Missing` (the single null sentinel used across every
//! column, serialized as an empty CSV field) or `Text` holding the raw or
//! cleaned string value. The parsers here are pure format coercions; validity
//! policy (sign checks, zero handling) lives with the stage that applies it.

use std::fmt;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Missing,
    Text(String),
}

impl Cell {
    /// Builds a cell from a raw CSV field. Empty or whitespace-only fields
    /// load as `Missing`; any other content is kept verbatim.
    pub fn from_raw(field: &str) -> Cell {
        if field.trim().is_empty() {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn text(value: impl Into<String>) -> Cell {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Missing => None,
            Cell::Text(value) => Some(value),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Rendering used when writing CSV output: `Missing` becomes the empty
    /// field.
    pub fn render(&self) -> &str {
        self.as_text().unwrap_or("")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Accepted order-date input formats, tried in order. The first format that
/// yields a calendar-valid date wins.
pub const ORDER_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%d-%m-%Y", "%Y-%m-%d", "%b %d, %Y", "%d %B %Y"];

pub fn parse_order_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    for fmt in ORDER_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as order date"))
}

/// Parses a price string after stripping currency symbols and thousands
/// separators. The sign is preserved; callers decide what to do with it.
pub fn parse_price(value: &str) -> Result<Decimal> {
    let stripped: String = value.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    stripped
        .trim()
        .parse::<Decimal>()
        .map_err(|_| anyhow!("Failed to parse '{value}' as price"))
}

/// Coerces numeric text to an integer, tolerating decimal renderings of whole
/// numbers such as `"3.0"`.
pub fn parse_quantity(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(parsed);
    }
    let decimal = trimmed
        .parse::<Decimal>()
        .map_err(|_| anyhow!("Failed to parse '{value}' as quantity"))?;
    if !decimal.fract().is_zero() {
        return Err(anyhow!("Quantity '{value}' is not a whole number"));
    }
    decimal
        .to_i64()
        .ok_or_else(|| anyhow!("Quantity '{value}' is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn from_raw_maps_blank_fields_to_missing() {
        assert_eq!(Cell::from_raw(""), Cell::Missing);
        assert_eq!(Cell::from_raw("   "), Cell::Missing);
        assert_eq!(Cell::from_raw(" x "), Cell::text(" x "));
    }

    #[test]
    fn parse_order_date_supports_all_input_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_order_date("01/15/2024").unwrap(), expected);
        assert_eq!(parse_order_date("15-01-2024").unwrap(), expected);
        assert_eq!(parse_order_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_order_date("Jan 15, 2024").unwrap(), expected);
        assert_eq!(parse_order_date("15 January 2024").unwrap(), expected);
    }

    #[test]
    fn parse_order_date_rejects_impossible_calendar_dates() {
        assert!(parse_order_date("13/45/2024").is_err());
        assert!(parse_order_date("02/30/2024").is_err());
        assert!(parse_order_date("not a date").is_err());
    }

    #[test]
    fn parse_price_strips_currency_formatting() {
        assert_eq!(
            parse_price("$1,234.56").unwrap(),
            Decimal::new(123456, 2)
        );
        assert_eq!(parse_price(" 49.99 ").unwrap(), Decimal::new(4999, 2));
        assert_eq!(parse_price("-10").unwrap(), Decimal::new(-10, 0));
        assert!(parse_price("free").is_err());
    }

    #[test]
    fn parse_quantity_coerces_whole_number_text() {
        assert_eq!(parse_quantity("7").unwrap(), 7);
        assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
        assert_eq!(parse_quantity("3.0").unwrap(), 3);
        assert_eq!(parse_quantity("-5").unwrap(), -5);
        assert!(parse_quantity("3.5").is_err());
        assert!(parse_quantity("many").is_err());
    }
}
