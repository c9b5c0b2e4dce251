//! Price normalization and quantity validation.

use rust_decimal::Decimal;

use crate::{
    clean::FieldTally,
    data::{Cell, parse_price, parse_quantity},
    table::Table,
};

/// Strips currency formatting and re-emits the price as a plain decimal
/// rounded to two places. Negative or unparseable values become `Missing`;
/// zero is an allowed price.
pub fn normalize_prices(mut table: Table, column: usize) -> (Table, FieldTally) {
    let mut tally = FieldTally::default();
    for row in &mut table.rows {
        if let Cell::Text(value) = &row[column] {
            match parse_price(value) {
                Ok(price) if price >= Decimal::ZERO => {
                    row[column] = Cell::text(price.round_dp(2).to_string());
                    tally.valid += 1;
                }
                _ => {
                    row[column] = Cell::Missing;
                    tally.invalid += 1;
                }
            }
        }
    }
    (table, tally)
}

/// Coerces quantities to integers. Non-numeric text, zero, and negative
/// values become `Missing`; positive integers pass through.
pub fn validate_quantities(mut table: Table, column: usize) -> (Table, FieldTally) {
    let mut tally = FieldTally::default();
    for row in &mut table.rows {
        if let Cell::Text(value) = &row[column] {
            match parse_quantity(value) {
                Ok(quantity) if quantity > 0 => {
                    row[column] = Cell::text(quantity.to_string());
                    tally.valid += 1;
                }
                _ => {
                    row[column] = Cell::Missing;
                    tally.invalid += 1;
                }
            }
        }
    }
    (table, tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_column_table(header: &str, values: &[&str]) -> Table {
        Table {
            headers: vec![header.into()],
            rows: values.iter().map(|v| vec![Cell::from_raw(v)]).collect(),
        }
    }

    #[test]
    fn prices_lose_currency_symbols_and_separators() {
        let table = one_column_table("price", &["$49.99", "$1,234.56", "19.5", "0"]);
        let (cleaned, tally) = normalize_prices(table, 0);
        assert_eq!(tally.valid, 4);
        assert_eq!(cleaned.rows[0][0], Cell::text("49.99"));
        assert_eq!(cleaned.rows[1][0], Cell::text("1234.56"));
        assert_eq!(cleaned.rows[2][0], Cell::text("19.5"));
        assert_eq!(cleaned.rows[3][0], Cell::text("0"));
    }

    #[test]
    fn negative_and_unparseable_prices_become_missing() {
        let table = one_column_table("price", &["-10", "$-5.00", "free"]);
        let (cleaned, tally) = normalize_prices(table, 0);
        assert_eq!(tally.invalid, 3);
        assert!(cleaned.rows.iter().all(|row| row[0].is_missing()));
    }

    #[test]
    fn quantities_accept_positive_integers_only() {
        let table = one_column_table("quantity", &["7", "3.0", "-5", "0", "many", ""]);
        let (cleaned, tally) = validate_quantities(table, 0);
        assert_eq!(tally.valid, 2);
        assert_eq!(tally.invalid, 3);
        assert_eq!(cleaned.rows[0][0], Cell::text("7"));
        assert_eq!(cleaned.rows[1][0], Cell::text("3"));
        assert!(cleaned.rows[2][0].is_missing());
        assert!(cleaned.rows[3][0].is_missing());
        assert!(cleaned.rows[4][0].is_missing());
        assert!(cleaned.rows[5][0].is_missing());
    }
}
