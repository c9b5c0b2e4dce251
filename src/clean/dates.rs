//! Order-date standardization to `YYYY-MM-DD`.

use chrono::NaiveDate;

use crate::{
    clean::FieldTally,
    data::{Cell, parse_order_date},
    table::Table,
};

/// Parses each raw date against the accepted format list and re-emits it as
/// `YYYY-MM-DD`. Unparseable values, calendar-impossible values, and dates
/// after `today` (an order cannot postdate the extract) become `Missing`.
pub fn standardize_dates(mut table: Table, column: usize, today: NaiveDate) -> (Table, FieldTally) {
    let mut tally = FieldTally::default();
    for row in &mut table.rows {
        if let Cell::Text(value) = &row[column] {
            match parse_order_date(value) {
                Ok(date) if date <= today => {
                    row[column] = Cell::text(date.format("%Y-%m-%d").to_string());
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn date_table(values: &[&str]) -> Table {
        Table {
            headers: vec!["order_date".into()],
            rows: values.iter().map(|v| vec![Cell::from_raw(v)]).collect(),
        }
    }

    #[test]
    fn all_accepted_formats_reemit_as_iso() {
        let table = date_table(&[
            "01/15/2024",
            "15-01-2024",
            "2024-01-15",
            "Jan 15, 2024",
            "15 January 2024",
        ]);
        let (cleaned, tally) = standardize_dates(table, 0, today());
        assert_eq!(tally.valid, 5);
        assert_eq!(tally.invalid, 0);
        for row in &cleaned.rows {
            assert_eq!(row[0], Cell::text("2024-01-15"));
        }
    }

    #[test]
    fn impossible_and_unparseable_dates_become_missing() {
        let table = date_table(&["13/45/2024", "02/30/2024", "soon"]);
        let (cleaned, tally) = standardize_dates(table, 0, today());
        assert_eq!(tally.invalid, 3);
        assert!(cleaned.rows.iter().all(|row| row[0].is_missing()));
    }

    #[test]
    fn future_dates_become_missing() {
        let table = date_table(&["01/15/2026", "2025-06-01"]);
        let (cleaned, tally) = standardize_dates(table, 0, today());
        assert!(cleaned.rows[0][0].is_missing());
        assert_eq!(cleaned.rows[1][0], Cell::text("2025-06-01"));
        assert_eq!(tally.valid, 1);
        assert_eq!(tally.invalid, 1);
    }

    #[test]
    fn missing_dates_are_not_counted_either_way() {
        let table = date_table(&[""]);
        let (_, tally) = standardize_dates(table, 0, today());
        assert_eq!(tally.valid, 0);
        assert_eq!(tally.invalid, 0);
    }
}
