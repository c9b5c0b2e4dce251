//! Email validation and phone standardization.

use std::sync::LazyLock;

use regex::Regex;

use crate::{clean::FieldTally, data::Cell, table::Table};

/// Local part, `@`, at least one domain label, and a 2+ character top-level
/// label. Both cases are admitted so validation is case-insensitive without
/// rewriting the value.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

/// Replaces values that do not match the email shape with `Missing`. The row
/// itself is never dropped; case of valid addresses is preserved.
pub fn validate_emails(mut table: Table, column: usize) -> (Table, FieldTally) {
    let mut tally = FieldTally::default();
    for row in &mut table.rows {
        if let Cell::Text(value) = &row[column] {
            if EMAIL_SHAPE.is_match(value) {
                tally.valid += 1;
            } else {
                row[column] = Cell::Missing;
                tally.invalid += 1;
            }
        }
    }
    (table, tally)
}

/// Strips everything but digits, then formats as `XXX-XXX-XXXX`. An 11-digit
/// string with a leading `1` loses the country code first. Any other digit
/// count yields `Missing`.
pub fn standardize_phones(mut table: Table, column: usize) -> (Table, FieldTally) {
    let mut tally = FieldTally::default();
    for row in &mut table.rows {
        if let Cell::Text(value) = &row[column] {
            match format_phone(value) {
                Some(formatted) => {
                    row[column] = Cell::text(formatted);
                    tally.valid += 1;
                }
                None => {
                    row[column] = Cell::Missing;
                    tally.invalid += 1;
                }
            }
        }
    }
    (table, tally)
}

fn format_phone(raw: &str) -> Option<String> {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    if digits.len() != 10 {
        return None;
    }
    Some(format!(
        "{}-{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..10]
    ))
}
