//! Whitespace normalization for free-text columns.

use std::borrow::Cow;

use crate::{data::Cell, table::Table};

/// Trims leading/trailing whitespace and collapses internal runs (spaces and
/// tabs alike) to a single space in the given columns. Missing cells pass
/// through. Returns the table plus the number of cells that changed.
pub fn normalize_whitespace(mut table: Table, columns: &[usize]) -> (Table, usize) {
    let mut changed = 0usize;
    for row in &mut table.rows {
        for &idx in columns {
            let collapsed = match &row[idx] {
                Cell::Text(value) => match collapse_whitespace(value) {
                    Cow::Owned(collapsed) => Some(collapsed),
                    Cow::Borrowed(_) => None,
                },
                Cell::Missing => None,
            };
            if let Some(collapsed) = collapsed {
                row[idx] = Cell::text(collapsed);
                changed += 1;
            }
        }
    }
    (table, changed)
}

fn collapse_whitespace(value: &str) -> Cow<'_, str> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed == value {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(collapsed)
    }
}
