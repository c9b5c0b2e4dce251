//! Exact full-row deduplication, keeping the first occurrence.

use std::collections::HashSet;

use crate::table::Table;

/// Removes rows that are identical to an earlier row across every column.
/// Duplicate detection is full-row equality, not id-based. Idempotent.
pub fn remove_duplicates(table: Table) -> (Table, usize) {
    let before = table.rows.len();
    let mut seen: HashSet<Vec<crate::data::Cell>> = HashSet::with_capacity(before);
    let mut rows = Vec::with_capacity(before);
    for row in table.rows {
        if seen.insert(row.clone()) {
            rows.push(row);
        }
    }
    let removed = before - rows.len();
    (
        Table {
            headers: table.headers,
            rows,
        },
        removed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;

    fn row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from_raw(v)).collect()
    }

    #[test]
    fn keeps_first_occurrence_and_drops_exact_copies() {
        let table = Table {
            headers: vec!["order_id".into(), "email".into()],
            rows: vec![
                row(&["ORD1", "a@b.com"]),
                row(&["ORD1", "a@b.com"]),
                row(&["ORD1", "other@b.com"]),
            ],
        };
        let (deduped, removed) = remove_duplicates(table);
        assert_eq!(removed, 1);
        assert_eq!(deduped.rows.len(), 2);
        assert_eq!(deduped.rows[0], row(&["ORD1", "a@b.com"]));
    }

    #[test]
    fn duplicate_free_table_passes_through() {
        let table = Table {
            headers: vec!["order_id".into()],
            rows: vec![row(&["ORD1"]), row(&["ORD2"])],
        };
        let (deduped, removed) = remove_duplicates(table.clone());
        assert_eq!(removed, 0);
        assert_eq!(deduped, table);
    }

    #[test]
    fn rows_differing_only_in_missing_cells_are_distinct() {
        let table = Table {
            headers: vec!["order_id".into(), "email".into()],
            rows: vec![row(&["ORD1", "a@b.com"]), row(&["ORD1", ""])],
        };
        let (deduped, removed) = remove_duplicates(table);
        assert_eq!(removed, 0);
        assert_eq!(deduped.rows.len(), 2);
    }
}
