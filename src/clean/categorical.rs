//! Category and status standardization through fixed synonym tables.
//!
//! Each raw value is trimmed and case-folded before lookup. The tables are
//! exhaustive for the known variant set; anything unmapped passes through
//! unchanged rather than being invented or fuzzily matched.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::{clean::ConsolidationTally, data::Cell, table::Table};

pub const CANONICAL_CATEGORIES: &[&str] = &["Electronics", "Clothing", "Home & Garden", "Books"];
pub const CANONICAL_STATUSES: &[&str] = &["Pending", "Shipped", "Delivered", "Cancelled"];

static CATEGORY_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("electronics", "Electronics"),
        ("elec", "Electronics"),
        ("clothing", "Clothing"),
        ("clot", "Clothing"),
        ("home & garden", "Home & Garden"),
        ("home and garden", "Home & Garden"),
        ("home", "Home & Garden"),
        ("books", "Books"),
        ("book", "Books"),
    ])
});

static STATUS_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("pending", "Pending"),
        ("pnding", "Pending"),
        ("p", "Pending"),
        ("shipped", "Shipped"),
        ("shippd", "Shipped"),
        ("ship", "Shipped"),
        ("delivered", "Delivered"),
        ("deliverd", "Delivered"),
        ("complete", "Delivered"),
        ("cancelled", "Cancelled"),
        ("canceled", "Cancelled"),
        ("cnclld", "Cancelled"),
    ])
});

pub fn standardize_categories(table: Table, column: usize) -> (Table, ConsolidationTally) {
    standardize(table, column, &CATEGORY_SYNONYMS)
}

pub fn standardize_statuses(table: Table, column: usize) -> (Table, ConsolidationTally) {
    standardize(table, column, &STATUS_SYNONYMS)
}

fn standardize(
    mut table: Table,
    column: usize,
    synonyms: &HashMap<&'static str, &'static str>,
) -> (Table, ConsolidationTally) {
    let mut raw_values: BTreeSet<String> = BTreeSet::new();
    let mut collapsed: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut final_values: BTreeSet<String> = BTreeSet::new();

    for row in &mut table.rows {
        if let Cell::Text(value) = &row[column] {
            raw_values.insert(value.clone());
            let key = value.trim().to_lowercase();
            if let Some(&canonical) = synonyms.get(key.as_str()) {
                collapsed
                    .entry(canonical.to_string())
                    .or_default()
                    .insert(value.clone());
                if value.as_str() != canonical {
                    row[column] = Cell::text(canonical);
                }
                final_values.insert(canonical.to_string());
            } else {
                final_values.insert(value.clone());
            }
        }
    }

    let tally = ConsolidationTally {
        distinct_before: raw_values.len(),
        distinct_after: final_values.len(),
        variants_collapsed: collapsed
            .into_iter()
            .map(|(canonical, raws)| (canonical, raws.len()))
            .collect(),
    };
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
    fn category_variants_collapse_onto_canonical_names() {
        let table = one_column_table(
            "category",
            &["elec", "ELECTRONICS", "Electronics", "home and garden", "Books"],
        );
        let (cleaned, tally) = standardize_categories(table, 0);
        assert_eq!(cleaned.rows[0][0], Cell::text("Electronics"));
        assert_eq!(cleaned.rows[1][0], Cell::text("Electronics"));
        assert_eq!(cleaned.rows[2][0], Cell::text("Electronics"));
        assert_eq!(cleaned.rows[3][0], Cell::text("Home & Garden"));
        assert_eq!(cleaned.rows[4][0], Cell::text("Books"));
        assert_eq!(tally.distinct_before, 5);
        assert_eq!(tally.distinct_after, 3);
        assert_eq!(tally.variants_collapsed.get("Electronics"), Some(&3));
    }

    #[test]
    fn unmapped_values_pass_through_unchanged() {
        let table = one_column_table("category", &["Groceries"]);
        let (cleaned, tally) = standardize_categories(table, 0);
        assert_eq!(cleaned.rows[0][0], Cell::text("Groceries"));
        assert!(tally.variants_collapsed.is_empty());
    }

    #[test]
    fn status_typo_table_covers_the_known_variants() {
        let table = one_column_table(
            "status",
            &["Shippd", "SHIPPED", "Complete", "canceled", "CNCLLD", "P"],
        );
        let (cleaned, _) = standardize_statuses(table, 0);
        assert_eq!(cleaned.rows[0][0], Cell::text("Shipped"));
        assert_eq!(cleaned.rows[1][0], Cell::text("Shipped"));
        assert_eq!(cleaned.rows[2][0], Cell::text("Delivered"));
        assert_eq!(cleaned.rows[3][0], Cell::text("Cancelled"));
        assert_eq!(cleaned.rows[4][0], Cell::text("Cancelled"));
        assert_eq!(cleaned.rows[5][0], Cell::text("Pending"));
    }

    #[test]
    fn mapped_values_land_in_the_canonical_set() {
        let table = one_column_table("status", &["ship", "deliverd", "pnding"]);
        let (cleaned, _) = standardize_statuses(table, 0);
        for row in &cleaned.rows {
            let value = row[0].as_text().unwrap();
            assert!(CANONICAL_STATUSES.contains(&value), "{value}");
        }
    }
}
