//! Plain-text quality report assembly.
//!
//! A pure read over the pipeline tallies and the cleaned table: no
//! transformation happens here. Section layout follows the classic cleaning
//! report shape — overview, actions, missing-value comparison, final
//! statistics, and category/status breakdowns.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    clean::CleanSummary,
    data::{Cell, parse_order_date},
    table::Table,
};

const HEAVY_RULE: &str =
    "======================================================================";
const LIGHT_RULE: &str =
    "----------------------------------------------------------------------";

pub fn render(summary: &CleanSummary, cleaned: &Table) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, "DATA CLEANING REPORT");
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out);

    overview(&mut out, summary, cleaned);
    actions(&mut out, summary);
    quality_comparison(&mut out, summary);
    final_statistics(&mut out, summary, cleaned)?;
    breakdown(&mut out, cleaned, "category", "CATEGORY BREAKDOWN")?;
    breakdown(&mut out, cleaned, "status", "ORDER STATUS BREAKDOWN")?;

    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, "END OF REPORT");
    let _ = writeln!(out, "{HEAVY_RULE}");
    Ok(out)
}

fn overview(out: &mut String, summary: &CleanSummary, cleaned: &Table) {
    let _ = writeln!(out, "OVERVIEW");
    let _ = writeln!(out, "{LIGHT_RULE}");
    let _ = writeln!(out, "Original rows: {}", summary.input_rows);
    let _ = writeln!(out, "Cleaned rows: {}", summary.output_rows);
    let _ = writeln!(
        out,
        "Rows removed: {}",
        summary.input_rows - summary.output_rows
    );
    let _ = writeln!(out, "Columns: {}", cleaned.headers.len());
    let _ = writeln!(out);
}

fn actions(out: &mut String, summary: &CleanSummary) {
    let entries = [
        ("Duplicate rows removed", summary.duplicates_removed),
        (
            "Whitespace cleaned in text fields",
            summary.whitespace_cells_cleaned,
        ),
        ("Invalid emails marked missing", summary.email.invalid),
        ("Invalid phone numbers marked missing", summary.phone.invalid),
        ("Invalid dates marked missing", summary.order_date.invalid),
        ("Invalid prices marked missing", summary.price.invalid),
        ("Invalid quantities marked missing", summary.quantity.invalid),
        (
            "Category variations consolidated",
            summary.categories.variants_removed(),
        ),
        (
            "Status variations consolidated",
            summary.statuses.variants_removed(),
        ),
    ];
    let _ = writeln!(out, "CLEANING ACTIONS PERFORMED");
    let _ = writeln!(out, "{LIGHT_RULE}");
    for (idx, (description, count)) in entries.iter().enumerate() {
        let _ = writeln!(out, "{}. {description}: {count}", idx + 1);
    }
    let _ = writeln!(out);
}

fn quality_comparison(out: &mut String, summary: &CleanSummary) {
    let _ = writeln!(out, "DATA QUALITY COMPARISON");
    let _ = writeln!(out, "{LIGHT_RULE}");
    let _ = writeln!(
        out,
        "{:<20} {:<20} {:<20}",
        "Field", "Missing Before", "Missing After"
    );
    let _ = writeln!(out, "{LIGHT_RULE}");
    let after: HashMap<&str, usize> = summary
        .missing_after
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    for (name, before) in &summary.missing_before {
        let after_count = after.get(name.as_str()).copied().unwrap_or(0);
        let _ = writeln!(out, "{name:<20} {before:<20} {after_count:<20}");
    }
    let _ = writeln!(out);
}

fn final_statistics(out: &mut String, summary: &CleanSummary, cleaned: &Table) -> Result<()> {
    let customer_col = cleaned.column_index("customer_name")?;
    let date_col = cleaned.column_index("order_date")?;
    let price_col = cleaned.column_index("price")?;
    let quantity_col = cleaned.column_index("quantity")?;

    let unique_customers: BTreeSet<&str> = cleaned
        .rows
        .iter()
        .filter_map(|row| row[customer_col].as_text())
        .collect();
    let mut dates: Vec<NaiveDate> = cleaned
        .rows
        .iter()
        .filter_map(|row| row[date_col].as_text())
        .filter_map(|value| parse_order_date(value).ok())
        .collect();
    dates.sort();
    let mut total_revenue = Decimal::ZERO;
    let mut priced_orders = 0usize;
    for row in &cleaned.rows {
        if let Cell::Text(value) = &row[price_col]
            && let Ok(price) = value.parse::<Decimal>()
        {
            total_revenue += price;
            priced_orders += 1;
        }
    }
    let total_items: i64 = cleaned
        .rows
        .iter()
        .filter_map(|row| row[quantity_col].as_text())
        .filter_map(|value| value.parse::<i64>().ok())
        .sum();
    let average_order = if priced_orders > 0 {
        total_revenue / Decimal::from(priced_orders as u64)
    } else {
        Decimal::ZERO
    };

    let _ = writeln!(out, "FINAL CLEANED DATA STATISTICS");
    let _ = writeln!(out, "{LIGHT_RULE}");
    let _ = writeln!(out, "Total valid orders: {}", summary.output_rows);
    let _ = writeln!(out, "Unique customers: {}", unique_customers.len());
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => {
            let _ = writeln!(out, "Date range: {first} to {last}");
        }
        _ => {
            let _ = writeln!(out, "Date range: No valid dates");
        }
    }
    let _ = writeln!(out, "Total revenue: ${}", total_revenue.round_dp(2));
    let _ = writeln!(out, "Average order value: ${}", average_order.round_dp(2));
    let _ = writeln!(out, "Total items sold: {total_items}");
    let _ = writeln!(out);
    Ok(())
}

fn breakdown(out: &mut String, cleaned: &Table, column: &str, title: &str) -> Result<()> {
    let idx = cleaned.column_index(column)?;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in &cleaned.rows {
        if let Some(value) = row[idx].as_text() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    let mut items: Vec<(&str, usize)> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total = cleaned.rows.len().max(1);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{LIGHT_RULE}");
    for (value, count) in items {
        let percent = (count as f64 / total as f64) * 100.0;
        let _ = writeln!(out, "{value:<20} {count:<10} ({percent:.1}%)");
    }
    let _ = writeln!(out);
    Ok(())
}
