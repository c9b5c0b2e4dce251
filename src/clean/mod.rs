//! The cleaning pipeline: ordered, pure, table-in/table-out stages.
//!
//! Each stage consumes the table produced by the prior stage and returns a
//! new table plus its tally; the tallies are assembled into a
//! [`CleanSummary`] for the report. No stage drops a row over a bad field
//! value — invalid fields become `Missing` and are counted. The only
//! row-removing stage is full-row deduplication.

pub mod categorical;
pub mod contact;
pub mod dates;
pub mod dedup;
pub mod numbers;
pub mod text;

use std::collections::BTreeMap;
use std::fs::File;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::Serialize;

use crate::{cli::CleanArgs, io_utils, report, table::Table};

/// Free-text columns that get whitespace normalization when present.
pub const TEXT_COLUMNS: &[&str] = &["customer_name", "email", "product_name", "category", "status"];

/// Valid/invalid counts for one validated column. Cells that were already
/// missing count as neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldTally {
    pub valid: usize,
    pub invalid: usize,
}

/// Before/after distinct-value counts for a synonym-standardized column,
/// plus the number of distinct raw variants collapsed into each canonical
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidationTally {
    pub distinct_before: usize,
    pub distinct_after: usize,
    pub variants_collapsed: BTreeMap<String, usize>,
}

impl ConsolidationTally {
    pub fn variants_removed(&self) -> usize {
        self.distinct_before.saturating_sub(self.distinct_after)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    pub duplicates_removed: usize,
    pub whitespace_cells_cleaned: usize,
    pub email: FieldTally,
    pub phone: FieldTally,
    pub order_date: FieldTally,
    pub price: FieldTally,
    pub quantity: FieldTally,
    pub categories: ConsolidationTally,
    pub statuses: ConsolidationTally,
    pub missing_before: Vec<(String, usize)>,
    pub missing_after: Vec<(String, usize)>,
}

/// Runs every stage in its required order. `today` bounds acceptable order
/// dates; passing it in keeps the pipeline a pure function of its inputs.
pub fn run_pipeline(table: Table, today: NaiveDate) -> Result<(Table, CleanSummary)> {
    let input_rows = table.rows.len();
    let missing_before = table.missing_counts();

    let email_col = table.column_index("email")?;
    let phone_col = table.column_index("phone")?;
    let date_col = table.column_index("order_date")?;
    let price_col = table.column_index("price")?;
    let quantity_col = table.column_index("quantity")?;
    let category_col = table.column_index("category")?;
    let status_col = table.column_index("status")?;
    let text_cols: Vec<usize> = TEXT_COLUMNS
        .iter()
        .filter_map(|name| table.column_index(name).ok())
        .collect();

    let (table, duplicates_removed) = dedup::remove_duplicates(table);
    info!("Removed {duplicates_removed} duplicate row(s)");

    let (table, whitespace_cells_cleaned) = text::normalize_whitespace(table, &text_cols);
    info!("Normalized whitespace in {whitespace_cells_cleaned} cell(s)");

    let (table, email) = contact::validate_emails(table, email_col);
    info!(
        "Emails: {} valid, {} marked missing",
        email.valid, email.invalid
    );

    let (table, phone) = contact::standardize_phones(table, phone_col);
    info!(
        "Phones: {} standardized, {} marked missing",
        phone.valid, phone.invalid
    );

    let (table, order_date) = dates::standardize_dates(table, date_col, today);
    info!(
        "Dates: {} standardized, {} marked missing",
        order_date.valid, order_date.invalid
    );

    let (table, price) = numbers::normalize_prices(table, price_col);
    info!(
        "Prices: {} normalized, {} marked missing",
        price.valid, price.invalid
    );

    let (table, quantity) = numbers::validate_quantities(table, quantity_col);
    info!(
        "Quantities: {} validated, {} marked missing",
        quantity.valid, quantity.invalid
    );

    let (table, categories) = categorical::standardize_categories(table, category_col);
    info!(
        "Categories: {} -> {} distinct value(s)",
        categories.distinct_before, categories.distinct_after
    );

    let (table, statuses) = categorical::standardize_statuses(table, status_col);
    info!(
        "Statuses: {} -> {} distinct value(s)",
        statuses.distinct_before, statuses.distinct_after
    );

    let summary = CleanSummary {
        input_rows,
        output_rows: table.rows.len(),
        duplicates_removed,
        whitespace_cells_cleaned,
        email,
        phone,
        order_date,
        price,
        quantity,
        categories,
        statuses,
        missing_before,
        missing_after: table.missing_counts(),
    };
    Ok((table, summary))
}

pub fn execute(args: &CleanArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let output_delimiter =
        io_utils::resolve_output_delimiter(args.output.as_deref(), args.output_delimiter, delimiter);

    info!(
        "Cleaning '{}' (delimiter '{}')",
        args.input.display(),
        crate::printable_delimiter(delimiter)
    );
    let table = Table::read(&args.input, delimiter, encoding)
        .with_context(|| format!("Loading {:?}", args.input))?;
    info!(
        "Loaded {} row(s), {} column(s)",
        table.rows.len(),
        table.headers.len()
    );

    let (cleaned, summary) = run_pipeline(table, Utc::now().date_naive())?;

    cleaned
        .write(args.output.as_deref(), output_delimiter)
        .context("Writing cleaned dataset")?;
    let destination = args
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    info!(
        "Wrote {} cleaned row(s) -> {}",
        cleaned.rows.len(),
        destination
    );

    let rendered = report::render(&summary, &cleaned)?;
    match &args.report {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Writing report to {path:?}"))?;
            info!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    if let Some(path) = &args.summary_json {
        let file =
            File::create(path).with_context(|| format!("Creating summary file {path:?}"))?;
        serde_json::to_writer_pretty(file, &summary)
            .with_context(|| format!("Writing summary JSON to {path:?}"))?;
        info!("Summary JSON written to {}", path.display());
    }

    Ok(())
}
