//! The in-memory order table: headers plus rows of [`Cell`]s.
//!
//! The table is loaded wholesale, handed by value from stage to stage, and
//! written wholesale. Also hosts the fixed-width console rendering used by
//! `preview` and the report breakdowns.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use encoding_rs::Encoding;

use crate::{data::Cell, io_utils};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("Input is missing required column '{name}'"))
    }

    pub fn read(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Table> {
        let mut reader = io_utils::open_csv_reader(path, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, encoding)?;
        let mut table = Table::new(headers);
        for (idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", idx + 2))?;
            let decoded = io_utils::decode_record(&record, encoding)?;
            if decoded.len() != table.headers.len() {
                return Err(anyhow!(
                    "Row {} has {} field(s), expected {}",
                    idx + 2,
                    decoded.len(),
                    table.headers.len()
                ));
            }
            table
                .rows
                .push(decoded.iter().map(|field| Cell::from_raw(field)).collect());
        }
        Ok(table)
    }

    pub fn write(&self, path: Option<&Path>, delimiter: u8) -> Result<()> {
        let mut writer = io_utils::open_csv_writer(path, delimiter)?;
        writer
            .write_record(self.headers.iter())
            .context("Writing output headers")?;
        for (idx, row) in self.rows.iter().enumerate() {
            writer
                .write_record(row.iter().map(Cell::render))
                .with_context(|| format!("Writing output row {}", idx + 2))?;
        }
        writer.flush().context("Flushing output writer")?;
        Ok(())
    }

    /// Missing-cell count per column, in header order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let missing = self
                    .rows
                    .iter()
                    .filter(|row| row[idx].is_missing())
                    .count();
                (header.clone(), missing)
            })
            .collect()
    }
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));
    let separators = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separators, &widths));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        if idx >= widths.len() {
            break;
        }
        let sanitized = sanitize_cell(value);
        let mut cell = sanitized.into_owned();
        let padding = widths[idx].saturating_sub(cell.chars().count());
        if padding > 0 {
            cell.push_str(&" ".repeat(padding));
        }
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(
            value
                .chars()
                .map(|ch| match ch {
                    '\n' | '\r' | '\t' => ' ',
                    other => other,
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    }
}
