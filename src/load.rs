//! CSV boundary: loads a file into a typed [`Dataset`] and writes a dataset
//! back out. Column types are inferred from a full column scan and resolved
//! once, before any cell is materialized.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;

use crate::data::{Column, ColumnKind, Dataset, Value};

/// Raw tokens treated as the missing marker, compared case-insensitively
/// after trimming.
const MISSING_TOKENS: &[&str] = &["na", "n/a", "null", "nan"];

/// Picks a delimiter from the file extension when the caller does not
/// supply one.
pub fn resolve_delimiter(path: &Path, override_delimiter: Option<u8>) -> u8 {
    if let Some(delimiter) = override_delimiter {
        return delimiter;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

/// Reads a delimited file with a header row into a [`Dataset`].
///
/// Each column's type is inferred from every non-missing raw value in the
/// column: integer, then float, then boolean, then date, falling back to
/// text. A column with no non-missing values loads as an empty numeric
/// column, the same group an empty column occupies in a numeric workbook.
pub fn load_dataset(path: &Path, delimiter: u8) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_path(path)
        .with_context(|| format!("Opening {path:?}"))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Reading header row from {path:?}"))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        for (col_idx, raw) in record.iter().enumerate().take(headers.len()) {
            raw_columns[col_idx].push(normalize_cell(raw));
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| {
            let column = typed_column(name, &raw);
            debug!(
                "Loaded column '{}' as {:?} ({} missing)",
                column.name,
                column.kind,
                column.missing_count()
            );
            column
        })
        .collect::<Vec<_>>();

    Dataset::new(columns).with_context(|| format!("Assembling dataset from {path:?}"))
}

/// Writes a dataset as delimited text, missing cells as empty fields.
pub fn write_dataset(dataset: &Dataset, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Creating {path:?}"))?;
    writer
        .write_record(dataset.column_names())
        .context("Writing header row")?;
    for row_idx in 0..dataset.row_count() {
        let row = dataset
            .columns()
            .iter()
            .map(|column| {
                column.cells()[row_idx]
                    .as_ref()
                    .map(Value::as_display)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        writer
            .write_record(&row)
            .with_context(|| format!("Writing row {}", row_idx + 1))?;
    }
    writer.flush().context("Flushing output")?;
    Ok(())
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed.to_ascii_lowercase().as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InferredType {
    Integer,
    Float,
    Boolean,
    Date,
    Text,
}

fn typed_column(name: String, raw: &[Option<String>]) -> Column {
    let inferred = infer_type(raw.iter().flatten().map(String::as_str));
    let kind = match inferred {
        InferredType::Integer | InferredType::Float => ColumnKind::Numeric,
        _ => ColumnKind::NonNumeric,
    };
    let cells = raw
        .iter()
        .map(|cell| {
            cell.as_deref().map(|value| {
                parse_as(value, inferred).expect("inference accepted every non-missing value")
            })
        })
        .collect();
    Column::new(name, kind, cells)
}

/// Narrowest type accepted by every value. An empty scan leaves every
/// candidate alive and settles on Integer, keeping an all-missing column in
/// the numeric group.
fn infer_type<'a>(values: impl Iterator<Item = &'a str>) -> InferredType {
    let candidates = [
        InferredType::Integer,
        InferredType::Float,
        InferredType::Boolean,
        InferredType::Date,
    ];
    let mut alive = [true; 4];
    for value in values {
        for (idx, candidate) in candidates.iter().enumerate() {
            if alive[idx] && parse_as(value, *candidate).is_none() {
                alive[idx] = false;
            }
        }
    }
    candidates
        .into_iter()
        .zip(alive)
        .find(|(_, alive)| *alive)
        .map(|(candidate, _)| candidate)
        .unwrap_or(InferredType::Text)
}

fn parse_as(value: &str, ty: InferredType) -> Option<Value> {
    match ty {
        InferredType::Integer => value.parse::<i64>().ok().map(Value::Integer),
        InferredType::Float => value.parse::<f64>().ok().map(Value::Float),
        InferredType::Boolean => match value.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" => Some(Value::Boolean(true)),
            "false" | "f" | "no" | "n" => Some(Value::Boolean(false)),
            _ => None,
        },
        InferredType::Date => parse_naive_date(value).map(Value::Date),
        InferredType::Text => Some(Value::Text(value.to_string())),
    }
}

fn parse_naive_date(value: &str) -> Option<chrono::NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];
    DATE_FORMATS
        .iter()
        .find_map(|fmt| chrono::NaiveDate::parse_from_str(value, fmt).ok())
}
