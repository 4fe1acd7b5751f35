//! Descriptive summaries over a [`Dataset`]: one statistic set for numeric
//! columns, another for non-numeric columns, merged into a single table
//! keyed by (group, column, statistic).
//!
//! The merged table is transposed relative to the per-group blocks: each
//! original dataset column is one row, tagged with its group label, and
//! each statistic is one column. Statistics that do not apply to a row's
//! group hold the missing marker.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::data::{Column, ColumnKind, Dataset, Value};

/// Statistics computed for numeric columns, in output order: the standard
/// descriptive set with `missing` and `freq` appended, in that order.
const NUMERIC_STATS: &[&str] = &[
    "count", "mean", "std", "min", "25%", "50%", "75%", "max", "missing", "freq",
];

/// Statistics computed for non-numeric columns, in output order.
const NON_NUMERIC_STATS: &[&str] = &["count", "unique", "top", "freq", "missing"];

/// Canonical column order for a summary that covers both groups.
const MERGED_STATS: &[&str] = &[
    "count", "mean", "std", "min", "25%", "50%", "75%", "max", "unique", "top", "freq", "missing",
];

/// Normalizes a summary cell for display: floats are rounded to two decimal
/// places, everything else (including the missing marker) passes through
/// unchanged.
///
/// Rounding is half-away-from-zero, the rule of [`f64::round`]. A whole
/// result stays a `Float` (`3.004` becomes `Float(3.0)`, never
/// `Integer(3)`). The function is total and idempotent.
pub fn format_number(cell: Option<Value>) -> Option<Value> {
    match cell {
        Some(Value::Float(f)) => Some(Value::Float((f * 100.0).round() / 100.0)),
        other => other,
    }
}

/// One summary row: an original dataset column, its group tag, and one cell
/// per statistic in the summary's statistic order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub group: ColumnKind,
    pub column: String,
    pub cells: Vec<Option<Value>>,
}

/// The merged, transposed summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    statistics: Vec<&'static str>,
    rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn statistics(&self) -> &[&'static str] {
        &self.statistics
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a single cell by column name and statistic name.
    pub fn cell(&self, column: &str, statistic: &str) -> Option<&Value> {
        let stat_idx = self.statistics.iter().position(|s| *s == statistic)?;
        self.rows
            .iter()
            .find(|row| row.column == column)
            .and_then(|row| row.cells.get(stat_idx))
            .and_then(Option::as_ref)
    }

    /// Table headers: the two key columns followed by the statistic names.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["group".to_string(), "column".to_string()];
        headers.extend(self.statistics.iter().map(|s| s.to_string()));
        headers
    }

    /// Renders rows for table output; missing cells render empty.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.group.label().to_string(), row.column.clone()];
                cells.extend(row.cells.iter().map(|cell| {
                    cell.as_ref().map(Value::as_display).unwrap_or_default()
                }));
                cells
            })
            .collect()
    }
}

/// Per-group intermediate block. Groups that have no columns are simply
/// absent (`None`), so the merge never guesses whether a group took part.
struct GroupBlock {
    statistics: &'static [&'static str],
    rows: Vec<SummaryRow>,
}

/// Summarizes every column of `dataset`, numeric columns under the
/// "Numeric Data" group and all others under "Non-Numeric Data". Each input
/// column appears exactly once in the result; a zero-column dataset yields
/// an empty summary.
pub fn describe(dataset: &Dataset) -> Summary {
    let numeric = summarize_group(dataset, ColumnKind::Numeric);
    let non_numeric = summarize_group(dataset, ColumnKind::NonNumeric);
    merge(numeric, non_numeric)
}

fn summarize_group(dataset: &Dataset, kind: ColumnKind) -> Option<GroupBlock> {
    let columns = dataset
        .columns()
        .iter()
        .filter(|column| column.kind == kind)
        .collect::<Vec<_>>();
    if columns.is_empty() {
        return None;
    }
    let statistics = match kind {
        ColumnKind::Numeric => NUMERIC_STATS,
        ColumnKind::NonNumeric => NON_NUMERIC_STATS,
    };
    let rows = columns
        .into_iter()
        .map(|column| SummaryRow {
            group: kind,
            column: column.name.clone(),
            cells: match kind {
                ColumnKind::Numeric => numeric_cells(column),
                ColumnKind::NonNumeric => non_numeric_cells(column),
            },
        })
        .collect();
    Some(GroupBlock { statistics, rows })
}

fn merge(numeric: Option<GroupBlock>, non_numeric: Option<GroupBlock>) -> Summary {
    let statistics: Vec<&'static str> = match (&numeric, &non_numeric) {
        (Some(_), Some(_)) => MERGED_STATS.to_vec(),
        (Some(block), None) | (None, Some(block)) => block.statistics.to_vec(),
        (None, None) => Vec::new(),
    };

    let mut rows = Vec::new();
    for block in [numeric, non_numeric].into_iter().flatten() {
        for row in block.rows {
            rows.push(align_row(row, block.statistics, &statistics));
        }
    }
    Summary { statistics, rows }
}

/// Re-indexes a row's cells from its group's statistic order to the merged
/// order, inserting the missing marker for statistics the group lacks.
fn align_row(row: SummaryRow, from: &[&'static str], to: &[&'static str]) -> SummaryRow {
    let cells = to
        .iter()
        .map(|statistic| {
            from.iter()
                .position(|s| s == statistic)
                .and_then(|idx| row.cells[idx].clone())
        })
        .collect();
    SummaryRow { cells, ..row }
}

fn numeric_cells(column: &Column) -> Vec<Option<Value>> {
    let mut values = column
        .present()
        .filter_map(Value::as_f64)
        .collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let cells: Vec<Option<Value>> = vec![
        Some(Value::Integer(count as i64)),
        mean(&values).map(Value::Float),
        std_dev(&values).map(Value::Float),
        values.first().copied().map(Value::Float),
        percentile(&values, 0.25).map(Value::Float),
        percentile(&values, 0.50).map(Value::Float),
        percentile(&values, 0.75).map(Value::Float),
        values.last().copied().map(Value::Float),
        Some(Value::Integer(column.missing_count() as i64)),
        top_run_length(&values).map(|n| Value::Integer(n as i64)),
    ];
    cells.into_iter().map(format_number).collect()
}

fn non_numeric_cells(column: &Column) -> Vec<Option<Value>> {
    // Count by display key; BTreeMap iteration order makes ties resolve
    // toward the lexicographically smaller value.
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut representatives: BTreeMap<String, Value> = BTreeMap::new();
    for value in column.present() {
        let key = value.as_display();
        *counts.entry(key.clone()).or_insert(0) += 1;
        representatives
            .entry(key)
            .or_insert_with(|| value.clone());
    }

    let count: usize = counts.values().sum();
    let unique = counts.len();
    let mut ranked = counts.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let top = ranked
        .first()
        .map(|(key, n)| (representatives[key.as_str()].clone(), **n));

    vec![
        Some(Value::Integer(count as i64)),
        Some(Value::Integer(unique as i64)),
        top.as_ref().map(|(value, _)| value.clone()),
        top.map(|(_, n)| Value::Integer(n as i64)),
        Some(Value::Integer(column.missing_count() as i64)),
    ]
}

fn mean(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    Some(sorted.iter().sum::<f64>() / sorted.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); absent below two values.
fn std_dev(sorted: &[f64]) -> Option<f64> {
    if sorted.len() < 2 {
        return None;
    }
    let mean = mean(sorted)?;
    let sum_squares = sorted
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>();
    Some((sum_squares / (sorted.len() as f64 - 1.0)).sqrt())
}

/// Linearly interpolated percentile over an ascending-sorted slice.
fn percentile(sorted: &[f64], fraction: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = rank - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Occurrence count of the most frequent value in an ascending-sorted
/// slice; `None` when the slice is empty.
fn top_run_length(sorted: &[f64]) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }
    sorted
        .iter()
        .dedup_with_count()
        .map(|(run, _)| run)
        .max()
}
