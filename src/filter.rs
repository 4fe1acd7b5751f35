//! Column triage: drops columns whose missing-value count exceeds a
//! threshold or whose name carries an `unnamed` prefix, and reports why.

use log::debug;
use serde::Serialize;

use crate::data::Dataset;

/// Fraction of rows that must be missing before a column qualifies for
/// removal when the caller does not say otherwise.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.9;

const REASON_MISSING: &str = "Excessive Missing Values";
const REASON_UNNAMED: &str = "Unnamed Column";
const UNNAMED_PREFIX: &str = "unnamed";

/// One removed column and the reason(s) it was flagged. Reasons keep a fixed
/// order: the missingness reason before the naming reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalRecord {
    pub column: String,
    pub reasons: Vec<&'static str>,
}

impl RemovalRecord {
    /// Reasons joined into the single display string used in reports.
    pub fn reason(&self) -> String {
        self.reasons.join(", ")
    }
}

/// Ordered audit of removed columns, one record per column in original
/// column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    records: Vec<RemovalRecord>,
}

impl FilterReport {
    pub fn records(&self) -> &[RemovalRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn removed_columns(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.column.as_str())
            .collect()
    }

    /// Table headers, present even when no column was removed.
    pub fn headers() -> Vec<String> {
        vec!["Column".to_string(), "Reason".to_string()]
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| vec![record.column.clone(), record.reason()])
            .collect()
    }
}

/// Removes flagged columns from `dataset` and reports each removal.
///
/// A column is flagged when its missing-cell count strictly exceeds
/// `missing_threshold * row_count`, when its name starts with `unnamed`
/// case-insensitively, or both. Kept columns pass through untouched in
/// their original order, so applying the filter twice is a no-op.
pub fn filter_columns(dataset: &Dataset, missing_threshold: f64) -> (Dataset, FilterReport) {
    let threshold_count = missing_threshold * dataset.row_count() as f64;
    let mut kept = Vec::with_capacity(dataset.column_count());
    let mut records = Vec::new();

    for column in dataset.columns() {
        let mut reasons = Vec::new();
        // Strict inequality: a column sitting exactly at the threshold stays.
        if column.missing_count() as f64 > threshold_count {
            reasons.push(REASON_MISSING);
        }
        if column.name.to_lowercase().starts_with(UNNAMED_PREFIX) {
            reasons.push(REASON_UNNAMED);
        }

        if reasons.is_empty() {
            kept.push(column.clone());
        } else {
            debug!(
                "Dropping column '{}' ({} missing of {} rows): {}",
                column.name,
                column.missing_count(),
                dataset.row_count(),
                reasons.join(", ")
            );
            records.push(RemovalRecord {
                column: column.name.clone(),
                reasons,
            });
        }
    }

    let filtered = Dataset::new(kept).expect("kept columns share the input row count");
    (filtered, FilterReport { records })
}
