//! Core dataset model: typed cell values, column kind tags, and the
//! [`Dataset`] container.
//!
//! A column's kind (numeric vs. non-numeric) is resolved exactly once when
//! the column is constructed and carried as a tag; downstream code branches
//! on the tag instead of re-inspecting cell values. Missing cells are
//! `None` throughout.

use std::fmt;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Serialize;

/// A single typed cell value. `Integer` and `Float` are the numeric kinds;
/// everything else lands in the non-numeric group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                // Whole floats keep one decimal so the float kind stays visible.
                if f.fract() == 0.0 && f.is_finite() {
                    format!("{f:.1}")
                } else {
                    f.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Which statistic set applies to a column. Resolved once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    NonNumeric,
}

impl ColumnKind {
    /// Group label used in rendered summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "Numeric Data",
            ColumnKind::NonNumeric => "Non-Numeric Data",
        }
    }
}

/// A named, ordered sequence of cells of a single logical kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    cells: Vec<Option<Value>>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Builds a column, tagging its kind from the cell values: numeric when
    /// every non-missing cell is numeric. An all-missing column is tagged
    /// numeric, matching how an empty column loads from CSV.
    pub fn from_cells(name: impl Into<String>, cells: Vec<Option<Value>>) -> Self {
        let kind = if cells.iter().flatten().all(Value::is_numeric) {
            ColumnKind::Numeric
        } else {
            ColumnKind::NonNumeric
        };
        Self::new(name, kind, cells)
    }

    pub fn cells(&self) -> &[Option<Value>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Iterates the non-missing cell values in row order.
    pub fn present(&self) -> impl Iterator<Item = &Value> {
        self.cells.iter().flatten()
    }
}

/// An ordered collection of equal-length named columns. Construction is the
/// only place shape is checked; every operation that derives a new dataset
/// preserves the invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Builds a dataset from columns, validating that all columns share one
    /// row count. The empty dataset (zero columns) is valid.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        for column in &columns {
            if column.len() != row_count {
                bail!(
                    "Column '{}' has {} row(s); expected {} to match the rest of the dataset",
                    column.name,
                    column.len(),
                    row_count
                );
            }
        }
        Ok(Self { columns, row_count })
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}
