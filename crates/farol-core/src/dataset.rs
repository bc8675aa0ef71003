//! In-memory dataset model
//!
//! A dataset is the full table derived from one uploaded CSV file: an ordered
//! list of column names plus an ordered list of records. Cells stay untyped
//! text until a consumer asks for their numeric interpretation; the two
//! coercion policies used across the engine both live on [`Cell`] so the
//! "coerce vs. skip" decision stays in one reviewable place.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::DataError;

const MISSING_CELL: Cell = Cell::Missing;

/// A single cell value as delivered by the CSV-parsing collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Raw text content, possibly blank
    Text(String),
    /// The source record had no value for this column
    Missing,
}

impl Cell {
    /// Text content of the cell; missing cells read as the empty string
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(text) => text.as_str(),
            Cell::Missing => "",
        }
    }

    /// Whether the cell is missing or contains only whitespace
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }

    /// Strict numeric interpretation: blank and unparseable cells are `None`
    pub fn numeric_view(&self) -> Option<f64> {
        let text = self.as_str().trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok()
    }

    /// Lenient numeric interpretation used by the accumulation paths:
    /// anything without a numeric reading contributes zero
    pub fn coerced(&self) -> f64 {
        self.numeric_view().unwrap_or(0.0)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

/// One row of a dataset, keyed by column name in column order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    cells: IndexMap<String, Cell>,
}

impl Record {
    /// Build a record from (column, value) pairs as produced by a
    /// header-aware CSV parser
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Cell>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Cell for a column; absent keys read as [`Cell::Missing`]
    pub fn get(&self, column: &str) -> &Cell {
        self.cells.get(column).unwrap_or(&MISSING_CELL)
    }

    /// Column names this record carries, in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(|key| key.as_str())
    }
}

/// Status reported by derived views instead of raising errors.
///
/// Both non-ready states are normal, expected outcomes of an upload, not
/// failures: an empty file and a file with nothing chartable are told apart
/// so the presentation layer can word them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    /// Zero records loaded
    Empty,
    /// Records exist but no column classified as numeric
    NoNumericColumns,
    /// Data available for statistics and charts
    Ready,
}

/// The full in-memory table derived from one uploaded CSV file.
///
/// Records are immutable once loaded; filtering produces a new dataset view
/// that shares the same records instead of copying them. There is a single
/// logical writer (the UI event handler), so no locking happens here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Arc<Record>>,
}

impl Dataset {
    /// Build a dataset from named records, validating the column contract
    /// once here rather than on every access.
    ///
    /// Unknown record keys fail fast (a programming-contract violation on
    /// the parser side); columns a record omits read as missing cells.
    pub fn from_records<I>(columns: Vec<String>, records: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = Record>,
    {
        Self::check_columns(&columns)?;

        let mut validated = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            for key in record.columns() {
                if !columns.iter().any(|column| column.as_str() == key) {
                    return Err(DataError::UnknownColumn {
                        index,
                        column: key.to_string(),
                    });
                }
            }
            // Normalize to full column coverage in column order
            let cells = columns
                .iter()
                .map(|column| (column.clone(), record.get(column).clone()))
                .collect::<IndexMap<_, _>>();
            validated.push(Arc::new(Record { cells }));
        }

        Ok(Self {
            columns,
            records: validated,
        })
    }

    /// Build a dataset from positional rows aligned with `columns`.
    ///
    /// Short rows are padded with missing cells; overlong rows fail fast.
    pub fn from_rows<I, R, V>(columns: Vec<String>, rows: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<Cell>,
    {
        Self::check_columns(&columns)?;

        let mut records = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let mut cells: Vec<Cell> = row.into_iter().map(Into::into).collect();
            if cells.len() > columns.len() {
                return Err(DataError::Other(format!(
                    "record {} has {} cells but only {} columns exist",
                    index,
                    cells.len(),
                    columns.len()
                )));
            }
            cells.resize(columns.len(), Cell::Missing);
            let cells = columns
                .iter()
                .cloned()
                .zip(cells)
                .collect::<IndexMap<_, _>>();
            records.push(Arc::new(Record { cells }));
        }

        Ok(Self { columns, records })
    }

    /// Dataset with no columns and no records
    pub fn empty() -> Self {
        Self::default()
    }

    fn check_columns(columns: &[String]) -> Result<(), DataError> {
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].contains(column) {
                return Err(DataError::DuplicateColumn(column.clone()));
            }
        }
        Ok(())
    }

    /// Column names in first-seen order from the source file
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Records in source order
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// First record, the sampling target for column classification
    pub fn first_record(&self) -> Option<&Record> {
        self.records.first().map(|record| record.as_ref())
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// New dataset view keeping only the records the predicate accepts.
    ///
    /// The view references the same records as `self`; nothing is copied.
    pub fn retain_view<F>(&self, mut predicate: F) -> Dataset
    where
        F: FnMut(&Record) -> bool,
    {
        Dataset {
            columns: self.columns.clone(),
            records: self
                .records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
        }
    }
}
