//! Column classification for uploaded datasets
//!
//! Classification is deliberately cheap: a column is numeric iff the value
//! in the first record parses as a number. A leading blank or outlier cell
//! therefore misclassifies the whole column; that trade-off is part of the
//! engine's contract and is kept as-is.

use farol_core::Dataset;
use tracing::debug;

/// Column names that suggest a date dimension
const DATE_HINTS: &[&str] = &["data", "date", "dia"];

/// Column names that suggest a categorical dimension
const CATEGORY_HINTS: &[&str] = &[
    "categoria",
    "category",
    "tipo",
    "status",
    "região",
    "regiao",
    "setor",
    "departamento",
];

/// Classification tag for a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Numeric,
    Categorical,
}

/// Derived schema for one dataset snapshot.
///
/// Recomputed from scratch whenever the active dataset changes; never
/// stored alongside the data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaProfile {
    /// Numeric columns in dataset column order
    pub numeric_columns: Vec<String>,

    /// First column whose name matches the date vocabulary
    pub date_column: Option<String>,

    /// First column whose name matches the category vocabulary
    pub category_column: Option<String>,
}

impl SchemaProfile {
    /// Classify every column of the dataset by sampling the first record
    pub fn detect(dataset: &Dataset) -> Self {
        let numeric_columns = match dataset.first_record() {
            Some(first) => dataset
                .columns()
                .iter()
                .filter(|column| first.get(column).numeric_view().is_some())
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        let date_column = first_matching(dataset, DATE_HINTS);
        let category_column = first_matching(dataset, CATEGORY_HINTS);

        debug!(
            columns = dataset.column_count(),
            numeric = numeric_columns.len(),
            "detected schema profile"
        );

        Self {
            numeric_columns,
            date_column,
            category_column,
        }
    }

    /// Classification of one column; anything not numeric is categorical
    pub fn class_of(&self, column: &str) -> ColumnClass {
        if self.numeric_columns.iter().any(|name| name == column) {
            ColumnClass::Numeric
        } else {
            ColumnClass::Categorical
        }
    }

    /// The column every canned numeric chat answer operates on
    pub fn first_numeric(&self) -> Option<&str> {
        self.numeric_columns.first().map(|name| name.as_str())
    }

    pub fn has_numeric_columns(&self) -> bool {
        !self.numeric_columns.is_empty()
    }
}

/// First column (in column order) whose lower-cased name contains one of
/// the hint words
fn first_matching(dataset: &Dataset, hints: &[&str]) -> Option<String> {
    dataset
        .columns()
        .iter()
        .find(|column| {
            let lower = column.to_lowercase();
            hints.iter().any(|hint| lower.contains(hint))
        })
        .cloned()
}
