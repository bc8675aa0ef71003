//! Aggregation over dataset snapshots
//!
//! Two accumulation policies coexist on purpose and must not be unified:
//! the raw statistics coerce anything without a numeric reading to zero,
//! while the headline summary cards only consider strictly positive values.
//! Callers pick by operation, never by flag.

use farol_core::{Cell, Dataset};
use indexmap::IndexMap;
use serde::Serialize;

/// Cap on distinct groups when grouping by a date-like column
pub const DATE_GROUP_CAP: usize = 15;

/// Cap on distinct groups when grouping by a category-like column
pub const CATEGORY_GROUP_CAP: usize = 10;

/// Accumulated totals for one numeric column.
///
/// `sum` and `count` include a zero contribution for every unparseable
/// cell, so `count` always equals the record count. `min`/`max` start at
/// the infinite seeds and move only on parseable cells; a column with no
/// parseable cell keeps its degenerate infinite bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnAggregate {
    pub sum: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
}

impl ColumnAggregate {
    fn new() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn accumulate(&mut self, cell: &Cell) {
        self.sum += cell.coerced();
        self.count += 1;
        if let Some(value) = cell.numeric_view() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Mean over the coerced sum; zero when nothing was accumulated
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

impl Default for ColumnAggregate {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-column {sum, count, min, max} over every record of the dataset,
/// in the order the numeric columns were given
pub fn summary_stats(
    dataset: &Dataset,
    numeric_columns: &[String],
) -> IndexMap<String, ColumnAggregate> {
    let mut stats: IndexMap<String, ColumnAggregate> = numeric_columns
        .iter()
        .map(|column| (column.clone(), ColumnAggregate::new()))
        .collect();

    for record in dataset.records() {
        for (column, aggregate) in stats.iter_mut() {
            aggregate.accumulate(record.get(column));
        }
    }

    stats
}

/// One grouped-totals row: the group key plus per-column sums
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    /// Distinct value of the grouping column
    pub key: String,

    /// Sum of each numeric column across the group's records
    pub totals: IndexMap<String, f64>,
}

/// Sum every numeric column per distinct value of `group_column`.
///
/// Output order is the order the distinct values first appear in the
/// dataset, truncated to the first `cap` groups encountered; sums for the
/// surviving groups cover all of their records.
pub fn grouped_totals(
    dataset: &Dataset,
    numeric_columns: &[String],
    group_column: &str,
    cap: usize,
) -> Vec<GroupRow> {
    let mut groups: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();

    for record in dataset.records() {
        let key = record.get(group_column).as_str().to_string();
        let totals = groups.entry(key).or_default();
        for column in numeric_columns {
            *totals.entry(column.clone()).or_insert(0.0) += record.get(column).coerced();
        }
    }

    groups.truncate(cap);
    groups
        .into_iter()
        .map(|(key, totals)| GroupRow { key, totals })
        .collect()
}

/// Positive-only headline figures for one numeric column.
///
/// Unlike [`summary_stats`], values `<= 0` (including every coerced zero)
/// are excluded before averaging. `None` when no positive value exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    /// Column the cards describe
    pub column: String,
    pub total: f64,
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
}

/// Compute the summary cards for `column`, or `None` when the column has
/// no strictly positive values
pub fn summary_cards(dataset: &Dataset, column: &str) -> Option<SummaryCards> {
    let values: Vec<f64> = dataset
        .records()
        .iter()
        .filter_map(|record| record.get(column).numeric_view())
        .filter(|value| *value > 0.0)
        .collect();

    if values.is_empty() {
        return None;
    }

    let total: f64 = values.iter().sum();
    let minimum = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let maximum = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Some(SummaryCards {
        column: column.to_string(),
        total,
        average: total / values.len() as f64,
        minimum,
        maximum,
    })
}
