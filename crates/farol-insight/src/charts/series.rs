//! Bar/line/area series construction
//!
//! One series shape serves the bar, line and area charts. The x dimension
//! is chosen by priority: a date-like column, else a category-like column,
//! else the first rows by index.

use farol_core::Dataset;
use farol_data::SchemaProfile;
use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregate::{grouped_totals, CATEGORY_GROUP_CAP, DATE_GROUP_CAP};

/// Cap on numeric columns represented in one series
const SERIES_COLUMN_CAP: usize = 3;

/// Columns within the cap drawn as bars / primary series
const PRIMARY_COLUMN_CAP: usize = 2;

/// Rows taken when falling back to the record index dimension
const INDEX_FALLBACK_ROWS: usize = 10;

/// How the x dimension was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "column")]
pub enum Dimension {
    /// Grouped by a date-like column
    Date(String),
    /// Grouped by a category-like column
    Category(String),
    /// First records, labelled by 1-based position
    RowIndex,
}

/// One plot-ready row: the x label plus one value per charted column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub label: String,
    pub values: IndexMap<String, f64>,
}

/// Renderer-agnostic series for the bar/line/area charts.
///
/// The first two numeric columns are the bar/primary series; a third, when
/// present, is meant as an overlay line. This 2+1 split is a fixed
/// presentation rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub dimension: Dimension,
    pub rows: Vec<SeriesRow>,

    /// At most two columns drawn as bars / primary series
    pub bar_columns: Vec<String>,

    /// Third numeric column, drawn as an overlay line when present
    pub overlay_column: Option<String>,
}

/// Build the chart series for one dataset snapshot
pub fn build_series(dataset: &Dataset, profile: &SchemaProfile) -> ChartSeries {
    let charted: Vec<String> = profile
        .numeric_columns
        .iter()
        .take(SERIES_COLUMN_CAP)
        .cloned()
        .collect();

    let (dimension, rows) = if let Some(date_column) = &profile.date_column {
        (
            Dimension::Date(date_column.clone()),
            grouped_rows(dataset, &charted, date_column, DATE_GROUP_CAP),
        )
    } else if let Some(category_column) = &profile.category_column {
        (
            Dimension::Category(category_column.clone()),
            grouped_rows(dataset, &charted, category_column, CATEGORY_GROUP_CAP),
        )
    } else {
        (Dimension::RowIndex, indexed_rows(dataset, &charted))
    };

    let overlay_column = charted.get(PRIMARY_COLUMN_CAP).cloned();
    let bar_columns = charted.into_iter().take(PRIMARY_COLUMN_CAP).collect();

    ChartSeries {
        dimension,
        rows,
        bar_columns,
        overlay_column,
    }
}

fn grouped_rows(
    dataset: &Dataset,
    charted: &[String],
    group_column: &str,
    cap: usize,
) -> Vec<SeriesRow> {
    if charted.is_empty() {
        return Vec::new();
    }
    grouped_totals(dataset, charted, group_column, cap)
        .into_iter()
        .map(|group| SeriesRow {
            label: group.key,
            values: group.totals,
        })
        .collect()
}

fn indexed_rows(dataset: &Dataset, charted: &[String]) -> Vec<SeriesRow> {
    if charted.is_empty() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .take(INDEX_FALLBACK_ROWS)
        .enumerate()
        .map(|(index, record)| SeriesRow {
            label: format!("Registro {}", index + 1),
            values: charted
                .iter()
                .map(|column| (column.clone(), record.get(column).coerced()))
                .collect(),
        })
        .collect()
}
