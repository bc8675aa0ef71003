//! Dashboard state: the single logical writer over the active dataset
//!
//! The dashboard owns the loaded dataset and the facet selections, and
//! recomputes every derived output eagerly and synchronously on each
//! change. Dataset sizes are bounded by single-file uploads, so there is no
//! incremental path; re-running on the same snapshot yields identical
//! output.

use std::sync::Arc;

use farol_core::{DataStatus, Dataset};
use farol_data::{DatasetProvider, SchemaProfile};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{summary_cards, summary_stats, ColumnAggregate, SummaryCards};
use crate::charts::{
    build_series, distribution, ChartSeries, Dimension, PieSlice, PIE_TOP_FILTERED,
    PIE_TOP_UNFILTERED,
};
use crate::facets::{apply_filters, facet_candidates, Facet, FacetFilter, ALL_VALUES, FACET_SLOTS};

/// Records shown in the table preview
pub const TABLE_PREVIEW_ROWS: usize = 20;

/// Placeholder shown for blank cells in the table preview
const BLANK_PREVIEW_CELL: &str = "-";

/// Headline counts for the dashboard stat cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub record_count: usize,
    pub column_count: usize,
    pub numeric_column_count: usize,
}

/// Everything the presentation layer needs for one snapshot of the active
/// (possibly filtered) dataset
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Neutral status instead of errors: empty upload and nothing-to-chart
    /// are normal states
    pub status: DataStatus,
    pub overview: DatasetOverview,
    pub columns: Vec<String>,
    pub stats: IndexMap<String, ColumnAggregate>,
    pub cards: Option<SummaryCards>,
    pub series: ChartSeries,
    pub distribution: Vec<PieSlice>,
    pub facets: Vec<Facet>,
    /// First records of the active dataset, blanks shown as "-"
    pub preview: Vec<Vec<String>>,
}

impl DashboardView {
    fn neutral() -> Self {
        Self {
            status: DataStatus::Empty,
            overview: DatasetOverview::default(),
            columns: Vec::new(),
            stats: IndexMap::new(),
            cards: None,
            series: empty_series(),
            distribution: Vec::new(),
            facets: Vec::new(),
            preview: Vec::new(),
        }
    }
}

fn empty_series() -> ChartSeries {
    ChartSeries {
        dimension: Dimension::RowIndex,
        rows: Vec::new(),
        bar_columns: Vec::new(),
        overlay_column: None,
    }
}

struct DashboardInner {
    dataset: Dataset,
    facets: Vec<Facet>,
    view: DashboardView,
}

/// Shared dashboard state.
///
/// Cloning shares the same underlying state, mirroring how the UI layer
/// passes one context around. The lock serializes the single logical
/// writer with any readers; there is no background computation.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<RwLock<DashboardInner>>,
}

impl Dashboard {
    /// Dashboard with no dataset loaded
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(DashboardInner {
                dataset: Dataset::empty(),
                facets: Vec::new(),
                view: DashboardView::neutral(),
            })),
        }
    }

    /// Replace the loaded dataset, resetting every facet to "all"
    pub fn load_dataset(&self, dataset: Dataset) {
        let mut inner = self.inner.write();
        info!(
            records = dataset.record_count(),
            columns = dataset.column_count(),
            "loading dataset"
        );
        let profile = SchemaProfile::detect(&dataset);
        inner.facets = facet_candidates(&dataset, &profile)
            .into_iter()
            .map(|column| Facet::over(&dataset, column))
            .collect();
        inner.dataset = dataset;
        recompute(&mut inner);
    }

    /// Fetch from a provider and load the result
    pub async fn load_from(&self, provider: &dyn DatasetProvider) -> anyhow::Result<()> {
        let dataset = provider.fetch().await?;
        self.load_dataset(dataset);
        Ok(())
    }

    /// Drop the loaded dataset and all selections
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.dataset = Dataset::empty();
        inner.facets = Vec::new();
        recompute(&mut inner);
    }

    /// Point a facet slot at another column. The slot's selected value
    /// resets to "all" so a stale value can never outlive its column.
    pub fn set_facet_column(&self, slot: usize, column: String) {
        if slot >= FACET_SLOTS {
            return;
        }
        let mut inner = self.inner.write();
        let facet = Facet::over(&inner.dataset, column);
        if slot < inner.facets.len() {
            inner.facets[slot] = facet;
        } else {
            inner.facets.push(facet);
        }
        recompute(&mut inner);
    }

    /// Select a value for a facet slot ([`ALL_VALUES`] deactivates it)
    pub fn set_facet_value(&self, slot: usize, value: String) {
        let mut inner = self.inner.write();
        if let Some(facet) = inner.facets.get_mut(slot) {
            facet.value = value;
            recompute(&mut inner);
        }
    }

    /// Reset every facet to "all" without touching the dataset
    pub fn clear_filters(&self) {
        let mut inner = self.inner.write();
        for facet in &mut inner.facets {
            facet.value = ALL_VALUES.to_string();
        }
        recompute(&mut inner);
    }

    /// Snapshot of the current derived view
    pub fn view(&self) -> DashboardView {
        self.inner.read().view.clone()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

fn recompute(inner: &mut DashboardInner) {
    let filters: Vec<FacetFilter> = inner
        .facets
        .iter()
        .map(|facet| FacetFilter {
            column: facet.column.clone(),
            value: facet.value.clone(),
        })
        .collect();
    let filtered = inner.facets.iter().any(Facet::is_active);

    let active = apply_filters(&inner.dataset, &filters);
    let profile = SchemaProfile::detect(&active);

    let status = if active.is_empty() {
        DataStatus::Empty
    } else if !profile.has_numeric_columns() {
        DataStatus::NoNumericColumns
    } else {
        DataStatus::Ready
    };

    let (stats, cards, series, slices) = if status == DataStatus::Ready {
        let stats = summary_stats(&active, &profile.numeric_columns);
        let cards = profile
            .first_numeric()
            .and_then(|column| summary_cards(&active, column));
        let series = build_series(&active, &profile);
        let top = if filtered {
            PIE_TOP_FILTERED
        } else {
            PIE_TOP_UNFILTERED
        };
        let slices = distribution(&active, &profile, top);
        (stats, cards, series, slices)
    } else {
        (IndexMap::new(), None, empty_series(), Vec::new())
    };

    debug!(?status, records = active.record_count(), "recomputed view");

    inner.view = DashboardView {
        status,
        overview: DatasetOverview {
            record_count: active.record_count(),
            column_count: active.column_count(),
            numeric_column_count: profile.numeric_columns.len(),
        },
        columns: active.columns().to_vec(),
        stats,
        cards,
        series,
        distribution: slices,
        facets: inner.facets.clone(),
        preview: active
            .records()
            .iter()
            .take(TABLE_PREVIEW_ROWS)
            .map(|record| {
                active
                    .columns()
                    .iter()
                    .map(|column| {
                        let cell = record.get(column);
                        if cell.is_blank() {
                            BLANK_PREVIEW_CELL.to_string()
                        } else {
                            cell.as_str().to_string()
                        }
                    })
                    .collect()
            })
            .collect(),
    };
}
