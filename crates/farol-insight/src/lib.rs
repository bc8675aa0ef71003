//! Derived statistics, facets and chart data for the insight engine
//!
//! Everything here is a pure function over one dataset snapshot: aggregation
//! totals, facet filtering, and renderer-agnostic chart series. The
//! [`Dashboard`] ties them together, recomputing every derived output
//! eagerly whenever the active dataset or filter selection changes.

pub mod aggregate;
pub mod charts;
pub mod dashboard;
pub mod facets;

// Re-exports
pub use aggregate::{
    grouped_totals, summary_cards, summary_stats, ColumnAggregate, GroupRow, SummaryCards,
    CATEGORY_GROUP_CAP, DATE_GROUP_CAP,
};
pub use charts::{
    build_series, category_slices, distribution, format_count, format_plain, format_value,
    histogram_slices, ChartSeries, Dimension, PieSlice, SeriesRow, PIE_TOP_FILTERED,
    PIE_TOP_UNFILTERED,
};
pub use dashboard::{Dashboard, DashboardView, DatasetOverview, TABLE_PREVIEW_ROWS};
pub use facets::{
    apply_filters, distinct_values, facet_candidates, Facet, FacetFilter, ALL_VALUES, FACET_SLOTS,
};
