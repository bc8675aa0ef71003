//! Renderer-agnostic chart data construction
//!
//! Bar, line and area charts share one series shape; the distribution chart
//! is either per-category counts or a histogram fallback. Nothing here
//! knows about any charting library.

pub mod format;
pub mod pie;
pub mod series;

// Re-export commonly used items
pub use format::{format_count, format_plain, format_value};
pub use pie::{
    category_slices, distribution, histogram_slices, PieSlice, PIE_TOP_FILTERED,
    PIE_TOP_UNFILTERED,
};
pub use series::{build_series, ChartSeries, Dimension, SeriesRow};
