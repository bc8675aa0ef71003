//! Distribution slices: category counts with a histogram fallback
//!
//! With a category-like column the distribution counts occurrences per
//! distinct value. Without one it falls back to a fixed five-bucket linear
//! histogram over the first numeric column's positive values.

use farol_core::Dataset;
use farol_data::SchemaProfile;
use indexmap::IndexMap;
use serde::Serialize;

/// Slices kept in the unfiltered distribution
pub const PIE_TOP_UNFILTERED: usize = 5;

/// Slices kept while facet filters are active
pub const PIE_TOP_FILTERED: usize = 6;

/// Label under which blank cells are counted
const BLANK_SLICE_LABEL: &str = "Outros";

/// Histogram bucket labels, low to high
const BUCKET_LABELS: [&str; 5] = ["Muito Baixo", "Baixo", "Médio", "Alto", "Muito Alto"];

/// One distribution slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: usize,
}

/// Count occurrences per distinct value of `column`, sorted descending by
/// count with ties kept in first-encounter order, truncated to `top`
pub fn category_slices(dataset: &Dataset, column: &str, top: usize) -> Vec<PieSlice> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in dataset.records() {
        let cell = record.get(column);
        let name = if cell.is_blank() {
            BLANK_SLICE_LABEL.to_string()
        } else {
            cell.as_str().to_string()
        };
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .map(|(name, value)| PieSlice { name, value })
        .collect();
    // Stable sort keeps encounter order among equal counts
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices.truncate(top);
    slices
}

/// Fixed five-bucket linear histogram over the positive values of `column`.
///
/// Bucket edges sit at 20/40/60/80% of the [min, max] span; empty buckets
/// are omitted. A zero span puts every value in the first bucket.
pub fn histogram_slices(dataset: &Dataset, column: &str) -> Vec<PieSlice> {
    let values: Vec<f64> = dataset
        .records()
        .iter()
        .filter_map(|record| record.get(column).numeric_view())
        .filter(|value| *value > 0.0)
        .collect();

    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut counts = [0usize; BUCKET_LABELS.len()];
    for value in &values {
        let bucket = if span > 0.0 {
            (((value - min) / span) * BUCKET_LABELS.len() as f64) as usize
        } else {
            0
        };
        counts[bucket.min(BUCKET_LABELS.len() - 1)] += 1;
    }

    BUCKET_LABELS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| PieSlice {
            name: label.to_string(),
            value: count,
        })
        .collect()
}

/// Distribution for one dataset snapshot: category counts when a
/// category-like column exists, else the numeric histogram fallback
pub fn distribution(dataset: &Dataset, profile: &SchemaProfile, top: usize) -> Vec<PieSlice> {
    if let Some(category_column) = &profile.category_column {
        return category_slices(dataset, category_column, top);
    }
    if let Some(numeric_column) = profile.first_numeric() {
        return histogram_slices(dataset, numeric_column);
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: Vec<Vec<&str>>) -> Dataset {
        Dataset::from_rows(
            columns.iter().map(|name| name.to_string()).collect(),
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_category_counts_scenario() {
        let data = dataset(&["Categoria"], vec![vec!["X"], vec!["X"], vec!["Y"]]);
        let slices = category_slices(&data, "Categoria", PIE_TOP_UNFILTERED);
        assert_eq!(
            slices,
            vec![
                PieSlice { name: "X".to_string(), value: 2 },
                PieSlice { name: "Y".to_string(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_encounter_order() {
        let data = dataset(
            &["Categoria"],
            vec![vec!["B"], vec!["A"], vec!["B"], vec!["A"], vec!["C"]],
        );
        let slices = category_slices(&data, "Categoria", PIE_TOP_UNFILTERED);
        let names: Vec<&str> = slices.iter().map(|slice| slice.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_top_cap_and_blank_label() {
        let data = dataset(
            &["Categoria"],
            vec![
                vec!["a"], vec!["a"], vec!["b"], vec!["b"], vec!["c"],
                vec!["d"], vec!["e"], vec!["f"], vec![""],
            ],
        );
        let slices = category_slices(&data, "Categoria", PIE_TOP_UNFILTERED);
        assert_eq!(slices.len(), PIE_TOP_UNFILTERED);
        assert_eq!(slices[0].name, "a");
        assert_eq!(slices[1].name, "b");

        let all = category_slices(&data, "Categoria", usize::MAX);
        assert!(all.iter().any(|slice| slice.name == "Outros"));
    }

    #[test]
    fn test_histogram_buckets_and_omission() {
        let data = dataset(
            &["Valor"],
            vec![vec!["10"], vec!["12"], vec!["100"], vec!["-5"], vec!["0"]],
        );
        let slices = histogram_slices(&data, "Valor");
        // 10 and 12 land low, 100 lands high; middle buckets are omitted
        assert_eq!(
            slices,
            vec![
                PieSlice { name: "Muito Baixo".to_string(), value: 2 },
                PieSlice { name: "Muito Alto".to_string(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_zero_span_histogram_uses_single_low_bucket() {
        let data = dataset(&["Valor"], vec![vec!["7"], vec!["7"], vec!["7"]]);
        let slices = histogram_slices(&data, "Valor");
        assert_eq!(
            slices,
            vec![PieSlice { name: "Muito Baixo".to_string(), value: 3 }]
        );
    }

    #[test]
    fn test_distribution_prefers_category_column() {
        let data = dataset(
            &["Categoria", "Vendas"],
            vec![vec!["X", "1"], vec!["Y", "2"]],
        );
        let profile = SchemaProfile::detect(&data);
        let slices = distribution(&data, &profile, PIE_TOP_UNFILTERED);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].name, "X");
    }

    #[test]
    fn test_distribution_falls_back_to_histogram() {
        let data = dataset(&["Vendas"], vec![vec!["5"], vec!["5"]]);
        let profile = SchemaProfile::detect(&data);
        let slices = distribution(&data, &profile, PIE_TOP_UNFILTERED);
        assert_eq!(slices[0].name, "Muito Baixo");
    }
}
