//! Facet selection and dataset filtering
//!
//! The user narrows the active dataset through up to two independent
//! (column, value) facets combined with a logical AND. Filtering always
//! produces a new dataset view; the loaded dataset is never mutated.

use ahash::AHashSet;
use farol_core::Dataset;
use farol_data::{ColumnClass, SchemaProfile};
use serde::Serialize;

/// Sentinel value meaning "no filtering on this slot"
pub const ALL_VALUES: &str = "";

/// Maximum number of simultaneous facet slots
pub const FACET_SLOTS: usize = 2;

/// One user-controlled facet: the column, its current selection, and the
/// values offered by the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    /// Column this facet filters on
    pub column: String,

    /// Selected value; [`ALL_VALUES`] when the slot is inactive
    pub value: String,

    /// Distinct values of the column, for the selection control
    pub available_values: Vec<String>,
}

impl Facet {
    /// Inactive facet over `column`, offering its distinct values
    pub fn over(dataset: &Dataset, column: String) -> Self {
        let available_values = distinct_values(dataset, &column);
        Self {
            column,
            value: ALL_VALUES.to_string(),
            available_values,
        }
    }

    pub fn is_active(&self) -> bool {
        self.value != ALL_VALUES
    }
}

/// An equality predicate on one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetFilter {
    pub column: String,
    pub value: String,
}

/// Pick up to [`FACET_SLOTS`] facet candidate columns.
///
/// Preference order: the category-vocabulary column, then the
/// date-vocabulary column, then the first non-numeric columns in column
/// order, skipping anything already chosen.
pub fn facet_candidates(dataset: &Dataset, profile: &SchemaProfile) -> Vec<String> {
    let mut chosen: Vec<String> = Vec::new();

    for preferred in [&profile.category_column, &profile.date_column] {
        if let Some(column) = preferred {
            if chosen.len() < FACET_SLOTS && !chosen.contains(column) {
                chosen.push(column.clone());
            }
        }
    }

    for column in dataset.columns() {
        if chosen.len() >= FACET_SLOTS {
            break;
        }
        if profile.class_of(column) == ColumnClass::Categorical && !chosen.contains(column) {
            chosen.push(column.clone());
        }
    }

    chosen
}

/// Sorted distinct non-blank values of a column
pub fn distinct_values(dataset: &Dataset, column: &str) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut values: Vec<String> = Vec::new();

    for record in dataset.records() {
        let cell = record.get(column);
        if cell.is_blank() {
            continue;
        }
        if seen.insert(cell.as_str().to_string()) {
            values.push(cell.as_str().to_string());
        }
    }

    values.sort();
    values
}

/// Narrow the dataset with a logical AND of the given filters.
///
/// A filter whose value is [`ALL_VALUES`] is a no-op for its slot. The
/// result is a view over the same records as `dataset`.
pub fn apply_filters(dataset: &Dataset, filters: &[FacetFilter]) -> Dataset {
    let active: Vec<&FacetFilter> = filters
        .iter()
        .filter(|filter| filter.value != ALL_VALUES)
        .collect();

    if active.is_empty() {
        return dataset.clone();
    }

    dataset.retain_view(|record| {
        active
            .iter()
            .all(|filter| record.get(&filter.column).as_str() == filter.value)
    })
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

    fn filter(column: &str, value: &str) -> FacetFilter {
        FacetFilter {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_distinct_values_sorted_without_blanks() {
        let data = dataset(
            &["Região"],
            vec![vec!["Sul"], vec!["Norte"], vec![""], vec!["Sul"], vec!["  "]],
        );
        assert_eq!(distinct_values(&data, "Região"), vec!["Norte", "Sul"]);
    }

    #[test]
    fn test_apply_filters_is_idempotent() {
        let data = dataset(
            &["Região", "Vendas"],
            vec![vec!["Sul", "1"], vec!["Norte", "2"], vec!["Sul", "3"]],
        );
        let selection = vec![filter("Região", "Sul")];

        let once = apply_filters(&data, &selection);
        let twice = apply_filters(&once, &selection);
        assert_eq!(once, twice);
        assert_eq!(once.record_count(), 2);
    }

    #[test]
    fn test_all_sentinel_is_a_no_op() {
        let data = dataset(&["Região"], vec![vec!["Sul"], vec!["Norte"]]);
        let filtered = apply_filters(&data, &[filter("Região", ALL_VALUES)]);
        assert_eq!(filtered, data);
    }

    #[test]
    fn test_two_filters_combine_with_and() {
        let data = dataset(
            &["Região", "Tipo"],
            vec![
                vec!["Sul", "A"],
                vec!["Sul", "B"],
                vec!["Norte", "A"],
            ],
        );
        let filtered = apply_filters(&data, &[filter("Região", "Sul"), filter("Tipo", "A")]);
        assert_eq!(filtered.record_count(), 1);
        assert_eq!(filtered.records()[0].get("Tipo").as_str(), "A");
    }

    #[test]
    fn test_facet_candidates_prefer_vocabulary_columns() {
        let data = dataset(
            &["Produto", "Data", "Categoria", "Vendas"],
            vec![vec!["A", "2024-01-01", "X", "100"]],
        );
        let profile = SchemaProfile::detect(&data);
        let candidates = facet_candidates(&data, &profile);
        assert_eq!(candidates, vec!["Categoria", "Data"]);
    }

    #[test]
    fn test_facet_candidates_fill_with_non_numeric_columns() {
        let data = dataset(
            &["Produto", "Nome", "Vendas"],
            vec![vec!["A", "Ana", "100"]],
        );
        let profile = SchemaProfile::detect(&data);
        let candidates = facet_candidates(&data, &profile);
        // No vocabulary match: first non-numeric columns in order
        assert_eq!(candidates, vec!["Produto", "Nome"]);
    }
}
