//! Boundary to the external CSV-parsing collaborator
//!
//! Parsing lives outside the engine. A provider hands over rows of named
//! fields from wherever they were parsed (browser upload, cache, test
//! fixture) and the engine validates them into a [`Dataset`] exactly once.
//! The engine treats the fetch as an opaque awaited call; retry and backoff
//! policies belong to the caller.

use async_trait::async_trait;
use farol_core::Dataset;
use tracing::info;

/// Source of parsed rows, implemented by the upload and persistence
/// collaborators
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    /// Fetch the full dataset snapshot
    async fn fetch(&self) -> anyhow::Result<Dataset>;

    /// Human-readable source name (file name, table, ...)
    fn source_name(&self) -> &str;
}

/// In-memory provider over rows a parser already produced.
///
/// This is the shape a header-aware CSV parser delivers: one header list
/// plus positional rows aligned with it.
pub struct ParsedRows {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ParsedRows {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }
}

#[async_trait]
impl DatasetProvider for ParsedRows {
    async fn fetch(&self) -> anyhow::Result<Dataset> {
        let dataset = Dataset::from_rows(self.columns.clone(), self.rows.clone())?;
        info!(
            source = %self.name,
            records = dataset.record_count(),
            columns = dataset.column_count(),
            "fetched dataset"
        );
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parsed_rows_round_trip() {
        let provider = ParsedRows::new(
            "vendas.csv",
            vec!["Produto".to_string(), "Vendas".to_string()],
            vec![
                vec!["A".to_string(), "100".to_string()],
                vec!["B".to_string(), "200".to_string()],
            ],
        );

        let dataset = provider.fetch().await.unwrap();
        assert_eq!(dataset.record_count(), 2);
        assert_eq!(dataset.columns(), ["Produto", "Vendas"]);
        assert_eq!(dataset.records()[1].get("Vendas").as_str(), "200");
        assert_eq!(provider.source_name(), "vendas.csv");
    }

    #[tokio::test]
    async fn test_invalid_rows_fail_fast() {
        let provider = ParsedRows::new(
            "broken.csv",
            vec!["a".to_string()],
            vec![vec!["1".to_string(), "2".to_string()]],
        );
        assert!(provider.fetch().await.is_err());
    }
}
