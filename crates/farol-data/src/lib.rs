//! Schema inference and data providers for the insight engine
//!
//! This crate sits between the external CSV-parsing collaborator and the
//! analysis components: providers hand over rows of named fields, and the
//! schema profile classifies the resulting columns so downstream components
//! know which statistics and charts apply.

pub mod provider;
pub mod schema;

// Re-exports
pub use provider::{DatasetProvider, ParsedRows};
pub use schema::{ColumnClass, SchemaProfile};
