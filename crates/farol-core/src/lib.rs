//! Core data model for the Farol 360 insight engine
//!
//! This crate provides the abstractions shared by every analysis component:
//! the in-memory dataset derived from one uploaded CSV file, the conversation
//! model for the chat assistant, and the onboarding context consumed by its
//! fallback responses.

pub mod conversation;
pub mod dataset;
pub mod onboarding;

// Re-export commonly used types
pub use conversation::{Conversation, Message, MessageId, Role};
pub use dataset::{Cell, DataStatus, Dataset, Record};
pub use onboarding::OnboardingContext;

use thiserror::Error;

/// Errors raised when a dataset violates its construction invariants.
///
/// Data-quality problems (blank or unparseable cells) are never errors at
/// this layer; they are absorbed by the numeric coercion rules downstream.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("record {index} references unknown column: {column}")]
    UnknownColumn { index: usize, column: String },

    #[error("other error: {0}")]
    Other(String),
}
