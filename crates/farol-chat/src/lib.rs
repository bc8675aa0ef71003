//! Rule-based chat assistant over the loaded dataset
//!
//! The assistant answers a fixed set of canned questions from keyword
//! matching, using schema inference and aggregation outputs. There is no
//! language understanding beyond the ordered keyword table.

pub mod responder;
pub mod rules;

// Re-exports
pub use responder::{ChatError, ChatSession, ChatState, RESPONSE_DELAY};
pub use rules::{match_topic, Rule, Topic, RULES};
