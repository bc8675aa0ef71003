//! Onboarding questionnaire context

use serde::{Deserialize, Serialize};

/// Answers collected by the onboarding questionnaire.
///
/// Read-only input to the chat assistant's fallback response; the engine
/// never writes or validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingContext {
    /// Industry the customer operates in
    pub industry: String,

    /// Where the uploaded data comes from
    pub data_source: String,

    /// Analysis goals selected during onboarding
    pub goals: Vec<String>,
}
