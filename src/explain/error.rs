use thiserror::Error;

use crate::generation::GenerationError;

/// Errors returned by [`ExplanationService::explain`](super::ExplanationService::explain).
#[derive(Debug, Error)]
pub enum ExplainError {
    /// Required input is missing; `fields` names each one.
    #[error("missing required field(s): {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl ExplainError {
    pub fn is_upstream(&self) -> bool {
        matches!(self, ExplainError::Generation(_))
    }
}
