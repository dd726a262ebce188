use thiserror::Error;

/// Errors from the text generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider request failed: {0}")]
    Provider(String),

    #[error("provider returned no text")]
    EmptyResponse,
}

impl From<genai::Error> for GenerationError {
    fn from(err: genai::Error) -> Self {
        GenerationError::Provider(err.to_string())
    }
}
