use thiserror::Error;

/// Errors returned by key-value store backends.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("kv store unavailable: {0}")]
    Unavailable(String),

    #[error("kv operation on '{key}' failed: {message}")]
    OperationFailed { key: String, message: String },
}
