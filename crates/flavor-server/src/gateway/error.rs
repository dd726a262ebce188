use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use flavor::explain::ExplainError;
use flavor::search::SearchError;
use flavor::seed::SeedError;

/// Body returned for 5xx responses; detail stays in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("ingredient not found: {query}")]
    NotFound { query: String, message: String },

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("upstream failure: {0}")]
    Upstream(String),
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            query: None,
            message: None,
        }
    }
}

impl From<SearchError> for GatewayError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::NotFound { ref query } => GatewayError::NotFound {
                query: query.clone(),
                message: err.message(),
            },
            other => GatewayError::Upstream(other.to_string()),
        }
    }
}

impl From<ExplainError> for GatewayError {
    fn from(err: ExplainError) -> Self {
        match err {
            ExplainError::Validation { .. } => GatewayError::InvalidRequest(err.to_string()),
            ExplainError::Generation(e) => GatewayError::Upstream(e.to_string()),
        }
    }
}

impl From<SeedError> for GatewayError {
    fn from(err: SeedError) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();

        let (status, body) = match self {
            GatewayError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            GatewayError::NotFound { query, message } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Ingredient not found".to_string(),
                    query: Some(query),
                    message: Some(message),
                },
            ),
            GatewayError::RateLimited { retry_after_secs } => {
                headers.insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorResponse::new("Rate limit exceeded. Please try again later."),
                )
            }
            GatewayError::Upstream(detail) => {
                error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
                )
            }
        };

        (status, headers, Json(body)).into_response()
    }
}
