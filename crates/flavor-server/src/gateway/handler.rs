use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use flavor::cache::{CACHE_STATUS_HEADER, CacheStatus};
use flavor::explain::ExplainRequest;
use flavor::ratelimit::RateDecision;

use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedParams {
    pub start: Option<String>,
}

/// First usable client address among `names`. For list-valued headers such as
/// `X-Forwarded-For` the left-most entry is taken.
pub fn client_id(headers: &HeaderMap, names: &[String]) -> Option<String> {
    names.iter().find_map(|name| {
        headers
            .get(name.as_str())
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

async fn enforce_rate_limit(state: &AppState, headers: &HeaderMap) -> Result<(), GatewayError> {
    let client = client_id(headers, &state.client_ip_headers);
    match state.limiter.allow(client.as_deref()).await {
        RateDecision::Allowed { count } => {
            debug!(client = client.as_deref().unwrap_or("-"), count, "request admitted");
            Ok(())
        }
        RateDecision::Blocked { retry_after_secs } => {
            warn!(client = client.as_deref().unwrap_or("-"), "rate limited");
            Err(GatewayError::RateLimited { retry_after_secs })
        }
    }
}

fn with_cache_status<T: serde::Serialize>(payload: &T, status: CacheStatus) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_STATUS_HEADER,
        HeaderValue::from_static(status.as_header_value()),
    );
    (headers, Json(payload)).into_response()
}

#[instrument(skip(state, headers, params))]
pub async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Response, GatewayError> {
    enforce_rate_limit(&state, &headers).await?;

    let query = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| {
            GatewayError::InvalidRequest("Missing query parameter: ?q=ingredient".to_string())
        })?;

    let outcome = state.search.search(&query).await?;
    Ok(with_cache_status(&outcome.payload, outcome.cache))
}

#[instrument(skip(state, headers, body))]
pub async fn explain_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    enforce_rate_limit(&state, &headers).await?;

    let request: ExplainRequest = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request body: {}", e)))?;

    let outcome = state
        .explain
        .explain(&request.query, &request.matches)
        .await?;
    Ok(with_cache_status(&outcome.payload, outcome.cache))
}

#[instrument(skip(state, params))]
pub async fn seed_handler(
    State(state): State<AppState>,
    Query(params): Query<SeedParams>,
) -> Result<Response, GatewayError> {
    let start = match params.start.as_deref().map(str::trim) {
        None | Some("") => 0,
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            GatewayError::InvalidRequest(format!("Invalid start offset: {}", raw))
        })?,
    };

    let report = state.seeder.seed_batch(start).await?;
    Ok(Json(report).into_response())
}
