use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use kart_core::ErrorKind;

use crate::app::errors::ApiError;
use crate::context::{CorrelationId, CORRELATION_HEADER};

/// Header carrying the client's API key on protected routes.
pub const API_KEY_HEADER: &str = "api_key";

#[derive(Clone)]
pub struct ApiKeyState {
    pub api_key: Arc<str>,
}

impl ApiKeyState {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

/// Reject requests whose `api_key` header is missing or does not match.
pub async fn require_api_key(
    State(state): State<ApiKeyState>,
    req: Request,
    next: Next,
) -> Response {
    match check_api_key(req.headers(), &state.api_key) {
        Ok(()) => next.run(req).await,
        Err(message) => {
            tracing::warn!(path = %req.uri().path(), "{message}");
            ApiError::new(ErrorKind::Unauthorized, message).into_response()
        }
    }
}

fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), &'static str> {
    let supplied = headers
        .get(API_KEY_HEADER)
        .ok_or("missing API key")?
        .to_str()
        .map_err(|_| "invalid API key")?;

    if supplied != expected {
        return Err("invalid API key");
    }
    Ok(())
}

/// Attach a correlation id to the request, run the rest of the stack inside a
/// span carrying it, and echo it back on the response.
pub async fn correlation_id(mut req: Request, next: Next) -> Response {
    let correlation = CorrelationId::from_headers(req.headers());
    let span = tracing::info_span!(
        "request",
        correlation_id = %correlation,
        method = %req.method(),
        path = %req.uri().path(),
    );
    req.extensions_mut().insert(correlation.clone());

    let mut response = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| tracing::debug!(status = response.status().as_u16(), "request completed"));

    if let Ok(value) = HeaderValue::from_str(correlation.as_str()) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}
