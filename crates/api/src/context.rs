use axum::http::HeaderMap;
use uuid::Uuid;

/// Header carrying the request correlation id (in and out).
pub const CORRELATION_HEADER: &str = "x-correlation-id";

const MAX_CORRELATION_LEN: usize = 128;

/// Correlation id for a request.
///
/// Taken from the caller's `x-correlation-id` header when it is usable,
/// otherwise generated. Immutable for the lifetime of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(CORRELATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| is_usable(v))
            .map(|v| Self(v.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_usable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_CORRELATION_LEN
        && value.bytes().all(|b| b.is_ascii_graphic())
}

impl core::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
