use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use kart_core::ErrorKind;
use kart_sales::OrderError;

/// Error returned by a handler: a kind plus a client-facing message.
///
/// Renders as `{"error": {"code": <status>, "type": <reason>, "message": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }

    /// Message sent to the client. Server-side failures are not described.
    pub fn public_message(&self) -> &str {
        if self.status().is_server_error() {
            "internal server error"
        } else {
            &self.message
        }
    }
}

/// Transport status for each error kind. The only place kinds meet HTTP.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidOrderRequest | ErrorKind::InvalidProductId | ErrorKind::InvalidJson => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::ProductNotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::InvalidPromoCode => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Config | ErrorKind::Io | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            axum::Json(json!({
                "error": {
                    "code": status.as_u16(),
                    "type": status.canonical_reason().unwrap_or("Unknown"),
                    "message": self.public_message(),
                }
            })),
        )
            .into_response()
    }
}
