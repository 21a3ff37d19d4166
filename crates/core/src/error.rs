//! Error taxonomy shared by every crate in the workspace.

use serde::{Deserialize, Serialize};

/// Closed set of failure kinds.
///
/// Each crate keeps its own error enum with structured context; this is the
/// common classification the HTTP boundary maps to status codes. The domain
/// crates never deal in transport codes themselves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty item list, or an item with an empty id / non-positive quantity.
    InvalidOrderRequest,
    /// An order item (or a product path segment) does not name a valid product.
    InvalidProductId,
    /// A product lookup outside of order placement found nothing.
    ProductNotFound,
    /// Coupon code malformed, or not confirmed by a quorum of coupon files.
    InvalidPromoCode,
    /// The process is misconfigured (e.g. fewer than two coupon files).
    Config,
    /// A coupon file could not be opened or read.
    Io,
    /// The caller cancelled before a decision was reached.
    Cancelled,
    /// The validation deadline elapsed before a decision was reached.
    DeadlineExceeded,
    /// Missing or wrong API key.
    Unauthorized,
    /// Request body was not valid JSON for the expected shape.
    InvalidJson,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidOrderRequest => "invalid_order_request",
            ErrorKind::InvalidProductId => "invalid_product_id",
            ErrorKind::ProductNotFound => "product_not_found",
            ErrorKind::InvalidPromoCode => "invalid_promo_code",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::DeadlineExceeded => "deadline_exceeded",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::InvalidJson => "invalid_json",
            ErrorKind::Internal => "internal",
        }
    }

    /// Whether the failure was caused by the client's input (as opposed to the
    /// server's state or environment).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidOrderRequest
                | ErrorKind::InvalidProductId
                | ErrorKind::ProductNotFound
                | ErrorKind::InvalidPromoCode
                | ErrorKind::Unauthorized
                | ErrorKind::InvalidJson
        )
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_as_str() {
        for kind in [
            ErrorKind::InvalidOrderRequest,
            ErrorKind::InvalidProductId,
            ErrorKind::InvalidPromoCode,
            ErrorKind::DeadlineExceeded,
            ErrorKind::Internal,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str().unwrap(), kind.as_str());
        }
    }

    #[test]
    fn environment_failures_are_not_client_errors() {
        assert!(ErrorKind::InvalidPromoCode.is_client_error());
        assert!(!ErrorKind::Config.is_client_error());
        assert!(!ErrorKind::Io.is_client_error());
        assert!(!ErrorKind::Cancelled.is_client_error());
    }
}
