use kart_core::ErrorKind;
use kart_promo::{FormatRejection, PromoError};
use thiserror::Error;

/// What is structurally wrong with an order request.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum RequestIssue {
    #[error("items are required")]
    NoItems,

    #[error("productId is required")]
    MissingProductId,

    #[error("quantity must be greater than 0")]
    NonPositiveQuantity,
}

/// Why a coupon code was refused.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum PromoRejection {
    #[error(transparent)]
    Format(#[from] FormatRejection),

    #[error("promo code not found in sufficient databases")]
    NotFound,
}

/// Order placement failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// `index` is the offending item, or `None` when the request as a whole is
    /// at fault (no items).
    #[error("invalid order request: {}", request_detail(.index, .issue))]
    InvalidOrderRequest {
        index: Option<usize>,
        issue: RequestIssue,
    },

    #[error("invalid product ID: item {index} references unknown product '{product_id}'")]
    InvalidProductId { index: usize, product_id: String },

    #[error("invalid promo code '{code}': {reason}")]
    InvalidPromoCode { code: String, reason: PromoRejection },

    /// The promo validator could not reach a decision.
    #[error("failed to validate promo code: {0}")]
    Promo(#[from] PromoError),
}

fn request_detail(index: &Option<usize>, issue: &RequestIssue) -> String {
    match index {
        Some(i) => format!("item at index {i}: {issue}"),
        None => issue.to_string(),
    }
}

impl OrderError {
    pub fn request(issue: RequestIssue) -> Self {
        Self::InvalidOrderRequest { index: None, issue }
    }

    pub fn item(index: usize, issue: RequestIssue) -> Self {
        Self::InvalidOrderRequest {
            index: Some(index),
            issue,
        }
    }

    pub fn promo(code: impl Into<String>, reason: impl Into<PromoRejection>) -> Self {
        Self::InvalidPromoCode {
            code: code.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::InvalidOrderRequest { .. } => ErrorKind::InvalidOrderRequest,
            OrderError::InvalidProductId { .. } => ErrorKind::InvalidProductId,
            OrderError::InvalidPromoCode { .. } => ErrorKind::InvalidPromoCode,
            OrderError::Promo(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            OrderError::item(2, RequestIssue::NonPositiveQuantity).to_string(),
            "invalid order request: item at index 2: quantity must be greater than 0"
        );
        assert_eq!(
            OrderError::request(RequestIssue::NoItems).to_string(),
            "invalid order request: items are required"
        );
        assert_eq!(
            OrderError::promo("SHORT", FormatRejection::TooShort).to_string(),
            "invalid promo code 'SHORT': promo code must be at least 8 characters"
        );
    }

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(
            OrderError::request(RequestIssue::NoItems).kind(),
            ErrorKind::InvalidOrderRequest
        );
        assert_eq!(
            OrderError::InvalidProductId {
                index: 0,
                product_id: "999".into()
            }
            .kind(),
            ErrorKind::InvalidProductId
        );
        assert_eq!(
            OrderError::promo("HAPPYHRS", PromoRejection::NotFound).kind(),
            ErrorKind::InvalidPromoCode
        );
        assert_eq!(
            OrderError::from(PromoError::Config {
                required: 2,
                configured: 1
            })
            .kind(),
            ErrorKind::Config
        );
        assert_eq!(
            OrderError::from(PromoError::DeadlineExceeded {
                timeout: Duration::from_secs(1)
            })
            .kind(),
            ErrorKind::DeadlineExceeded
        );
    }
}
