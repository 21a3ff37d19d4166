use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kart_core::OrderId;
use kart_products::Product;

use crate::error::{OrderError, RequestIssue};

/// One cart line as sent by the client.
///
/// Missing fields deserialize to empty/zero so they are reported by
/// [`OrderRequest::validate`] rather than as a JSON error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: i64,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }

    pub fn validate(&self) -> Result<(), RequestIssue> {
        if self.product_id.trim().is_empty() {
            return Err(RequestIssue::MissingProductId);
        }
        if self.quantity <= 0 {
            return Err(RequestIssue::NonPositiveQuantity);
        }
        Ok(())
    }
}

/// A cart submitted for pricing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    pub fn new(items: impl IntoIterator<Item = OrderItem>) -> Self {
        Self {
            coupon_code: None,
            items: items.into_iter().collect(),
        }
    }

    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into());
        self
    }

    /// The coupon code, if one was supplied. An empty string counts as absent;
    /// whitespace-only does not (it is reported as a malformed code).
    pub fn coupon(&self) -> Option<&str> {
        self.coupon_code.as_deref().filter(|c| !c.is_empty())
    }

    /// Structural checks: at least one item, each with a product id and a
    /// positive quantity. Reports the first offending item.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::request(RequestIssue::NoItems));
        }
        for (index, item) in self.items.iter().enumerate() {
            item.validate()
                .map_err(|issue| OrderError::item(index, issue))?;
        }
        Ok(())
    }
}

/// A priced order. Built once per successful placement and never mutated.
///
/// `products[i]` is the catalog snapshot resolved for `items[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedOrder {
    pub id: OrderId,
    /// Amount due after the discount.
    pub total: f64,
    pub discount: f64,
    pub items: Vec<OrderItem>,
    pub products: Vec<Product>,
    pub placed_at: DateTime<Utc>,
}

impl PricedOrder {
    /// Total before the discount was applied.
    pub fn subtotal(&self) -> f64 {
        self.total + self.discount
    }
}
