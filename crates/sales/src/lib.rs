//! Order placement: cart validation, pricing and promo discounts.
//!
//! Orders are priced and returned, never stored.

pub mod error;
pub mod order;
pub mod pricing;

pub use error::{OrderError, PromoRejection, RequestIssue};
pub use order::{OrderItem, OrderRequest, PricedOrder};
pub use pricing::{discount_for, OrderPricingPipeline, DISCOUNT_RATE};
