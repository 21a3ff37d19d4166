//! Order pricing pipeline.
//!
//! Steps run strictly in order and stop at the first failure:
//! 1. structural validation of the cart,
//! 2. coupon format check (local, no IO),
//! 3. product resolution and subtotal,
//! 4. quorum validation of the coupon and the flat discount,
//! 5. assembly of the [`PricedOrder`].

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use kart_core::OrderId;
use kart_products::{Product, ProductLookup};
use kart_promo::{PromoCode, PromoValidator};

use crate::error::{OrderError, PromoRejection};
use crate::order::{OrderItem, OrderRequest, PricedOrder};

/// Flat discount granted by any valid coupon.
pub const DISCOUNT_RATE: f64 = 0.10;

/// Discount for a pre-discount `subtotal`. Never negative for a non-negative subtotal.
pub fn discount_for(subtotal: f64) -> f64 {
    subtotal * DISCOUNT_RATE
}

pub struct OrderPricingPipeline<C, V> {
    catalog: C,
    promos: V,
}

impl<C, V> OrderPricingPipeline<C, V>
where
    C: ProductLookup,
    V: PromoValidator,
{
    pub fn new(catalog: C, promos: V) -> Self {
        Self { catalog, promos }
    }

    /// Price `request`, applying a discount when its coupon is confirmed.
    ///
    /// `cancel` bounds the coupon validation; when it fires before a decision
    /// the call fails with a cancellation error instead of a rejection.
    pub async fn place_order(
        &self,
        request: OrderRequest,
        cancel: &CancellationToken,
    ) -> Result<PricedOrder, OrderError> {
        request.validate()?;

        let promo = request
            .coupon()
            .map(|raw| PromoCode::parse(raw).map_err(|reason| OrderError::promo(raw, reason)))
            .transpose()?;

        let (products, subtotal) = self.resolve_items(&request.items)?;

        let discount = match &promo {
            Some(code) => {
                if !self.promos.validate(code.as_str(), cancel).await? {
                    return Err(OrderError::promo(code.as_str(), PromoRejection::NotFound));
                }
                discount_for(subtotal)
            }
            None => 0.0,
        };

        let order = PricedOrder {
            id: OrderId::new(),
            total: subtotal - discount,
            discount,
            items: request.items,
            products,
            placed_at: Utc::now(),
        };

        tracing::info!(
            order_id = %order.id,
            items = order.items.len(),
            subtotal,
            discount,
            total = order.total,
            promo = promo.as_ref().map(PromoCode::as_str),
            "order placed"
        );

        Ok(order)
    }

    /// Resolve every item in request order, summing `price * quantity`.
    fn resolve_items(&self, items: &[OrderItem]) -> Result<(Vec<Product>, f64), OrderError> {
        let mut products = Vec::with_capacity(items.len());
        let mut subtotal = 0.0;

        for (index, item) in items.iter().enumerate() {
            let product = self.catalog.get(&item.product_id).ok_or_else(|| {
                OrderError::InvalidProductId {
                    index,
                    product_id: item.product_id.clone(),
                }
            })?;
            subtotal += product.line_total(item.quantity);
            products.push(product);
        }

        Ok((products, subtotal))
    }
}
