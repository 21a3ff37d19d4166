use std::sync::Arc;

use kart_products::InMemoryCatalog;
use kart_promo::QuorumPromoValidator;
use kart_sales::OrderPricingPipeline;

use crate::config::AppConfig;

pub type OrderPipeline = OrderPricingPipeline<Arc<InMemoryCatalog>, Arc<QuorumPromoValidator>>;

/// Shared state behind every handler. Read-only after construction.
pub struct AppServices {
    pub catalog: Arc<InMemoryCatalog>,
    pub promos: Arc<QuorumPromoValidator>,
    pub orders: OrderPipeline,
}

impl AppServices {
    pub fn new(catalog: InMemoryCatalog, promos: QuorumPromoValidator) -> Self {
        let catalog = Arc::new(catalog);
        let promos = Arc::new(promos);
        let orders = OrderPricingPipeline::new(catalog.clone(), promos.clone());
        Self {
            catalog,
            promos,
            orders,
        }
    }
}

/// Wire the sample catalog and the file-backed promo validator from `config`.
pub fn build_services(config: &AppConfig) -> AppServices {
    let promos = QuorumPromoValidator::new(config.coupon_files.iter().cloned())
        .with_timeout(config.promo_timeout);
    AppServices::new(InMemoryCatalog::with_sample_products(), promos)
}
