use axum::{
    routing::{get, post},
    Router,
};

pub mod orders;
pub mod products;
pub mod system;

/// Endpoints open to any caller.
pub fn public() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(products::router())
}

/// Endpoints behind the api key check.
pub fn protected() -> Router {
    Router::new().route("/order", post(orders::place_order))
}
