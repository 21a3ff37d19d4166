//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: catalog, promo validator and pricing pipeline
//! - `routes/`: HTTP handlers, one file per resource
//! - `errors.rs`: error kinds to status codes and JSON error bodies

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::middleware::{self, ApiKeyState, API_KEY_HEADER};

pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    let services = Arc::new(services::build_services(config));
    build_router(services, config)
}

/// Router over already-built services.
pub fn build_router(services: Arc<AppServices>, config: &AppConfig) -> Router {
    let api_key = ApiKeyState::new(config.api_key.as_str());

    // Protected routes: require the api key header.
    let protected = routes::protected().route_layer(axum::middleware::from_fn_with_state(
        api_key,
        middleware::require_api_key,
    ));

    Router::new()
        .merge(routes::public())
        .merge(protected)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(cors())
                .layer(axum::middleware::from_fn(middleware::correlation_id)),
        )
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
}
