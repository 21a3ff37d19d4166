use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};

use kart_core::ErrorKind;
use kart_products::{Product, ProductLookup};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/product", get(list_products))
        .route("/product/:id", get(get_product))
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<Product>> {
    Json(services.catalog.list())
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    if !is_numeric_id(&id) {
        return Err(ApiError::new(
            ErrorKind::InvalidProductId,
            format!("invalid product ID '{id}': must be numeric"),
        ));
    }

    services.catalog.get(&id).map(Json).ok_or_else(|| {
        ApiError::new(ErrorKind::ProductNotFound, format!("product '{id}' not found"))
    })
}

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
