use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use tokio_util::sync::CancellationToken;

use kart_core::ErrorKind;
use kart_sales::{OrderRequest, PricedOrder};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// `POST /order`: price the cart and apply the coupon when it is confirmed.
///
/// If the client disconnects, the handler future is dropped and the guard
/// cancels any coupon scans still running.
pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<PricedOrder>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected order body");
        ApiError::new(ErrorKind::InvalidJson, rejection.body_text())
    })?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match services.orders.place_order(request, &cancel).await {
        Ok(order) => Ok(Json(order)),
        Err(err) => {
            if err.kind().is_client_error() {
                tracing::info!(error = %err, "order rejected");
            } else {
                tracing::error!(error = %err, "order failed");
            }
            Err(err.into())
        }
    }
}
