//! Sync trigger handlers and the source connectivity check.
//!
//! These are the same entry points the background scheduler fires; a
//! manual trigger overlapping a scheduled run is safe because
//! reconciliation is idempotent.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::services::SyncService;
use crate::state::AppState;

/// Page size for the connectivity check - just enough to prove the
/// credentials and envelope shape work.
const CONNECTIVITY_CHECK_LIMIT: u32 = 10;

/// `POST /api/shopify/sync-products`
///
/// # Errors
///
/// Surfaces the first upstream or repository failure verbatim.
pub async fn sync_products(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let report = SyncService::new(state.pool(), state.shopify())
        .sync_products()
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "message": "Products synced successfully",
        "totalFetched": report.total_fetched,
        "savedOrUpdated": report.saved_or_updated,
    })))
}

/// `POST /api/shopify/sync-customers`
///
/// # Errors
///
/// Surfaces the first upstream or repository failure verbatim.
pub async fn sync_customers(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let report = SyncService::new(state.pool(), state.shopify())
        .sync_customers()
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "message": "Customers synced successfully",
        "totalFetched": report.total_fetched,
        "savedOrUpdated": report.saved_or_updated,
    })))
}

/// `POST /api/shopify/sync-orders`
///
/// # Errors
///
/// Surfaces the first upstream or repository failure verbatim.
pub async fn sync_orders(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let report = SyncService::new(state.pool(), state.shopify())
        .sync_orders()
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "message": "Orders synced successfully",
        "totalFetched": report.total_fetched,
        "savedOrUpdated": report.saved_or_updated,
    })))
}

/// `GET /api/shopify/products-test`
///
/// Connectivity check: fetches a small page of products and echoes a
/// sample back without touching the store.
///
/// # Errors
///
/// Surfaces the upstream failure verbatim.
pub async fn products_test(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let products = state
        .shopify()
        .fetch_products(CONNECTIVITY_CHECK_LIMIT)
        .await?;

    let sample: Vec<_> = products.iter().take(2).collect();

    Ok(Json(json!({
        "status": "ok",
        "count": products.len(),
        "sample": sample,
    })))
}
