//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health                    - API health check
//!
//! # Auth
//! POST /api/auth/register             - Create an admin account
//! POST /api/auth/login                - Exchange credentials for a bearer token
//!
//! # Sync triggers (also fired by the background scheduler)
//! POST /api/shopify/sync-products     - Fetch and reconcile products
//! POST /api/shopify/sync-customers    - Fetch and reconcile customers
//! POST /api/shopify/sync-orders       - Fetch and reconcile orders
//! GET  /api/shopify/products-test     - Source connectivity check
//!
//! # Diagnostics
//! POST /api/test-insert-product       - Strict insert (409 on duplicate key)
//!
//! # Metrics (bearer token required)
//! GET  /api/metrics/summary           - Totals: customers, orders, revenue
//! GET  /api/metrics/orders-by-date    - Daily order/revenue series for a range
//! GET  /api/metrics/top-customers     - Top 5 customers by summed spend
//! ```

pub mod auth;
pub mod diagnostics;
pub mod metrics;
pub mod shopify;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/shopify/sync-products", post(shopify::sync_products))
        .route("/api/shopify/sync-customers", post(shopify::sync_customers))
        .route("/api/shopify/sync-orders", post(shopify::sync_orders))
        .route("/api/shopify/products-test", get(shopify::products_test))
        .route(
            "/api/test-insert-product",
            post(diagnostics::test_insert_product),
        )
        .route("/api/metrics/summary", get(metrics::summary))
        .route("/api/metrics/orders-by-date", get(metrics::orders_by_date))
        .route("/api/metrics/top-customers", get(metrics::top_customers))
}

/// API-shaped health check.
async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "message": "Backend is running"}))
}
