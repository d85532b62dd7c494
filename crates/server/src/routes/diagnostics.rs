//! Diagnostic handlers.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use storepulse_core::ExternalId;

use crate::db::ProductRepository;
use crate::db::products::NewProduct;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/test-insert-product`
///
/// Inserts a fixed fake product through the strict (non-upsert) path.
/// The second call hits the uniqueness constraint and comes back as a
/// 409 conflict envelope - a quick end-to-end probe of the database,
/// the unique index, and the error mapping.
///
/// # Errors
///
/// Returns 409 when the fake product already exists.
pub async fn test_insert_product(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let product = ProductRepository::new(state.pool())
        .insert(&NewProduct {
            external_id: ExternalId::new(999_999_999),
            title: "Test Product From API".to_owned(),
            price: Some(Decimal::new(12_345, 2)),
        })
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "message": "Test product inserted",
        "product": product,
    })))
}
