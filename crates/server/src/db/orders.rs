//! Order repository for database operations.
//!
//! `customer_external_id` is a weak, value-based reference to
//! `customers.external_id` - never a foreign key. An order may arrive
//! before its customer is reconciled (or reference one that never will
//! be), and the upsert must still succeed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use storepulse_core::{ExternalId, OrderId};

use super::{RepositoryError, UpsertOutcome};

/// A locally reconciled order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Local row ID.
    pub id: OrderId,
    /// Stable upstream identifier (serialized as a string).
    pub external_id: ExternalId,
    /// Weak reference to the owning customer's upstream identifier.
    pub customer_external_id: Option<ExternalId>,
    pub total_price: Option<Decimal>,
    pub currency: Option<String>,
    pub financial_status: Option<String>,
    pub fulfillment_status: Option<String>,
    /// When the order was processed upstream; absent until reported.
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written by an order reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub external_id: ExternalId,
    pub customer_external_id: Option<ExternalId>,
    pub total_price: Option<Decimal>,
    pub currency: Option<String>,
    pub financial_status: Option<String>,
    pub fulfillment_status: Option<String>,
    /// `None` means the upstream record omitted the timestamp; a stored
    /// value (if any) is left unchanged.
    pub processed_at: Option<DateTime<Utc>>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reconcile one order: create it if its `external_id` is unseen,
    /// otherwise overwrite the mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(&self, order: &NewOrder) -> Result<UpsertOutcome, RepositoryError> {
        let inserted: bool = sqlx::query_scalar(
            r"
            INSERT INTO orders (external_id, customer_external_id, total_price, currency,
                                financial_status, fulfillment_status, processed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (external_id) DO UPDATE SET
                customer_external_id = EXCLUDED.customer_external_id,
                total_price = EXCLUDED.total_price,
                currency = EXCLUDED.currency,
                financial_status = EXCLUDED.financial_status,
                fulfillment_status = EXCLUDED.fulfillment_status,
                processed_at = COALESCE(EXCLUDED.processed_at, orders.processed_at),
                updated_at = now()
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(order.external_id)
        .bind(order.customer_external_id)
        .bind(order.total_price)
        .bind(&order.currency)
        .bind(&order.financial_status)
        .bind(&order.fulfillment_status)
        .bind(order.processed_at)
        .fetch_one(self.pool)
        .await?;

        Ok(UpsertOutcome::from_inserted(inserted))
    }

    /// Get an order by its upstream identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_external_id(
        &self,
        external_id: ExternalId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(
            r"
            SELECT id, external_id, customer_external_id, total_price, currency,
                   financial_status, fulfillment_status, processed_at,
                   created_at, updated_at
            FROM orders
            WHERE external_id = $1
            ",
        )
        .bind(external_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
