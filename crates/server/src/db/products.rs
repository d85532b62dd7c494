//! Product repository for database operations.
//!
//! Products are reconciled from the upstream source keyed by their stable
//! `external_id`; the upsert is a single atomic statement so that repeated
//! or racing reconciliations of the same record can never produce a
//! duplicate row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use storepulse_core::{ExternalId, ProductId};

use super::{RepositoryError, UpsertOutcome};

/// A locally reconciled product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Local row ID.
    pub id: ProductId,
    /// Stable upstream identifier (serialized as a string).
    pub external_id: ExternalId,
    /// Product title.
    pub title: String,
    /// Price of the first listed variant, absent when the product has none.
    pub price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written by a product reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub external_id: ExternalId,
    pub title: String,
    pub price: Option<Decimal>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reconcile one product: create it if its `external_id` is unseen,
    /// otherwise overwrite the mutable fields.
    ///
    /// The `(xmax = 0)` marker distinguishes a fresh insert from an
    /// overwrite without a second round trip.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(&self, product: &NewProduct) -> Result<UpsertOutcome, RepositoryError> {
        let inserted: bool = sqlx::query_scalar(
            r"
            INSERT INTO products (external_id, title, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (external_id) DO UPDATE SET
                title = EXCLUDED.title,
                price = EXCLUDED.price,
                updated_at = now()
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(product.external_id)
        .bind(&product.title)
        .bind(product.price)
        .fetch_one(self.pool)
        .await?;

        Ok(UpsertOutcome::from_inserted(inserted))
    }

    /// Insert a product without upsert semantics.
    ///
    /// Used by the diagnostic insert endpoint; unlike [`Self::upsert`],
    /// a duplicate `external_id` is an error here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the `external_id` already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (external_id, title, price)
            VALUES ($1, $2, $3)
            RETURNING id, external_id, title, price, created_at, updated_at
            ",
        )
        .bind(product.external_id)
        .bind(&product.title)
        .bind(product.price)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "product with the same external id already exists".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })
    }

    /// Get a product by its upstream identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_external_id(
        &self,
        external_id: ExternalId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, Product>(
            r"
            SELECT id, external_id, title, price, created_at, updated_at
            FROM products
            WHERE external_id = $1
            ",
        )
        .bind(external_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
