//! Customer repository for database operations.
//!
//! `total_spent` is the lifetime spend figure reported by the upstream
//! source - it is independent of the locally reconciled order rows. An
//! upstream record that omits it must not clear a previously stored value,
//! hence the COALESCE in the upsert.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use storepulse_core::{CustomerId, ExternalId};

use super::{RepositoryError, UpsertOutcome};

/// A locally reconciled customer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Local row ID.
    pub id: CustomerId,
    /// Stable upstream identifier (serialized as a string).
    pub external_id: ExternalId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Upstream-reported lifetime spend.
    pub total_spent: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written by a customer reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub external_id: ExternalId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// `None` means the upstream record omitted the figure; the stored
    /// value (if any) is left unchanged.
    pub total_spent: Option<Decimal>,
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reconcile one customer: create it if its `external_id` is unseen,
    /// otherwise overwrite the mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(&self, customer: &NewCustomer) -> Result<UpsertOutcome, RepositoryError> {
        let inserted: bool = sqlx::query_scalar(
            r"
            INSERT INTO customers (external_id, first_name, last_name, email, phone, total_spent)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (external_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                total_spent = COALESCE(EXCLUDED.total_spent, customers.total_spent),
                updated_at = now()
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(customer.external_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.total_spent)
        .fetch_one(self.pool)
        .await?;

        Ok(UpsertOutcome::from_inserted(inserted))
    }

    /// Get a customer by its upstream identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_external_id(
        &self,
        external_id: ExternalId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, external_id, first_name, last_name, email, phone, total_spent,
                   created_at, updated_at
            FROM customers
            WHERE external_id = $1
            ",
        )
        .bind(external_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
