//! Database operations for the `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `admin_users` - Dashboard login accounts (token auth)
//! - `products` - Reconciled Shopify products, keyed by `external_id`
//! - `customers` - Reconciled Shopify customers, keyed by `external_id`
//! - `orders` - Reconciled Shopify orders, keyed by `external_id`
//!
//! Every commerce table is written exclusively through its repository's
//! atomic upsert; there is no delete path (rows removed upstream are
//! retained indefinitely).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p storepulse-cli -- migrate
//! ```

pub mod admin_users;
pub mod customers;
pub mod metrics;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use customers::CustomerRepository;
pub use metrics::MetricsRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate unique key).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Outcome of an idempotent upsert.
///
/// Repeating an upsert for the same `external_id` always classifies as
/// `Updated` - never a duplicate row, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was inserted.
    Created,
    /// An existing row was overwritten.
    Updated,
}

impl UpsertOutcome {
    /// Interpret the `(xmax = 0)` marker returned by an
    /// `INSERT ... ON CONFLICT DO UPDATE ... RETURNING` statement.
    #[must_use]
    pub const fn from_inserted(inserted: bool) -> Self {
        if inserted { Self::Created } else { Self::Updated }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
