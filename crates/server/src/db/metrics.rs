//! Aggregate metrics over the reconciled store.
//!
//! All three queries are read-only and derived purely from local rows -
//! they never touch the upstream source. They run against the store's
//! default read consistency and tolerate a concurrently running sync
//! (they return a valid snapshot, not necessarily the newest one).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use storepulse_core::CustomerId;

use super::RepositoryError;

/// How many customers the leaderboard returns.
pub const TOP_CUSTOMER_LIMIT: i64 = 5;

/// Store-wide totals.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreSummary {
    pub total_customers: i64,
    pub total_orders: i64,
    /// Sum of `orders.total_price`; zero when there are no orders.
    pub total_revenue: Decimal,
}

/// Orders and revenue for one calendar day.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyOrders {
    pub date: NaiveDate,
    pub order_count: i64,
    pub revenue: Decimal,
}

/// One leaderboard row: a customer joined to their reconciled orders.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerSpend {
    pub customer_id: CustomerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub orders_count: i64,
    /// Sum of the customer's order totals; zero for customers with no orders.
    pub total_spent: Decimal,
}

impl CustomerSpend {
    /// Space-joined concatenation of the non-blank name parts, or `None`
    /// when both are absent (never an empty string).
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        (!joined.is_empty()).then_some(joined)
    }
}

/// Repository for aggregate metrics queries.
pub struct MetricsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MetricsRepository<'a> {
    /// Create a new metrics repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count all customers and orders and sum all order totals.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summary(&self) -> Result<StoreSummary, RepositoryError> {
        let summary = sqlx::query_as::<_, StoreSummary>(
            r"
            SELECT
                (SELECT COUNT(*) FROM customers) AS total_customers,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COALESCE(SUM(total_price), 0) FROM orders) AS total_revenue
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(summary)
    }

    /// Orders grouped by the UTC calendar date of `processed_at`, within
    /// the inclusive range `[from, to]`.
    ///
    /// Orders with no processed timestamp are excluded. Days with no
    /// matching orders are omitted, not zero-filled. Rows come back in
    /// ascending date order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn orders_by_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyOrders>, RepositoryError> {
        let rows = sqlx::query_as::<_, DailyOrders>(
            r"
            SELECT
                (processed_at AT TIME ZONE 'utc')::date AS date,
                COUNT(*) AS order_count,
                COALESCE(SUM(total_price), 0) AS revenue
            FROM orders
            WHERE processed_at IS NOT NULL
              AND (processed_at AT TIME ZONE 'utc')::date BETWEEN $1 AND $2
            GROUP BY (processed_at AT TIME ZONE 'utc')::date
            ORDER BY date ASC
            ",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Top customers by summed order spend.
    ///
    /// Customers join orders by the weak `customer_external_id` reference;
    /// customers with no orders appear with zero count and spend, and
    /// orders whose reference dangles are attributed to nobody. Equal
    /// spends tie-break on the local customer ID so repeated calls over
    /// unchanged data return the same order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_customers(&self) -> Result<Vec<CustomerSpend>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerSpend>(
            r"
            SELECT
                c.id AS customer_id,
                c.first_name,
                c.last_name,
                c.email,
                COUNT(o.id) AS orders_count,
                COALESCE(SUM(o.total_price), 0) AS total_spent
            FROM customers c
            LEFT JOIN orders o ON o.customer_external_id = c.external_id
            GROUP BY c.id, c.first_name, c.last_name, c.email
            ORDER BY total_spent DESC, c.id ASC
            LIMIT $1
            ",
        )
        .bind(TOP_CUSTOMER_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
