//! Metrics read handlers.
//!
//! All three endpoints answer purely from the reconciled local store and
//! sit behind the bearer-token gate. Money goes over the wire as decimal
//! strings, never floats.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::MetricsRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// `GET /api/metrics/summary` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    status: &'static str,
    total_customers: i64,
    total_orders: i64,
    total_revenue: Decimal,
}

/// `GET /api/metrics/summary`
///
/// # Errors
///
/// Returns 401 without a valid token, 500 on database failure.
pub async fn summary(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = MetricsRepository::new(state.pool()).summary().await?;

    Ok(Json(SummaryResponse {
        status: "ok",
        total_customers: summary.total_customers,
        total_orders: summary.total_orders,
        total_revenue: summary.total_revenue,
    }))
}

/// Raw query params for the date-range endpoint; both bounds required.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    from: Option<String>,
    to: Option<String>,
}

/// One day of the series.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRow {
    date: NaiveDate,
    order_count: i64,
    revenue: Decimal,
}

/// `GET /api/metrics/orders-by-date` response.
#[derive(Debug, Serialize)]
pub struct OrdersByDateResponse {
    status: &'static str,
    from: NaiveDate,
    to: NaiveDate,
    data: Vec<DailyRow>,
}

/// `GET /api/metrics/orders-by-date?from=YYYY-MM-DD&to=YYYY-MM-DD`
///
/// # Errors
///
/// Returns 400 when either bound is missing or malformed, 401 without a
/// valid token.
pub async fn orders_by_date(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<OrdersByDateResponse>, AppError> {
    let (from, to) = parse_range(&range)?;

    let rows = MetricsRepository::new(state.pool())
        .orders_by_date(from, to)
        .await?;

    Ok(Json(OrdersByDateResponse {
        status: "ok",
        from,
        to,
        data: rows
            .into_iter()
            .map(|row| DailyRow {
                date: row.date,
                order_count: row.order_count,
                revenue: row.revenue,
            })
            .collect(),
    }))
}

/// One leaderboard entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomerRow {
    customer_id: i32,
    name: Option<String>,
    email: Option<String>,
    orders_count: i64,
    total_spent: Decimal,
}

/// `GET /api/metrics/top-customers` response.
#[derive(Debug, Serialize)]
pub struct TopCustomersResponse {
    status: &'static str,
    data: Vec<TopCustomerRow>,
}

/// `GET /api/metrics/top-customers`
///
/// # Errors
///
/// Returns 401 without a valid token, 500 on database failure.
pub async fn top_customers(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<TopCustomersResponse>, AppError> {
    let rows = MetricsRepository::new(state.pool()).top_customers().await?;

    Ok(Json(TopCustomersResponse {
        status: "ok",
        data: rows
            .into_iter()
            .map(|row| TopCustomerRow {
                customer_id: row.customer_id.as_i32(),
                name: row.display_name(),
                email: row.email.clone(),
                orders_count: row.orders_count,
                total_spent: row.total_spent,
            })
            .collect(),
    }))
}

/// Validate the inclusive `[from, to]` calendar-date range.
fn parse_range(range: &DateRangeQuery) -> Result<(NaiveDate, NaiveDate), AppError> {
    let from = parse_bound(range.from.as_deref(), "from")?;
    let to = parse_bound(range.to.as_deref(), "to")?;
    Ok((from, to))
}

fn parse_bound(value: Option<&str>, name: &str) -> Result<NaiveDate, AppError> {
    let value = value.ok_or_else(|| {
        AppError::InvalidRange(format!(
            "query params 'from' and 'to' (YYYY-MM-DD) are required; missing '{name}'"
        ))
    })?;

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidRange(format!("invalid '{name}' date: {value}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(from: Option<&str>, to: Option<&str>) -> DateRangeQuery {
        DateRangeQuery {
            from: from.map(ToOwned::to_owned),
            to: to.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn test_parse_range_valid() {
        let (from, to) = parse_range(&query(Some("2025-11-01"), Some("2025-11-30"))).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
    }

    #[test]
    fn test_parse_range_missing_bound() {
        assert!(matches!(
            parse_range(&query(Some("2025-11-01"), None)),
            Err(AppError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_range(&query(None, Some("2025-11-30"))),
            Err(AppError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_range(&query(None, None)),
            Err(AppError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_parse_range_malformed_bound() {
        assert!(matches!(
            parse_range(&query(Some("11/01/2025"), Some("2025-11-30"))),
            Err(AppError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_range(&query(Some("2025-11-01"), Some("not-a-date"))),
            Err(AppError::InvalidRange(_))
        ));
    }
}
