//! Integration tests for the metrics endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database (migrations applied via sp-cli)
//! - The server running (cargo run -p storepulse-server)
//!
//! Seed sample data first for meaningful assertions: sp-cli seed
//!
//! Run with: cargo test -p storepulse-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;

use storepulse_integration_tests::{bearer_token, server_base_url};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_summary_shape_and_revenue_transport() {
    let client = Client::new();
    let base_url = server_base_url();
    let token = bearer_token(&client).await;

    let resp = client
        .get(format!("{base_url}/api/metrics/summary"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Summary request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Summary response is not JSON");
    assert_eq!(body["status"], "ok");
    assert!(body["totalCustomers"].is_i64());
    assert!(body["totalOrders"].is_i64());

    // Revenue travels as a decimal string, never a float
    let revenue = body["totalRevenue"]
        .as_str()
        .expect("totalRevenue must be a string");
    let revenue: Decimal = revenue.parse().expect("totalRevenue must parse as decimal");
    assert!(revenue >= Decimal::ZERO);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_orders_by_date_requires_both_bounds() {
    let client = Client::new();
    let base_url = server_base_url();
    let token = bearer_token(&client).await;

    for query in [
        "",
        "?from=2025-11-01",
        "?to=2025-11-30",
        "?from=11/01/2025&to=2025-11-30",
    ] {
        let resp = client
            .get(format!("{base_url}/api/metrics/orders-by-date{query}"))
            .bearer_auth(&token)
            .send()
            .await
            .expect("Orders-by-date request failed");

        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "query {query:?} must be rejected"
        );

        let body: Value = resp.json().await.expect("Error response is not JSON");
        assert_eq!(body["status"], "error");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_orders_by_date_series_is_bounded_and_ascending() {
    let client = Client::new();
    let base_url = server_base_url();
    let token = bearer_token(&client).await;

    let resp = client
        .get(format!(
            "{base_url}/api/metrics/orders-by-date?from=2025-11-01&to=2025-11-30"
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Orders-by-date request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Response is not JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["from"], "2025-11-01");
    assert_eq!(body["to"], "2025-11-30");

    let data = body["data"].as_array().expect("data must be an array");
    let dates: Vec<&str> = data
        .iter()
        .map(|row| row["date"].as_str().expect("row date must be a string"))
        .collect();

    // Every bucket inside the inclusive range, in ascending order
    for date in &dates {
        assert!(*date >= "2025-11-01" && *date <= "2025-11-30");
    }
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);

    for row in data {
        assert!(row["orderCount"].as_i64().expect("orderCount") >= 1);
        let revenue: Decimal = row["revenue"]
            .as_str()
            .expect("revenue must be a string")
            .parse()
            .expect("revenue must parse as decimal");
        assert!(revenue >= Decimal::ZERO);
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_top_customers_ranked_and_capped() {
    let client = Client::new();
    let base_url = server_base_url();
    let token = bearer_token(&client).await;

    let resp = client
        .get(format!("{base_url}/api/metrics/top-customers"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Top-customers request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Response is not JSON");
    assert_eq!(body["status"], "ok");

    let data = body["data"].as_array().expect("data must be an array");
    assert!(data.len() <= 5);

    let spends: Vec<Decimal> = data
        .iter()
        .map(|row| {
            row["totalSpent"]
                .as_str()
                .expect("totalSpent must be a string")
                .parse()
                .expect("totalSpent must parse as decimal")
        })
        .collect();

    // Ranked by spend, descending
    for pair in spends.windows(2) {
        assert!(pair[0] >= pair[1]);
    }

    for row in data {
        assert!(row["customerId"].is_i64());
        // name is a string or null - never an empty string
        assert_ne!(row["name"], "");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_top_customers_is_deterministic() {
    let client = Client::new();
    let base_url = server_base_url();
    let token = bearer_token(&client).await;

    let fetch = |client: &Client| {
        client
            .get(format!("{base_url}/api/metrics/top-customers"))
            .bearer_auth(&token)
            .send()
    };

    let first: Value = fetch(&client)
        .await
        .expect("First request failed")
        .json()
        .await
        .expect("First response is not JSON");
    let second: Value = fetch(&client)
        .await
        .expect("Second request failed")
        .json()
        .await
        .expect("Second response is not JSON");

    // Ties break on a stable key, so unchanged data yields an identical
    // ranking on every call
    assert_eq!(first["data"], second["data"]);
}
