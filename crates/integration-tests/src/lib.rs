//! Integration tests for StorePulse.
//!
//! These tests exercise a running server end-to-end over HTTP. They
//! require:
//! - A running `PostgreSQL` database with migrations applied
//!   (`sp-cli migrate`)
//! - The server running (`cargo run -p storepulse-server`)
//! - Valid Shopify credentials in the environment for the sync tests
//!
//! Every test is `#[ignore]`d so `cargo test` stays hermetic; run them
//! explicitly with `cargo test -p storepulse-integration-tests -- --ignored`.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the server API (configurable via environment).
#[must_use]
pub fn server_base_url() -> String {
    std::env::var("STOREPULSE_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// A unique throwaway email for registration tests.
#[must_use]
#[allow(clippy::missing_panics_doc)] // system clock is after the epoch
pub fn unique_email() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_nanos();
    format!("it-{nanos}@example.com")
}

/// Register a fresh admin account and exchange it for a bearer token.
///
/// # Panics
///
/// Panics if either auth endpoint misbehaves - these helpers assume a
/// healthy server and fail loudly otherwise.
pub async fn bearer_token(client: &Client) -> String {
    let base_url = server_base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({"email": email, "password": "integration-test-password"}))
        .send()
        .await
        .expect("Failed to register test admin");
    assert!(resp.status().is_success(), "register failed: {}", resp.status());

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({"email": email, "password": "integration-test-password"}))
        .send()
        .await
        .expect("Failed to log in test admin");
    assert!(resp.status().is_success(), "login failed: {}", resp.status());

    let body: Value = resp.json().await.expect("Login response is not JSON");
    body["token"]
        .as_str()
        .expect("Login response has no token")
        .to_owned()
}
