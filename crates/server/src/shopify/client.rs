//! HTTP client for the Shopify Admin REST API.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use storepulse_core::EntityKind;

use crate::config::ShopifySourceConfig;

use super::SourceError;
use super::types::{RawCustomer, RawOrder, RawProduct};

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for authenticated, bounded reads of one resource collection.
///
/// Construction bakes the access token into the connection pool's default
/// headers; per-call state is just the URL and query string.
#[derive(Debug, Clone)]
pub struct ShopifyClient {
    client: reqwest::Client,
    /// `https://{store_domain}/admin/api/{api_version}`
    base_url: String,
}

impl ShopifyClient {
    /// Create a new Admin REST client.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token is not a valid header value or
    /// the HTTP client fails to build.
    pub fn new(config: &ShopifySourceConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(config.access_token.expose_secret())
            .map_err(|e| SourceError::Malformed(format!("invalid access token: {e}")))?;
        token.set_sensitive(true);
        headers.insert(ACCESS_TOKEN_HEADER, token);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: format!(
                "https://{}/admin/api/{}",
                config.store_domain, config.api_version
            ),
        })
    }

    /// Fetch one page of products.
    ///
    /// # Errors
    ///
    /// See [`SourceError`].
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, limit: u32) -> Result<Vec<RawProduct>, SourceError> {
        self.fetch_collection(EntityKind::Products, &[("limit", limit.to_string())])
            .await
    }

    /// Fetch one page of customers.
    ///
    /// # Errors
    ///
    /// See [`SourceError`].
    #[instrument(skip(self))]
    pub async fn fetch_customers(&self, limit: u32) -> Result<Vec<RawCustomer>, SourceError> {
        self.fetch_collection(EntityKind::Customers, &[("limit", limit.to_string())])
            .await
    }

    /// Fetch one page of orders of any status (Shopify defaults to open
    /// orders only, which would silently undercount revenue).
    ///
    /// # Errors
    ///
    /// See [`SourceError`].
    #[instrument(skip(self))]
    pub async fn fetch_orders(&self, limit: u32) -> Result<Vec<RawOrder>, SourceError> {
        self.fetch_collection(
            EntityKind::Orders,
            &[("limit", limit.to_string()), ("status", "any".to_string())],
        )
        .await
    }

    /// One bounded GET against `{base_url}/{slug}.json`, unwrapping the
    /// `{"<slug>": [...]}` envelope.
    async fn fetch_collection<T>(
        &self,
        kind: EntityKind,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, SourceError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}.json", self.base_url, kind.slug());

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let mut envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(format!("{kind} response is not JSON: {e}")))?;

        let records = envelope
            .get_mut(kind.slug())
            .map(serde_json::Value::take)
            .ok_or_else(|| {
                SourceError::Malformed(format!("response missing '{}' envelope key", kind.slug()))
            })?;

        serde_json::from_value(records)
            .map_err(|e| SourceError::Malformed(format!("invalid {kind} record: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn test_client() -> ShopifyClient {
        ShopifyClient::new(&ShopifySourceConfig {
            store_domain: "test.myshopify.com".to_string(),
            api_version: "2024-10".to_string(),
            access_token: SecretString::from("shpat_test_token"),
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_template() {
        let client = test_client();
        assert_eq!(
            client.base_url,
            "https://test.myshopify.com/admin/api/2024-10"
        );
    }

    #[test]
    fn test_rejects_non_header_safe_token() {
        let result = ShopifyClient::new(&ShopifySourceConfig {
            store_domain: "test.myshopify.com".to_string(),
            api_version: "2024-10".to_string(),
            access_token: SecretString::from("bad\ntoken"),
        });
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }
}
