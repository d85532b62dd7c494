//! Shopify Admin REST API client.
//!
//! One bounded, authenticated GET per sync operation. The client holds no
//! state beyond its HTTP connection pool and never retries internally -
//! retry policy belongs to the caller (in practice: the scheduler's next
//! tick, or a manual re-trigger).

pub mod client;
pub mod types;

use thiserror::Error;

pub use client::ShopifyClient;
pub use types::{RawCustomer, RawOrder, RawProduct, RawVariant};

/// Errors from the upstream source boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network/transport failure reaching the source.
    #[error("upstream source unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// The source answered with a non-success status. Status and body are
    /// preserved verbatim for the caller.
    #[error("upstream source rejected the request: HTTP {status}")]
    Rejected {
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body, untouched.
        body: String,
    },

    /// The response could not be decoded into the expected envelope shape.
    #[error("upstream response malformed: {0}")]
    Malformed(String),
}
