//! Seed the database with sample commerce data.
//!
//! Runs everything through the same repository upserts the sync pipeline
//! uses, so re-seeding is idempotent: rows are overwritten, never
//! duplicated. Handy for driving the dashboard locally without Shopify
//! credentials.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use storepulse_core::ExternalId;
use storepulse_server::db::customers::NewCustomer;
use storepulse_server::db::orders::NewOrder;
use storepulse_server::db::products::NewProduct;
use storepulse_server::db::{
    self, CustomerRepository, OrderRepository, ProductRepository, RepositoryError,
};

use super::MissingDatabaseUrl;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    MissingDatabaseUrl(#[from] MissingDatabaseUrl),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Insert (or overwrite) the sample data set.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or a write fails.
pub async fn run() -> Result<(), SeedError> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let products = sample_products();
    let product_repo = ProductRepository::new(&pool);
    for product in &products {
        product_repo.upsert(product).await?;
    }

    let customers = sample_customers();
    let customer_repo = CustomerRepository::new(&pool);
    for customer in &customers {
        customer_repo.upsert(customer).await?;
    }

    let orders = sample_orders();
    let order_repo = OrderRepository::new(&pool);
    for order in &orders {
        order_repo.upsert(order).await?;
    }

    tracing::info!(
        products = products.len(),
        customers = customers.len(),
        orders = orders.len(),
        "Sample data seeded"
    );
    Ok(())
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            external_id: ExternalId::new(100_000_001),
            title: "Classic Tee".to_owned(),
            price: Some(Decimal::new(2_500, 2)),
        },
        NewProduct {
            external_id: ExternalId::new(100_000_002),
            title: "Canvas Tote".to_owned(),
            price: Some(Decimal::new(1_800, 2)),
        },
        NewProduct {
            external_id: ExternalId::new(100_000_003),
            title: "Gift Wrap".to_owned(),
            price: None,
        },
    ]
}

fn sample_customers() -> Vec<NewCustomer> {
    vec![
        NewCustomer {
            external_id: ExternalId::new(200_000_001),
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            email: Some("ada@example.com".to_owned()),
            phone: None,
            total_spent: Some(Decimal::new(12_550, 2)),
        },
        NewCustomer {
            external_id: ExternalId::new(200_000_002),
            first_name: Some("Grace".to_owned()),
            last_name: None,
            email: Some("grace@example.com".to_owned()),
            phone: Some("+15551234567".to_owned()),
            total_spent: Some(Decimal::new(4_300, 2)),
        },
        NewCustomer {
            external_id: ExternalId::new(200_000_003),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            total_spent: None,
        },
    ]
}

#[allow(clippy::unwrap_used)] // fixed, known-valid timestamps
fn sample_orders() -> Vec<NewOrder> {
    vec![
        NewOrder {
            external_id: ExternalId::new(300_000_001),
            customer_external_id: Some(ExternalId::new(200_000_001)),
            total_price: Some(Decimal::new(5_000, 2)),
            currency: Some("USD".to_owned()),
            financial_status: Some("paid".to_owned()),
            fulfillment_status: Some("fulfilled".to_owned()),
            processed_at: Some(Utc.with_ymd_and_hms(2025, 11, 3, 14, 30, 0).unwrap()),
        },
        NewOrder {
            external_id: ExternalId::new(300_000_002),
            customer_external_id: Some(ExternalId::new(200_000_001)),
            total_price: Some(Decimal::new(7_550, 2)),
            currency: Some("USD".to_owned()),
            financial_status: Some("paid".to_owned()),
            fulfillment_status: None,
            processed_at: Some(Utc.with_ymd_and_hms(2025, 11, 10, 9, 15, 0).unwrap()),
        },
        NewOrder {
            external_id: ExternalId::new(300_000_003),
            customer_external_id: Some(ExternalId::new(200_000_002)),
            total_price: Some(Decimal::new(4_300, 2)),
            currency: Some("USD".to_owned()),
            financial_status: Some("pending".to_owned()),
            fulfillment_status: None,
            processed_at: Some(Utc.with_ymd_and_hms(2025, 11, 10, 18, 45, 0).unwrap()),
        },
        // Dangling weak reference: this customer is never seeded
        NewOrder {
            external_id: ExternalId::new(300_000_004),
            customer_external_id: Some(ExternalId::new(999_000_000)),
            total_price: Some(Decimal::new(1_200, 2)),
            currency: Some("USD".to_owned()),
            financial_status: Some("paid".to_owned()),
            fulfillment_status: None,
            processed_at: Some(Utc.with_ymd_and_hms(2025, 11, 12, 11, 0, 0).unwrap()),
        },
        // No processed timestamp: excluded from the date series
        NewOrder {
            external_id: ExternalId::new(300_000_005),
            customer_external_id: None,
            total_price: Some(Decimal::new(990, 2)),
            currency: Some("USD".to_owned()),
            financial_status: Some("pending".to_owned()),
            fulfillment_status: None,
            processed_at: None,
        },
    ]
}
