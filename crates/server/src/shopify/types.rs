//! Raw record types decoded from Admin REST responses, and their
//! conversions into repository write types.
//!
//! Shopify sends identifiers as large JSON numbers and money as decimal
//! strings; [`ExternalId`] and [`Decimal`] absorb both without precision
//! loss. Unknown fields are ignored - these structs pick out exactly what
//! the reconcilers store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storepulse_core::ExternalId;

use crate::db::customers::NewCustomer;
use crate::db::orders::NewOrder;
use crate::db::products::NewProduct;

/// A product as returned by `GET /products.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: ExternalId,
    pub title: String,
    #[serde(default)]
    pub variants: Vec<RawVariant>,
}

/// A product variant; only the price matters to us.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVariant {
    pub price: Option<Decimal>,
}

/// A customer as returned by `GET /customers.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCustomer {
    pub id: ExternalId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_spent: Option<Decimal>,
}

/// An order as returned by `GET /orders.json?status=any`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrder {
    pub id: ExternalId,
    pub customer: Option<RawOrderCustomer>,
    pub total_price: Option<Decimal>,
    pub currency: Option<String>,
    pub financial_status: Option<String>,
    pub fulfillment_status: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// The customer embedded in an order payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrderCustomer {
    pub id: ExternalId,
}

impl From<RawProduct> for NewProduct {
    fn from(raw: RawProduct) -> Self {
        // First listed variant's price, or no price when there are none
        let price = raw.variants.into_iter().next().and_then(|v| v.price);

        Self {
            external_id: raw.id,
            title: raw.title,
            price,
        }
    }
}

impl From<RawCustomer> for NewCustomer {
    fn from(raw: RawCustomer) -> Self {
        Self {
            external_id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            phone: raw.phone,
            total_spent: raw.total_spent,
        }
    }
}

impl From<RawOrder> for NewOrder {
    fn from(raw: RawOrder) -> Self {
        Self {
            external_id: raw.id,
            customer_external_id: raw.customer.map(|c| c.id),
            total_price: raw.total_price,
            currency: raw.currency,
            financial_status: raw.financial_status,
            fulfillment_status: raw.fulfillment_status,
            processed_at: raw.processed_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_first_variant_price() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": 632_910_392,
            "title": "IPod Nano - 8GB",
            "vendor": "Apple",
            "variants": [
                {"id": 808_950_810, "price": "199.00"},
                {"id": 49_148_385, "price": "249.00"}
            ]
        }))
        .unwrap();

        let new = NewProduct::from(raw);
        assert_eq!(new.external_id, ExternalId::new(632_910_392));
        assert_eq!(new.title, "IPod Nano - 8GB");
        assert_eq!(new.price, Some(Decimal::new(19_900, 2)));
    }

    #[test]
    fn test_product_without_variants_has_no_price() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Gift Wrap"
        }))
        .unwrap();

        assert_eq!(NewProduct::from(raw).price, None);
    }

    #[test]
    fn test_customer_omitted_total_spent_maps_to_none() {
        let raw: RawCustomer = serde_json::from_value(serde_json::json!({
            "id": 207_119_551,
            "first_name": "Bob",
            "last_name": "Norman",
            "email": "bob.norman@mail.example.com",
            "phone": null
        }))
        .unwrap();

        let new = NewCustomer::from(raw);
        assert_eq!(new.total_spent, None);
        assert_eq!(new.phone, None);
    }

    #[test]
    fn test_customer_total_spent_decodes_from_string() {
        let raw: RawCustomer = serde_json::from_value(serde_json::json!({
            "id": 207_119_551,
            "total_spent": "199.65"
        }))
        .unwrap();

        assert_eq!(
            NewCustomer::from(raw).total_spent,
            Some(Decimal::new(19_965, 2))
        );
    }

    #[test]
    fn test_order_with_embedded_customer() {
        let raw: RawOrder = serde_json::from_value(serde_json::json!({
            "id": 450_789_469,
            "customer": {"id": 207_119_551, "email": "bob.norman@mail.example.com"},
            "total_price": "409.94",
            "currency": "USD",
            "financial_status": "paid",
            "fulfillment_status": null,
            "processed_at": "2008-01-10T11:00:00-05:00"
        }))
        .unwrap();

        let new = NewOrder::from(raw);
        assert_eq!(new.external_id, ExternalId::new(450_789_469));
        assert_eq!(
            new.customer_external_id,
            Some(ExternalId::new(207_119_551))
        );
        assert_eq!(new.total_price, Some(Decimal::new(40_994, 2)));
        assert_eq!(new.financial_status.as_deref(), Some("paid"));
        assert_eq!(new.fulfillment_status, None);
        // Offset timestamps normalize to UTC
        let processed_at = new.processed_at.unwrap();
        assert_eq!(processed_at.to_rfc3339(), "2008-01-10T16:00:00+00:00");
    }

    #[test]
    fn test_order_without_customer_or_timestamp() {
        let raw: RawOrder = serde_json::from_value(serde_json::json!({
            "id": 1,
            "total_price": "10.00",
            "currency": "USD"
        }))
        .unwrap();

        let new = NewOrder::from(raw);
        assert_eq!(new.customer_external_id, None);
        assert_eq!(new.processed_at, None);
    }

    #[test]
    fn test_external_id_decodes_beyond_js_safe_integers() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": 9_007_199_254_740_993_i64,
            "title": "Big"
        }))
        .unwrap();

        assert_eq!(raw.id.as_i64(), 9_007_199_254_740_993);
    }
}
