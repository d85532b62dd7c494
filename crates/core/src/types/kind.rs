//! Entity kinds synced from the upstream source.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The three entity collections StorePulse reconciles from Shopify.
///
/// The slug doubles as the Admin REST resource path segment
/// (`{slug}.json`) and the key of the response envelope
/// (`{"products": [...]}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Products,
    Customers,
    Orders,
}

impl EntityKind {
    /// All kinds in the order the scheduler syncs them.
    pub const ALL: [Self; 3] = [Self::Products, Self::Customers, Self::Orders];

    /// Plural resource slug used in upstream URLs and response envelopes.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Orders => "orders",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
