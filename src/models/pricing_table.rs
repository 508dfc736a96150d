// ============================================================================
// PricingTable : the hosted pricing-table resource
// ============================================================================
// Fetched wholesale from the provider, held in memory for one mount,
// replaced on re-fetch, discarded on unmount. Never mutated locally.
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PricingTableItem;

/// Merchant branding attached to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingSettings {
    #[serde(default)]
    pub background_color: String,

    #[serde(default)]
    pub border_style: String,

    #[serde(default)]
    pub button_color: String,

    #[serde(default)]
    pub font_family: String,
}

/// Provider-side feature toggles for the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default)]
    pub enable_yearly_as_monthly_price_display: bool,

    #[serde(default)]
    pub use_optimized_images: bool,
}

/// A hosted pricing table: branding, flags, merchant metadata and the
/// ordered sequence of sellable plans.
///
/// Invariant: `price_id` is unique across `pricing_table_items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    /// Opaque table identifier (ex: "prctbl_...").
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub locale: String,

    #[serde(default)]
    pub merchant_id: String,

    #[serde(default)]
    pub merchant_internal_label: String,

    /// Creation time as a unix epoch, as reported by the provider.
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub branding_settings: BrandingSettings,

    #[serde(default)]
    pub feature_flags: FeatureFlags,

    #[serde(default)]
    pub has_archived_products_or_prices: bool,

    #[serde(default)]
    pub pricing_table_items: Vec<PricingTableItem>,
}

impl PricingTable {
    /// True when the table carries no plans at all.
    pub fn is_empty(&self) -> bool {
        self.pricing_table_items.is_empty()
    }

    /// Looks up a plan by its price identifier.
    pub fn item(&self, price_id: &str) -> Option<&PricingTableItem> {
        self.pricing_table_items
            .iter()
            .find(|item| item.price_id == price_id)
    }

    /// Plans whose recurrence interval matches `interval` exactly, in
    /// table order. Items with any other interval tag are excluded.
    pub fn items_with_interval(&self, interval: &str) -> Vec<&PricingTableItem> {
        self.pricing_table_items
            .iter()
            .filter(|item| item.recurring.interval == interval)
            .collect()
    }

    /// Creation time as a `DateTime`, when the epoch is representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }
}

// ============================================================================
// Tests
// ============================================================================
