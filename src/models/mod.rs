// ============================================================================
// Module : models
// ============================================================================
// Wire types for the hosted pricing-table resource.
// ============================================================================

pub mod pricing_table;      // The table resource and its nested settings
pub mod pricing_table_item; // One sellable plan/price

// Re-exports so callers can write models::PricingTable directly
pub use pricing_table::{BrandingSettings, FeatureFlags, PricingTable};
pub use pricing_table_item::{PricingTableItem, Recurring};
