// ============================================================================
// Module : api
// ============================================================================
// HTTP client for the provider's hosted pricing-table endpoint.
// ============================================================================

pub mod stripe;

pub use stripe::{fetch_pricing_table, fetch_pricing_table_from, BASE_URL, GENERIC_FETCH_ERROR};
