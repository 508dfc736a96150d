// ============================================================================
// pricetable - Library
// ============================================================================
// Hosted pricing tables in the terminal: fetch, query state, card grid.
// ============================================================================

pub mod api;    // HTTP client for the hosted endpoint
pub mod app;    // Demo application state
pub mod hook;   // Load-on-mount query lifecycle
pub mod models; // Wire types
pub mod ui;     // Terminal rendering and events
