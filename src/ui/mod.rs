// ============================================================================
// Module : ui
// ============================================================================
// Terminal rendering: the pricing table component, the screen chrome
// around it, and keyboard event handling.
// ============================================================================

pub mod dashboard; // Screen chrome (header, component area, footer)
pub mod events;    // Keyboard events
pub mod pricing;   // The pricing table component

// Re-exports for callers
pub use dashboard::render;
pub use events::{Event, EventHandler};
pub use pricing::{
    CardProps, CardRenderer, ErrorRenderer, LoadingRenderer, PricingTableProps, PricingTableView,
    SelectPriceCallback,
};
