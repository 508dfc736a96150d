// ============================================================================
// App : application state for the demo
// ============================================================================
// Owns the pricing table component and the loop-level flags (running,
// two-step quit confirmation). All mutations go through methods so the
// event loop stays a thin dispatcher.
// ============================================================================

use tracing::info;

use crate::ui::PricingTableView;

/// State of the demo application.
pub struct App {
    /// Keeps the event loop turning.
    running: bool,

    /// First 'q' arms the confirmation; the second one quits. Any other
    /// key disarms it.
    confirm_quit: bool,

    view: PricingTableView,
}

impl App {
    pub fn new(view: PricingTableView) -> Self {
        Self {
            running: true,
            confirm_quit: false,
            view,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn view(&self) -> &PricingTableView {
        &self.view
    }

    pub fn next_card(&mut self) {
        self.view.select_next();
    }

    pub fn previous_card(&mut self) {
        self.view.select_previous();
    }

    pub fn toggle_billing(&mut self) {
        self.view.toggle_billing();
    }

    /// Selects the highlighted plan and records it as the current one.
    pub fn select_plan(&mut self) {
        if let Some(price_id) = self.view.select() {
            info!(price = %price_id, "current plan updated");
            self.view.set_current_price_id(Some(price_id));
        }
    }

    /// Called once per loop iteration; nothing periodic yet.
    pub fn tick(&mut self) {}
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::hook::{PricingTableOptions, PricingTableQuery, PricingTableSource};
    use crate::models::PricingTable;
    use crate::ui::PricingTableProps;

    struct StubSource;

    #[async_trait]
    impl PricingTableSource for StubSource {
        async fn fetch(&self, _id: &str, _key: &str) -> Result<PricingTable> {
            Ok(PricingTable::default())
        }
    }

    fn app() -> App {
        let query = PricingTableQuery::mount_with_source(
            PricingTableOptions {
                pricing_table_id: "prctbl_test".to_string(),
                publishable_key: "pk_test_abc".to_string(),
            },
            Arc::new(StubSource),
        );
        App::new(PricingTableView::with_query(
            query,
            PricingTableProps::default(),
        ))
    }

    #[test]
    fn test_app_starts_running() {
        let app = app();
        assert!(app.is_running());
        assert!(!app.is_awaiting_quit_confirmation());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_quit_confirmation_cycle() {
        let mut app = app();

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        assert!(app.is_running());
    }

    #[test]
    fn test_toggle_billing() {
        let mut app = app();
        assert!(!app.view().props().annual);

        app.toggle_billing();
        assert!(app.view().props().annual);

        app.toggle_billing();
        assert!(!app.view().props().annual);
    }
}
