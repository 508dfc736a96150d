// ============================================================================
// PricingTableQuery : load-on-mount state for a pricing table
// ============================================================================
// Owns the fetched table and its loading/error flags for the duration of
// one mount. The fetch runs on a background thread; results are committed
// under the state lock only while the activation's abort token is still
// live, so a superseded or unmounted query can never write state
// (last-writer-wins via cancellation).
// ============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::api;
use crate::models::PricingTable;

/// Error shown when either required input is empty. No fetch is attempted
/// in that case.
pub const MISSING_PARAMS_ERROR: &str =
    "Missing required parameters: pricing_table_id and publishable_key";

// ============================================================================
// Inputs and state
// ============================================================================

/// Inputs identifying the table to load. Changing either re-runs the
/// lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingTableOptions {
    pub pricing_table_id: String,
    pub publishable_key: String,
}

/// Observable state of one query activation.
///
/// Exactly one of `loading`, `error`, `pricing_table` is meaningful at a
/// time: `loading` while the fetch is in flight, then either the table or
/// an error message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTableState {
    pub pricing_table: Option<PricingTable>,
    pub loading: bool,
    pub error: Option<String>,
}

// ============================================================================
// Cancellation
// ============================================================================

/// Cooperative cancellation flag shared between a query and its fetch
/// thread. Aborting never interrupts the fetch itself; it only discards
/// observation of the result.
#[derive(Debug, Clone, Default)]
pub struct AbortToken(Arc<AtomicBool>);

impl AbortToken {
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Fetch source
// ============================================================================

/// The network collaborator the query fetches through. Injected so tests
/// can run the full lifecycle without touching the wire.
#[async_trait]
pub trait PricingTableSource: Send + Sync {
    async fn fetch(&self, pricing_table_id: &str, publishable_key: &str) -> Result<PricingTable>;
}

/// Default source: the hosted endpoint.
#[derive(Debug, Default)]
pub struct StripeSource;

#[async_trait]
impl PricingTableSource for StripeSource {
    async fn fetch(&self, pricing_table_id: &str, publishable_key: &str) -> Result<PricingTable> {
        api::fetch_pricing_table(pricing_table_id, publishable_key).await
    }
}

// ============================================================================
// Query lifecycle
// ============================================================================

/// One mounted pricing-table query.
///
/// Construct with [`PricingTableQuery::mount`]; read state through
/// [`snapshot`](PricingTableQuery::snapshot); feed new inputs through
/// [`set_options`](PricingTableQuery::set_options). Dropping the query
/// aborts the in-flight activation.
pub struct PricingTableQuery {
    options: PricingTableOptions,
    source: Arc<dyn PricingTableSource>,
    state: Arc<Mutex<PricingTableState>>,
    abort: AbortToken,
}

impl PricingTableQuery {
    /// Mounts a query against the hosted endpoint.
    pub fn mount(options: PricingTableOptions) -> Self {
        Self::mount_with_source(options, Arc::new(StripeSource))
    }

    /// Mounts a query with an injected fetch source.
    pub fn mount_with_source(
        options: PricingTableOptions,
        source: Arc<dyn PricingTableSource>,
    ) -> Self {
        let mut query = Self {
            options,
            source,
            state: Arc::new(Mutex::new(PricingTableState::default())),
            abort: AbortToken::default(),
        };
        query.start();
        query
    }

    /// Current inputs.
    pub fn options(&self) -> &PricingTableOptions {
        &self.options
    }

    /// Clone of the current state, for rendering.
    pub fn snapshot(&self) -> PricingTableState {
        self.state.lock().unwrap().clone()
    }

    /// Re-runs the lifecycle when the inputs changed.
    ///
    /// The previous activation is aborted first; a late result from it can
    /// no longer commit. Unchanged inputs are a no-op.
    pub fn set_options(&mut self, options: PricingTableOptions) {
        if options == self.options {
            return;
        }

        debug!(table = %options.pricing_table_id, "pricing table inputs changed");
        self.abort.abort();
        self.abort = AbortToken::default();
        self.options = options;
        *self.state.lock().unwrap() = PricingTableState::default();
        self.start();
    }

    /// Validates inputs and kicks off the background fetch.
    fn start(&mut self) {
        if self.options.pricing_table_id.is_empty() || self.options.publishable_key.is_empty() {
            let mut state = self.state.lock().unwrap();
            state.error = Some(MISSING_PARAMS_ERROR.to_string());
            state.loading = false;
            return;
        }

        self.state.lock().unwrap().loading = true;

        let source = self.source.clone();
        let state = self.state.clone();
        let token = self.abort.clone();
        let pricing_table_id = self.options.pricing_table_id.clone();
        let publishable_key = self.options.publishable_key.clone();

        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!(error = ?e, "failed to build fetch runtime");
                    let mut state = state.lock().unwrap();
                    if token.is_aborted() {
                        return;
                    }
                    state.error = Some(e.to_string());
                    state.loading = false;
                    return;
                }
            };

            let result = runtime.block_on(source.fetch(&pricing_table_id, &publishable_key));

            // Commit under the lock, and only while this activation is
            // still the live one.
            let mut state = state.lock().unwrap();
            if token.is_aborted() {
                debug!(table = %pricing_table_id, "discarding result of aborted fetch");
                return;
            }

            match result {
                Ok(table) => {
                    info!(table = %table.id, "pricing table loaded");
                    state.pricing_table = Some(table);
                }
                Err(e) => {
                    error!(table = %pricing_table_id, error = ?e, "failed to fetch pricing table");
                    state.error = Some(failure_message(&e));
                }
            }
            state.loading = false;
        });
    }
}

impl Drop for PricingTableQuery {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Message for a failed fetch: the error's own message when it has one,
/// the generic fallback otherwise.
fn failure_message(error: &anyhow::Error) -> String {
    let message = error.to_string();
    if message.is_empty() {
        api::GENERIC_FETCH_ERROR.to_string()
    } else {
        message
    }
}

// ============================================================================
// Tests
// ============================================================================
