//! Fetch lifecycle against a local stand-in for the provider endpoint.
//!
//! Starts an axum server on a random port serving a fixture table under
//! `/pricing-table/{id}` with the same success and error envelopes as the
//! hosted endpoint, then exercises the fetcher and the query lifecycle
//! over real HTTP.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use pricetable::api::{fetch_pricing_table_from, GENERIC_FETCH_ERROR};
use pricetable::hook::{
    PricingTableOptions, PricingTableQuery, PricingTableSource, MISSING_PARAMS_ERROR,
};
use pricetable::models::{BrandingSettings, PricingTable, PricingTableItem, Recurring};

const TABLE_ID: &str = "prctbl_integration";
const PUBLISHABLE_KEY: &str = "pk_test_abc";

fn fixture() -> PricingTable {
    PricingTable {
        id: TABLE_ID.to_string(),
        object: "pricing_table".to_string(),
        active: true,
        livemode: false,
        locale: "auto".to_string(),
        merchant_id: "acct_test".to_string(),
        created: 1_700_000_000,
        branding_settings: BrandingSettings {
            background_color: "#ffffff".to_string(),
            border_style: "default".to_string(),
            button_color: "#3b82f6".to_string(),
            font_family: "default".to_string(),
        },
        pricing_table_items: vec![
            PricingTableItem {
                price_id: "price_basic_monthly".to_string(),
                product_id: "prod_basic".to_string(),
                name: "Basic".to_string(),
                product_description: Some("For small teams".to_string()),
                amount: Some("2900".to_string()),
                currency: "usd".to_string(),
                recurring: Recurring {
                    interval: "month".to_string(),
                    interval_count: 1,
                },
                feature_list: vec!["10 projects".to_string(), "Email support".to_string()],
                trial_period_days: Some(14),
                call_to_action: "Subscribe".to_string(),
                ..Default::default()
            },
            PricingTableItem {
                price_id: "price_basic_yearly".to_string(),
                product_id: "prod_basic".to_string(),
                name: "Basic".to_string(),
                amount: Some("29000".to_string()),
                currency: "usd".to_string(),
                recurring: Recurring {
                    interval: "year".to_string(),
                    interval_count: 1,
                },
                is_highlight: true,
                highlight_text: Some("Best value".to_string()),
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

// ============================================================================
// Mock endpoint
// ============================================================================

fn mock_app(table: PricingTable) -> Router {
    Router::new()
        .route("/pricing-table/{id}", get(serve_table))
        .with_state(Arc::new(table))
}

async fn serve_table(
    State(table): State<Arc<PricingTable>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("key").map(String::as_str) != Some(PUBLISHABLE_KEY) {
        // Key rejections carry an empty error envelope.
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": {} }))).into_response();
    }
    if id != table.id {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "No such pricing table" } })),
        )
            .into_response();
    }
    Json(table.as_ref().clone()).into_response()
}

/// Binds the mock endpoint on a random port and returns its base URL.
async fn spawn_mock() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock listener address");
    tokio::spawn(async move {
        axum::serve(listener, mock_app(fixture()))
            .await
            .expect("mock server failed");
    });
    format!("http://{addr}")
}

// ============================================================================
// Fetcher
// ============================================================================

#[tokio::test]
async fn fetch_round_trips_table_body() {
    let base = spawn_mock().await;

    let table = fetch_pricing_table_from(&base, TABLE_ID, PUBLISHABLE_KEY)
        .await
        .expect("fetch fixture table");

    // The returned value structurally equals the served body.
    assert_eq!(table, fixture());
    assert_eq!(table.pricing_table_items.len(), 2);
    assert_eq!(
        table.item("price_basic_monthly").unwrap().display_price(),
        "$29/mo"
    );
    assert_eq!(
        table.item("price_basic_yearly").unwrap().display_price(),
        "$290/year"
    );
}

#[tokio::test]
async fn fetch_surfaces_provider_error_message() {
    let base = spawn_mock().await;

    let err = fetch_pricing_table_from(&base, "prctbl_missing", PUBLISHABLE_KEY)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No such pricing table");
}

#[tokio::test]
async fn fetch_falls_back_to_generic_message() {
    let base = spawn_mock().await;

    let err = fetch_pricing_table_from(&base, TABLE_ID, "pk_wrong_key")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), GENERIC_FETCH_ERROR);
}

#[tokio::test]
async fn fetch_rejects_secret_key_without_calling_server() {
    let base = spawn_mock().await;

    let err = fetch_pricing_table_from(&base, TABLE_ID, "sk_test_abc")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Stripe key to fetch pricing table must be a public key (pk_...)"
    );
}

// ============================================================================
// Query lifecycle over real HTTP
// ============================================================================

/// Source pointing the real fetcher at the mock host.
struct MockHostSource {
    base: String,
}

#[async_trait]
impl PricingTableSource for MockHostSource {
    async fn fetch(&self, pricing_table_id: &str, publishable_key: &str) -> Result<PricingTable> {
        fetch_pricing_table_from(&self.base, pricing_table_id, publishable_key).await
    }
}

async fn wait_until_settled(query: &PricingTableQuery) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while query.snapshot().loading {
        assert!(Instant::now() < deadline, "query never settled");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn query_loads_table_end_to_end() {
    let base = spawn_mock().await;

    let query = PricingTableQuery::mount_with_source(
        PricingTableOptions {
            pricing_table_id: TABLE_ID.to_string(),
            publishable_key: PUBLISHABLE_KEY.to_string(),
        },
        Arc::new(MockHostSource { base }),
    );

    wait_until_settled(&query).await;
    let state = query.snapshot();
    assert!(state.error.is_none());
    assert_eq!(state.pricing_table.unwrap(), fixture());
}

#[tokio::test]
async fn query_surfaces_http_failure() {
    let base = spawn_mock().await;

    let query = PricingTableQuery::mount_with_source(
        PricingTableOptions {
            pricing_table_id: "prctbl_missing".to_string(),
            publishable_key: PUBLISHABLE_KEY.to_string(),
        },
        Arc::new(MockHostSource { base }),
    );

    wait_until_settled(&query).await;
    let state = query.snapshot();
    assert!(state.pricing_table.is_none());
    assert_eq!(state.error.as_deref(), Some("No such pricing table"));
}

#[tokio::test]
async fn query_short_circuits_empty_inputs() {
    let base = spawn_mock().await;

    let query = PricingTableQuery::mount_with_source(
        PricingTableOptions::default(),
        Arc::new(MockHostSource { base }),
    );

    let state = query.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(MISSING_PARAMS_ERROR));
}
