// ============================================================================
// API Client : hosted pricing tables
// ============================================================================
// Fetches a pricing-table resource from the merchant UI endpoint. One GET,
// no retry; the publishable key travels as a query parameter. Non-2xx
// responses carry a JSON error envelope whose message is surfaced to the
// caller.
// ============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::models::PricingTable;

/// Fixed host serving hosted pricing tables.
pub const BASE_URL: &str = "https://merchant-ui-api.stripe.com";

/// Fallback message when the provider reports a failure without detail.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch pricing table";

/// Publishable keys start with this prefix; secret keys must never be
/// sent to this endpoint.
const PUBLIC_KEY_PREFIX: &str = "pk_";

// ============================================================================
// Error envelope
// ============================================================================
// Failure bodies look like { "error": { "message": "..." } }, with every
// part optional.
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorDetails,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetails {
    message: Option<String>,
}

// ============================================================================
// Fetch operations
// ============================================================================

/// Fetches a pricing table from the hosted endpoint.
///
/// Asynchronous, single attempt. Fails before any network call when the
/// key is not a publishable key.
///
/// # Arguments
/// * `pricing_table_id` - Opaque table identifier (ex: "prctbl_...")
/// * `publishable_key` - Public key authorizing read access ("pk_...")
pub async fn fetch_pricing_table(
    pricing_table_id: &str,
    publishable_key: &str,
) -> Result<PricingTable> {
    fetch_pricing_table_from(BASE_URL, pricing_table_id, publishable_key).await
}

/// Same operation against an explicit base URL.
///
/// Exists so tests and self-hosted mirrors can point the client at a
/// different host; everything else behaves like [`fetch_pricing_table`].
#[instrument(skip(base_url, publishable_key))]
pub async fn fetch_pricing_table_from(
    base_url: &str,
    pricing_table_id: &str,
    publishable_key: &str,
) -> Result<PricingTable> {
    if !publishable_key.starts_with(PUBLIC_KEY_PREFIX) {
        anyhow::bail!("Stripe key to fetch pricing table must be a public key (pk_...)");
    }

    let url = build_pricing_table_url(base_url, pricing_table_id, publishable_key);
    debug!(table = %pricing_table_id, "built pricing table URL");

    let client = reqwest::Client::builder()
        .user_agent(concat!("pricetable/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to create HTTP client")?;

    let response = client
        .get(&url)
        .send()
        .await
        .context("pricing table request failed")?;

    let status = response.status();
    debug!(status = %status, "received pricing table response");

    if !status.is_success() {
        // Best-effort envelope parse; a malformed body degrades to the
        // generic message.
        let envelope: ErrorEnvelope = response.json().await.unwrap_or_default();
        error!(
            status = %status,
            message = ?envelope.error.message,
            "pricing table fetch failed"
        );
        let message = envelope
            .error
            .message
            .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string());
        anyhow::bail!(message);
    }

    let table: PricingTable = response
        .json()
        .await
        .context("failed to parse pricing table response")?;

    info!(
        table = %table.id,
        items = table.pricing_table_items.len(),
        "fetched pricing table"
    );
    Ok(table)
}

/// Builds the GET URL: `{base}/pricing-table/{id}?key={publishable_key}`.
fn build_pricing_table_url(base_url: &str, pricing_table_id: &str, publishable_key: &str) -> String {
    format!(
        "{}/pricing-table/{}?key={}",
        base_url.trim_end_matches('/'),
        pricing_table_id,
        publishable_key
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pricing_table_url() {
        let url = build_pricing_table_url(BASE_URL, "prctbl_123", "pk_test_abc");
        assert_eq!(
            url,
            "https://merchant-ui-api.stripe.com/pricing-table/prctbl_123?key=pk_test_abc"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let url = build_pricing_table_url("http://localhost:3000/", "prctbl_123", "pk_test_abc");
        assert_eq!(
            url,
            "http://localhost:3000/pricing-table/prctbl_123?key=pk_test_abc"
        );
    }

    #[tokio::test]
    async fn test_secret_key_fails_before_network() {
        // The base URL is unroutable: reaching the network would fail with
        // a transport error instead of the validation message.
        let err = fetch_pricing_table_from("http://0.0.0.0:1", "prctbl_123", "sk_test_abc")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Stripe key to fetch pricing table must be a public key (pk_...)"
        );
    }

    #[test]
    fn test_error_envelope_with_message() {
        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"message":"No such pricing table"}}"#).unwrap();
        assert_eq!(
            envelope.error.message.as_deref(),
            Some("No such pricing table")
        );
    }

    #[test]
    fn test_error_envelope_without_message() {
        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"error":{}}"#).unwrap();
        assert!(envelope.error.message.is_none());

        let empty: ErrorEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.error.message.is_none());
    }
}
