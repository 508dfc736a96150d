// ============================================================================
// PricingTableItem : one sellable plan/price within a pricing table
// ============================================================================
// Immutable value once received from the provider. Every field carries
// #[serde(default)] so partial payloads deserialize without errors: the
// provider's schema is trusted structurally, never validated.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Recurrence descriptor for a price.
///
/// `interval` is an open-ended string tag. The provider currently emits
/// "month" and "year"; unknown tags are carried through unchanged rather
/// than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
    #[serde(default)]
    pub interval: String,

    #[serde(default)]
    pub interval_count: u32,
}

/// One plan/price entry of a pricing table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTableItem {
    /// Price identifier, unique within the owning table.
    #[serde(default)]
    pub price_id: String,

    #[serde(default)]
    pub product_id: String,

    /// Display name of the plan.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub product_description: Option<String>,

    /// Monetary amount in minor units, string encoded. None means free.
    #[serde(default)]
    pub amount: Option<String>,

    /// Lowercase ISO currency code (ex: "usd").
    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub recurring: Recurring,

    /// Flat list of marketing feature strings.
    #[serde(default)]
    pub feature_list: Vec<String>,

    #[serde(default)]
    pub is_highlight: bool,

    #[serde(default)]
    pub highlight_text: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub unit_label: Option<String>,

    /// Trial length in days, when the plan offers one.
    #[serde(default)]
    pub trial_period_days: Option<u32>,

    /// Call-to-action label for the card button.
    #[serde(default)]
    pub call_to_action: String,

    #[serde(default)]
    pub call_to_action_link: String,
}

impl PricingTableItem {
    /// True when the plan has no amount attached.
    pub fn is_free(&self) -> bool {
        self.amount.is_none()
    }

    /// Formats the price for display.
    ///
    /// "Free" when the amount is absent; otherwise the amount divided by
    /// 100 and rendered as whole currency units, suffixed "/year" for
    /// yearly recurrence and "/mo" for everything else.
    ///
    /// Format : "$29/mo", "$290/year", "Free"
    pub fn display_price(&self) -> String {
        let Some(amount) = &self.amount else {
            return "Free".to_string();
        };

        let minor: i64 = amount.parse().unwrap_or(0);
        let units = (minor as f64 / 100.0).round() as i64;

        let suffix = if self.recurring.interval == "year" {
            "year"
        } else {
            "mo"
        };

        format!("{}/{}", format_currency(units, &self.currency), suffix)
    }

    /// Label for the card's action control, defaulting to "Select".
    pub fn action_label(&self) -> &str {
        if self.call_to_action.is_empty() {
            "Select"
        } else {
            &self.call_to_action
        }
    }

    /// Trial line for the card, when a trial is offered.
    pub fn trial_label(&self) -> Option<String> {
        self.trial_period_days
            .map(|days| format!("{days}-day free trial"))
    }
}

/// Renders whole currency units with the common symbols, falling back to
/// an uppercase code prefix for everything else.
fn format_currency(units: i64, currency: &str) -> String {
    match currency.to_ascii_lowercase().as_str() {
        "usd" => format!("${units}"),
        "eur" => format!("€{units}"),
        "gbp" => format!("£{units}"),
        "jpy" => format!("¥{units}"),
        _ => format!("{} {units}", currency.to_uppercase()),
    }
}

// ============================================================================
// Tests
// ============================================================================
