//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SOKO_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use soko_core::{
    DEFAULT_PAYMENT_DELAY_MS, DEFAULT_PAYMENT_SUCCESS_BPS, DELIVERY_RATE_PER_KM_UGX,
    MIN_ITEMS_FOR_CHECKOUT,
};

/// Storefront configuration.
///
/// ## Fields
/// Every field has a stock default; the payment simulator knobs exist
/// so tests and demos can tighten the latency or force outcomes
/// without touching business logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (displayed in the banner).
    pub store_name: String,

    /// Currency code (ISO 4217). UGX is zero-decimal.
    pub currency_code: String,

    /// Minimum cart lines before checkout unlocks.
    pub min_checkout_items: usize,

    /// Delivery rate in whole shillings per kilometre.
    pub delivery_rate_per_km_ugx: i64,

    /// Simulated gateway latency in milliseconds.
    pub payment_delay_ms: u64,

    /// Simulated gateway success probability in basis points
    /// (9000 = 90%).
    pub payment_success_bps: u32,
}

impl Default for ConfigState {
    /// Returns the stock configuration: 10-item gate, 700 UGX/km,
    /// 2-second gateway latency, 90% success.
    fn default() -> Self {
        ConfigState {
            store_name: "Soko Kampala".to_string(),
            currency_code: "UGX".to_string(),
            min_checkout_items: MIN_ITEMS_FOR_CHECKOUT,
            delivery_rate_per_km_ugx: DELIVERY_RATE_PER_KM_UGX,
            payment_delay_ms: DEFAULT_PAYMENT_DELAY_MS,
            payment_success_bps: DEFAULT_PAYMENT_SUCCESS_BPS,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SOKO_STORE_NAME`: Override store name
    /// - `SOKO_MIN_ITEMS`: Override the checkout gate
    /// - `SOKO_DELIVERY_RATE`: Override the per-km rate (whole UGX)
    /// - `SOKO_PAYMENT_DELAY_MS`: Override simulator latency
    /// - `SOKO_PAYMENT_SUCCESS_BPS`: Override simulator success rate
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(store_name) = std::env::var("SOKO_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(raw) = std::env::var("SOKO_MIN_ITEMS") {
            if let Ok(min) = raw.parse::<usize>() {
                config.min_checkout_items = min;
            }
        }

        if let Ok(raw) = std::env::var("SOKO_DELIVERY_RATE") {
            if let Ok(rate) = raw.parse::<i64>() {
                config.delivery_rate_per_km_ugx = rate;
            }
        }

        if let Ok(raw) = std::env::var("SOKO_PAYMENT_DELAY_MS") {
            if let Ok(delay) = raw.parse::<u64>() {
                config.payment_delay_ms = delay;
            }
        }

        if let Ok(raw) = std::env::var("SOKO_PAYMENT_SUCCESS_BPS") {
            if let Ok(bps) = raw.parse::<u32>() {
                config.payment_success_bps = bps.min(10_000);
            }
        }

        config
    }

    /// Formats a whole-shilling amount as a currency string.
    ///
    /// UGX carries no fractional digits; amounts are grouped with
    /// commas for display ("UGX 57,000").
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(57_000), "UGX 57,000");
    /// ```
    pub fn format_currency(&self, amount_ugx: i64) -> String {
        format!(
            "{} {}",
            self.currency_code,
            soko_core::Money::from_ugx(amount_ugx).grouped()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.min_checkout_items, 10);
        assert_eq!(config.delivery_rate_per_km_ugx, 700);
        assert_eq!(config.payment_delay_ms, 2_000);
        assert_eq!(config.payment_success_bps, 9_000);
        assert_eq!(config.currency_code, "UGX");
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(57_000), "UGX 57,000");
        assert_eq!(config.format_currency(0), "UGX 0");
        assert_eq!(config.format_currency(700), "UGX 700");
        assert_eq!(config.format_currency(1_234_567), "UGX 1,234,567");
    }
}
