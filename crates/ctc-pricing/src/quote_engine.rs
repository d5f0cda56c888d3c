//! Quote price calculation engine.
//!
//! Computes bid/ask prices based on:
//! - Fair value (model expectation of the payoff)
//! - Per-type half-spread (confidence interval for futures, proportional for options)
//! - Inventory skew (shift quotes to reduce exposure)

use std::collections::BTreeMap;

use ctc_core::ProductKind;
use serde::Serialize;

use crate::config::{FutureSpreadBasis, PricingConfig};
use crate::distribution::{HorizonEstimate, RollStats};

/// Two-sided quote for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "(f64, f64)")]
pub struct Quote {
    pub bid: f64,
    pub ask: f64,
}

impl Quote {
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.ask - self.bid
    }
}

impl From<Quote> for (f64, f64) {
    fn from(quote: Quote) -> Self {
        (quote.bid, quote.ask)
    }
}

/// Quotes keyed by product id. Unquoted products have no entry.
pub type QuoteBook = BTreeMap<String, Quote>;

/// Half-spread for a product.
///
/// Futures: `max(floor, z × uncertainty)` where the uncertainty is the
/// roll-sum deviation (or the scaled standard error, per
/// `future_spread_basis`). A settled horizon quotes the floor.
///
/// Options: `max(floor, ratio × fair_value)`.
pub fn half_spread(
    kind: &ProductKind,
    fair_value: f64,
    estimate: &HorizonEstimate,
    stats: &RollStats,
    config: &PricingConfig,
) -> f64 {
    if kind.is_option() {
        return (config.option_spread_ratio * fair_value).max(config.min_option_half_spread);
    }

    if estimate.settled {
        return config.min_future_half_spread;
    }

    let uncertainty = match config.future_spread_basis {
        FutureSpreadBasis::TotalStdDev => estimate.std_dev,
        FutureSpreadBasis::StandardError => {
            stats.standard_error() * estimate.rolls_to_horizon as f64
        }
    };
    (config.z_score * uncertainty).max(config.min_future_half_spread)
}

/// Center shift for a net position.
///
/// Proportional to position with the opposite sign (long → negative shift),
/// capped at `max_skew_fraction × half_spread`.
pub fn inventory_skew(position: i64, half_spread: f64, config: &PricingConfig) -> f64 {
    let cap = config.max_skew_fraction * half_spread;
    if !cap.is_finite() || cap <= 0.0 {
        return 0.0;
    }

    let raw = -(position as f64) * config.skew_per_unit * half_spread;
    raw.max(-cap).min(cap)
}

/// Final quote around a fair value.
///
/// `bid = max(min_price, center − half_spread)`, `ask = center + half_spread`,
/// never below the bid.
pub fn compute_quote(
    fair_value: f64,
    half_spread: f64,
    position: i64,
    config: &PricingConfig,
) -> Quote {
    let center = fair_value + inventory_skew(position, half_spread, config);

    let bid = (center - half_spread).max(config.min_price);
    let ask = (center + half_spread).max(bid);

    Quote { bid, ask }
}
