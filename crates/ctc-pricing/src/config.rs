//! Pricing configuration.

use ctc_core::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Uncertainty measure used to size futures spreads.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FutureSpreadBasis {
    /// `z × σ_total`: spread of the roll sum still to be revealed.
    #[default]
    TotalStdDev,
    /// `z × (σ_roll / √n) × rolls_to_horizon`: uncertainty of the mean estimate.
    StandardError,
}

/// Market making configuration for dice derivatives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// Rolls revealed per sub-round.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Sub-rounds per round when round info omits the count.
    #[serde(default = "default_total_sub_rounds")]
    pub default_total_sub_rounds: u32,

    /// Dice faces assumed until the game start config arrives.
    #[serde(default = "default_dice_sides")]
    pub default_dice_sides: u32,

    /// Z-score for the futures confidence interval (1.645 = 90% two-sided).
    #[serde(default = "default_z_score")]
    pub z_score: f64,

    #[serde(default)]
    pub future_spread_basis: FutureSpreadBasis,

    /// Minimum futures half-spread, so settled rounds keep a tradeable spread.
    #[serde(default = "default_min_future_half_spread")]
    pub min_future_half_spread: f64,

    /// Options half-spread as a fraction of fair value.
    #[serde(default = "default_option_spread_ratio")]
    pub option_spread_ratio: f64,

    /// Minimum options half-spread.
    #[serde(default = "default_min_option_half_spread")]
    pub min_option_half_spread: f64,

    /// Center shift per contract of net position, as a fraction of half-spread.
    /// Long inventory shifts quotes down, short inventory shifts them up.
    #[serde(default = "default_skew_per_unit")]
    pub skew_per_unit: f64,

    /// Skew cap as a fraction of half-spread. Must stay below 1.0.
    #[serde(default = "default_max_skew_fraction")]
    pub max_skew_fraction: f64,

    /// Lowest bid ever quoted.
    #[serde(default = "default_min_price")]
    pub min_price: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            default_total_sub_rounds: default_total_sub_rounds(),
            default_dice_sides: default_dice_sides(),
            z_score: default_z_score(),
            future_spread_basis: FutureSpreadBasis::default(),
            min_future_half_spread: default_min_future_half_spread(),
            option_spread_ratio: default_option_spread_ratio(),
            min_option_half_spread: default_min_option_half_spread(),
            skew_per_unit: default_skew_per_unit(),
            max_skew_fraction: default_max_skew_fraction(),
            min_price: default_min_price(),
        }
    }
}

impl PricingConfig {
    /// Reject configurations that could produce crossed or non-positive quotes.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(CoreError::InvalidConfig(msg));

        if self.batch_size == 0 {
            return invalid("batch_size must be positive".to_string());
        }
        if self.default_dice_sides < 2 {
            return invalid(format!(
                "default_dice_sides must be at least 2, got {}",
                self.default_dice_sides
            ));
        }
        for (name, value) in [
            ("z_score", self.z_score),
            ("min_future_half_spread", self.min_future_half_spread),
            ("option_spread_ratio", self.option_spread_ratio),
            ("min_option_half_spread", self.min_option_half_spread),
            ("skew_per_unit", self.skew_per_unit),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and non-negative, got {value}"));
            }
        }
        if !(0.0..1.0).contains(&self.max_skew_fraction) {
            return invalid(format!(
                "max_skew_fraction must be in [0, 1), got {}",
                self.max_skew_fraction
            ));
        }
        if !self.min_price.is_finite() || self.min_price <= 0.0 {
            return invalid(format!("min_price must be positive, got {}", self.min_price));
        }
        Ok(())
    }
}

fn default_batch_size() -> u32 {
    2000
}
fn default_total_sub_rounds() -> u32 {
    10
}
fn default_dice_sides() -> u32 {
    6
}
fn default_z_score() -> f64 {
    1.645
}
fn default_min_future_half_spread() -> f64 {
    1.0
}
fn default_option_spread_ratio() -> f64 {
    0.05 // 5% of fair value
}
fn default_min_option_half_spread() -> f64 {
    0.5
}
fn default_skew_per_unit() -> f64 {
    0.2 // 20% of half-spread per contract
}
fn default_max_skew_fraction() -> f64 {
    0.9
}
fn default_min_price() -> f64 {
    0.1
}
