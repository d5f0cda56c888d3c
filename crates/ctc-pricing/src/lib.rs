//! Pricing engine for dice roll-sum derivatives.
//!
//! Evaluated once per sub-round:
//! - Distribution estimation from training and current rolls
//! - Fair values for futures and options at each product's horizon
//! - Quote calculation with per-type spreads and inventory skew
//!
//! # Architecture
//!
//! ```text
//! Roll history → estimate_roll_stats() → RollDistribution
//!                  └─ at_horizon(N): expected total, σ of total
//!                       ↓
//! Product → fair_value() → half_spread() + inventory_skew()
//!                              ↓
//!                         compute_quote() → (bid, ask)
//! ```

pub mod config;
pub mod distribution;
pub mod fair_value;
pub mod quote_engine;
pub mod strategy;

pub use config::{FutureSpreadBasis, PricingConfig};
pub use distribution::{estimate_roll_stats, HorizonEstimate, RollDistribution, RollStats};
pub use fair_value::{call_fair_value, fair_value, future_fair_value, put_fair_value};
pub use quote_engine::{compute_quote, half_spread, inventory_skew, Quote, QuoteBook};
pub use strategy::{MarketMaker, MarketSnapshot, TradingStrategy};
