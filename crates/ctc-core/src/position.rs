//! Position snapshot supplied by the external trade ledger.
//!
//! The ledger owns and mutates positions; the pricing engine only reads
//! them through [`PositionLookup`] for the duration of one quoting call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub buyer_id: String,
    pub seller_id: String,
    pub price: f64,
    pub round_traded: u32,
    /// +1 when we bought, -1 when we sold.
    pub quantity: i64,
}

/// Net position in one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Net contracts (positive = long, negative = short).
    #[serde(default)]
    pub position: i64,
    /// Volume-weighted average entry price.
    #[serde(default)]
    pub average_price: f64,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

/// Query-by-product-id access to positions.
pub trait PositionLookup {
    fn get_position(&self, product_id: &str) -> Option<&Position>;

    /// Net position, zero when the product has never been traded.
    fn net_position(&self, product_id: &str) -> i64 {
        self.get_position(product_id)
            .map(|p| p.position)
            .unwrap_or(0)
    }
}

/// Aggregate ledger statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionSummary {
    /// Products with a non-zero net position.
    pub open_products: usize,
    pub total_trades: usize,
    /// Sum of absolute net positions.
    pub gross_contracts: i64,
    /// Sum of signed net positions.
    pub net_contracts: i64,
}

/// Immutable per-product position snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionBook {
    positions: HashMap<String, Position>,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, product_id: impl Into<String>, position: Position) -> Self {
        self.positions.insert(product_id.into(), position);
        self
    }

    pub fn summary(&self) -> PositionSummary {
        self.positions
            .values()
            .fold(PositionSummary::default(), |mut acc, p| {
                if p.position != 0 {
                    acc.open_products += 1;
                }
                acc.total_trades += p.trades.len();
                acc.gross_contracts += p.position.abs();
                acc.net_contracts += p.position;
                acc
            })
    }
}

impl PositionLookup for PositionBook {
    fn get_position(&self, product_id: &str) -> Option<&Position> {
        self.positions.get(product_id)
    }
}

impl FromIterator<(String, Position)> for PositionBook {
    fn from_iter<I: IntoIterator<Item = (String, Position)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
