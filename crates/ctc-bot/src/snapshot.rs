//! JSON market snapshot.
//!
//! Captures everything the game engine hands the strategy for one
//! sub-round:
//!
//! ```json
//! {
//!   "products": ["S,F,10", "S,C,35000,5"],
//!   "training_rolls": [3, 6, 1],
//!   "current_rolls": [2, 5],
//!   "positions": { "S,F,10": { "position": -2, "average_price": 35010.0 } },
//!   "round_info": { "current_sub_round": 1, "total_sub_rounds": 10 }
//! }
//! ```

use crate::error::{AppError, AppResult};
use ctc_core::{CoreError, PositionBook, Product, Roll, RoundInfo};
use ctc_pricing::{MarketSnapshot, PricingConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub training_rolls: Vec<Roll>,
    #[serde(default)]
    pub current_rolls: Vec<Roll>,
    #[serde(default)]
    pub positions: PositionBook,
    #[serde(default)]
    pub round_info: RoundInfo,
}

impl SnapshotFile {
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Snapshot(format!("Failed to read snapshot {path}: {e}")))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check the input invariants the game engine guarantees.
    ///
    /// Rolls must lie in `[1, dice_sides]`, and the current rolls cannot
    /// exceed the round's roll budget.
    pub fn validate(&self, dice_sides: u32, pricing: &PricingConfig) -> AppResult<()> {
        if let Some(&roll) = self
            .training_rolls
            .iter()
            .chain(self.current_rolls.iter())
            .find(|&&r| r == 0 || r > dice_sides)
        {
            return Err(CoreError::InvalidRoll { roll, dice_sides }.into());
        }

        let total_sub_rounds = self
            .round_info
            .total_sub_rounds(pricing.default_total_sub_rounds);
        let budget = u64::from(total_sub_rounds) * u64::from(pricing.batch_size);
        if self.current_rolls.len() as u64 > budget {
            return Err(AppError::Snapshot(format!(
                "{} current rolls exceed the round budget of {budget}",
                self.current_rolls.len()
            )));
        }
        Ok(())
    }

    /// Borrow as the pricing engine's read-only input.
    pub fn as_market(&self) -> MarketSnapshot<'_> {
        MarketSnapshot {
            products: &self.products,
            training_rolls: &self.training_rolls,
            current_rolls: &self.current_rolls,
            positions: &self.positions,
            round_info: &self.round_info,
        }
    }
}
