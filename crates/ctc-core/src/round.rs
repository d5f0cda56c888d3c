//! Round state and lifecycle payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Outcome of one die, in `[1, dice_sides]`.
pub type Roll = u32;

/// Key for the current sub-round index.
pub const CURRENT_SUB_ROUND: &str = "current_sub_round";
/// Key for the number of sub-rounds in the round.
pub const TOTAL_SUB_ROUNDS: &str = "total_sub_rounds";

/// Round state as a key/value map, advanced externally.
///
/// Keys other than the sub-round counters are kept as arbitrary JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundInfo {
    values: HashMap<String, Value>,
}

impl RoundInfo {
    pub fn new(current_sub_round: u32, total_sub_rounds: u32) -> Self {
        Self::default()
            .with(CURRENT_SUB_ROUND, i64::from(current_sub_round))
            .with(TOTAL_SUB_ROUNDS, i64::from(total_sub_rounds))
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Integer value for `key`, or `default` when absent or not an integer.
    pub fn get(&self, key: &str, default: i64) -> i64 {
        self.values
            .get(key)
            .and_then(as_integer)
            .unwrap_or(default)
    }

    /// Current sub-round, 0 when absent or negative.
    pub fn current_sub_round(&self) -> u32 {
        to_round(self.get(CURRENT_SUB_ROUND, 0))
    }

    /// Total sub-rounds, `default` when absent.
    pub fn total_sub_rounds(&self, default: u32) -> u32 {
        to_round(self.get(TOTAL_SUB_ROUNDS, i64::from(default)))
    }

    /// All rolls for the round have been revealed.
    pub fn is_terminal(&self, default_total: u32) -> bool {
        self.current_sub_round() == self.total_sub_rounds(default_total)
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.fract() == 0.0 && v.abs() <= i64::MAX as f64)
            .map(|v| v as i64)
    })
}

fn to_round(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// One-time configuration received at game start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_dice_sides")]
    pub dice_sides: u32,
    #[serde(default = "default_team_name")]
    pub team_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dice_sides: default_dice_sides(),
            team_name: default_team_name(),
        }
    }
}

fn default_dice_sides() -> u32 {
    6
}

fn default_team_name() -> String {
    "Unknown".to_string()
}

/// Result delivered at the end of each round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    #[serde(default)]
    pub pnl: f64,
    #[serde(default)]
    pub dice_rolls: Vec<Roll>,
}

/// Summary delivered at the end of the game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    #[serde(default)]
    pub total_pnl: f64,
    #[serde(default)]
    pub final_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_info_defaults() {
        let info = RoundInfo::default();
        assert_eq!(info.current_sub_round(), 0);
        assert_eq!(info.total_sub_rounds(10), 10);
        assert!(!info.is_terminal(10));
    }

    #[test]
    fn test_round_info_terminal() {
        let info = RoundInfo::new(10, 10);
        assert!(info.is_terminal(7));
        assert!(!RoundInfo::new(9, 10).is_terminal(10));
    }

    #[test]
    fn test_negative_round_clamped() {
        let info = RoundInfo::default().with(CURRENT_SUB_ROUND, -4);
        assert_eq!(info.current_sub_round(), 0);
    }

    #[test]
    fn test_round_info_from_json() {
        let info: RoundInfo =
            serde_json::from_str(r#"{"current_sub_round": 3, "total_sub_rounds": 8}"#).unwrap();
        assert_eq!(info.current_sub_round(), 3);
        assert_eq!(info.total_sub_rounds(10), 8);
        assert_eq!(info.get("missing", 42), 42);
    }

    #[test]
    fn test_round_info_tolerates_extra_keys() {
        let info: RoundInfo = serde_json::from_str(
            r#"{"current_sub_round": 4.0, "total_sub_rounds": 10, "phase": "trading", "meta": {"id": 7}}"#,
        )
        .unwrap();
        assert_eq!(info.current_sub_round(), 4);
        assert_eq!(info.total_sub_rounds(6), 10);
        assert_eq!(info.get("phase", -1), -1);
    }

    #[test]
    fn test_non_integer_counter_uses_default() {
        let info = RoundInfo::default().with(TOTAL_SUB_ROUNDS, "ten");
        assert_eq!(info.total_sub_rounds(10), 10);
        assert!(!RoundInfo::default().with(CURRENT_SUB_ROUND, 2.5).is_terminal(2));
    }

    #[test]
    fn test_game_config_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.dice_sides, 6);
        assert_eq!(config.team_name, "Unknown");
        assert_eq!(config, GameConfig::default());
    }
}
