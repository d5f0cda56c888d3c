//! Application configuration.

use crate::error::{AppError, AppResult};
use ctc_core::GameConfig;
use ctc_pricing::PricingConfig;
use serde::{Deserialize, Serialize};

/// Default config path when neither `--config` nor `CTC_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Game start configuration (dice sides, team name).
    #[serde(default)]
    pub game: GameConfig,

    /// Pricing engine parameters.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.game.dice_sides < 2 {
            return Err(AppError::Config(format!(
                "game.dice_sides must be at least 2, got {}",
                self.game.dice_sides
            )));
        }
        self.pricing.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctc_pricing::FutureSpreadBasis;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.game.dice_sides, 6);
        assert_eq!(config.pricing.batch_size, 2000);
    }

    #[test]
    fn test_sections_parsed() {
        let toml_str = r#"
[game]
dice_sides = 10000
team_name = "rollers"

[pricing]
batch_size = 200
z_score = 1.96
future_spread_basis = "standard_error"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.game.dice_sides, 10_000);
        assert_eq!(config.game.team_name, "rollers");
        assert_eq!(config.pricing.batch_size, 200);
        assert!((config.pricing.z_score - 1.96).abs() < f64::EPSILON);
        assert_eq!(
            config.pricing.future_spread_basis,
            FutureSpreadBasis::StandardError
        );
        assert!((config.pricing.min_price - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_toml_str("[game]\ndice_sides = 1\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = AppConfig::from_toml_str("[pricing]\nmax_skew_fraction = 1.5\n").unwrap_err();
        assert!(matches!(err, AppError::Core(_)));

        let err = AppConfig::from_toml_str("[pricing\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/nonexistent/ctc.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ctc.toml"));
    }
}
