//! Per-sub-round market making strategy.
//!
//! `MarketMaker` is invoked once per sub-round with a read-only snapshot of
//! the products, roll history, positions and round state, and returns the
//! quotes for every product it can price. Nothing but configuration
//! survives between calls.
//!
//! Lifecycle hooks (`on_game_start`, `on_round_end`, `on_game_end`) only
//! record configuration and log; they never affect pricing of a given
//! snapshot beyond the dice side count.

use ctc_core::{GameConfig, GameSummary, PositionLookup, Product, Roll, RoundInfo, RoundResult};
use tracing::{debug, info, warn};

use crate::config::PricingConfig;
use crate::distribution::RollDistribution;
use crate::fair_value::fair_value;
use crate::quote_engine::{compute_quote, half_spread, Quote, QuoteBook};

/// Number of revealed rolls echoed in the end-of-round log.
const LOGGED_ROLLS: usize = 10;

/// Inputs for one quoting call, borrowed from the game engine.
#[derive(Clone, Copy)]
pub struct MarketSnapshot<'a> {
    pub products: &'a [Product],
    pub training_rolls: &'a [Roll],
    pub current_rolls: &'a [Roll],
    pub positions: &'a dyn PositionLookup,
    pub round_info: &'a RoundInfo,
}

/// Participant interface called by the game engine.
pub trait TradingStrategy {
    fn on_game_start(&mut self, config: &GameConfig);

    /// Quotes for the current sub-round. Products without an entry are not quoted.
    fn make_market(&self, snapshot: &MarketSnapshot<'_>) -> QuoteBook;

    fn on_round_end(&mut self, result: &RoundResult);

    fn on_game_end(&mut self, summary: &GameSummary);
}

/// Statistical market maker for dice roll-sum derivatives.
#[derive(Debug, Clone)]
pub struct MarketMaker {
    config: PricingConfig,
    dice_sides: u32,
    team_name: String,
}

impl MarketMaker {
    pub fn new(config: PricingConfig) -> Self {
        let dice_sides = config.default_dice_sides;
        Self {
            config,
            dice_sides,
            team_name: GameConfig::default().team_name,
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn dice_sides(&self) -> u32 {
        self.dice_sides
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// Roll-sum distribution implied by a snapshot.
    pub fn distribution(&self, snapshot: &MarketSnapshot<'_>) -> RollDistribution {
        let terminal = snapshot
            .round_info
            .is_terminal(self.config.default_total_sub_rounds);
        RollDistribution::from_history(
            snapshot.training_rolls,
            snapshot.current_rolls,
            terminal,
            self.dice_sides,
            self.config.batch_size,
        )
    }

    fn quote_product(
        &self,
        product: &Product,
        dist: &RollDistribution,
        positions: &dyn PositionLookup,
    ) -> Option<Quote> {
        let (value, estimate) = fair_value(&product.kind, dist)?;
        let hs = half_spread(&product.kind, value, &estimate, dist.stats(), &self.config);
        let position = positions.net_position(&product.id);
        let quote = compute_quote(value, hs, position, &self.config);
        if !(quote.bid.is_finite() && quote.ask.is_finite()) {
            warn!(product = %product, fair_value = value, "Quote overflows, not quoting");
            return None;
        }
        Some(quote)
    }
}

impl Default for MarketMaker {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl TradingStrategy for MarketMaker {
    fn on_game_start(&mut self, config: &GameConfig) {
        if config.dice_sides < 2 {
            warn!(
                dice_sides = config.dice_sides,
                kept = self.dice_sides,
                "Ignoring invalid dice side count"
            );
        } else {
            self.dice_sides = config.dice_sides;
        }
        self.team_name = config.team_name.clone();
        info!(
            team = %self.team_name,
            dice_sides = self.dice_sides,
            "Strategy starting"
        );
    }

    fn make_market(&self, snapshot: &MarketSnapshot<'_>) -> QuoteBook {
        let dist = self.distribution(snapshot);
        let stats = dist.stats();

        let mut quotes = QuoteBook::new();
        for product in snapshot.products {
            match self.quote_product(product, &dist, snapshot.positions) {
                Some(quote) => {
                    quotes.insert(product.id.clone(), quote);
                }
                None => debug!(product = %product, "No fair value, not quoting"),
            }
        }

        debug!(
            sub_round = snapshot.round_info.current_sub_round(),
            terminal = dist.is_terminal(),
            mean_roll = stats.mean,
            std_dev_roll = stats.std_dev,
            samples = stats.sample_count,
            quoted = quotes.len(),
            skipped = snapshot.products.len() - quotes.len(),
            "Sub-round quotes computed"
        );

        quotes
    }

    fn on_round_end(&mut self, result: &RoundResult) {
        let shown = &result.dice_rolls[..result.dice_rolls.len().min(LOGGED_ROLLS)];
        info!(
            team = %self.team_name,
            pnl = format_args!("{:.2}", result.pnl),
            rolls = result.dice_rolls.len(),
            first_rolls = ?shown,
            "Round ended"
        );
    }

    fn on_game_end(&mut self, summary: &GameSummary) {
        info!(
            team = %self.team_name,
            total_pnl = format_args!("{:.2}", summary.total_pnl),
            final_score = format_args!("{:.1}", summary.final_score),
            "Game ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctc_core::{Position, PositionBook, ProductKind};

    fn products(ids: &[&str]) -> Vec<Product> {
        ids.iter().map(|id| Product::new(*id)).collect()
    }

    fn quote(
        mm: &MarketMaker,
        products: &[Product],
        training: &[Roll],
        current: &[Roll],
        positions: &PositionBook,
        round: &RoundInfo,
    ) -> QuoteBook {
        mm.make_market(&MarketSnapshot {
            products,
            training_rolls: training,
            current_rolls: current,
            positions,
            round_info: round,
        })
    }

    #[test]
    fn test_malformed_products_not_quoted() {
        let mm = MarketMaker::default();
        let products = products(&["S,F,10", "S,X,100", "S,C,abc,5", "garbage", "S,P,30000,5"]);
        let quotes = quote(
            &mm,
            &products,
            &[1, 2, 3, 4, 5, 6],
            &[],
            &PositionBook::new(),
            &RoundInfo::new(0, 10),
        );

        assert_eq!(quotes.len(), 2);
        assert!(quotes.contains_key("S,F,10"));
        assert!(quotes.contains_key("S,P,30000,5"));
        assert!(!quotes.contains_key("S,X,100"));
        assert!(!quotes.contains_key("S,C,abc,5"));
    }

    #[test]
    fn test_terminal_future_prices_realized_sum() {
        let mut mm = MarketMaker::default();
        mm.on_game_start(&GameConfig {
            dice_sides: 10_000,
            team_name: "test".to_string(),
        });

        let products = products(&["S,F,10"]);
        let current = vec![5000; 10_000];
        let dist = mm.distribution(&MarketSnapshot {
            products: &products,
            training_rolls: &[1; 2000],
            current_rolls: &current,
            positions: &PositionBook::new(),
            round_info: &RoundInfo::new(10, 10),
        });
        let (value, estimate) = fair_value(&products[0].kind, &dist).unwrap();
        assert_eq!(value, 50_000_000.0);
        assert_eq!(estimate.std_dev, 0.0);

        // Flat position: quote centered on the realised sum with the floor spread
        let quotes = quote(
            &mm,
            &products,
            &[1; 2000],
            &current,
            &PositionBook::new(),
            &RoundInfo::new(10, 10),
        );
        let q = quotes["S,F,10"];
        assert_eq!(q.mid(), 50_000_000.0);
        assert_eq!(q.width(), 2.0 * mm.config().min_future_half_spread);
    }

    #[test]
    fn test_revealed_future_prices_realized_sum_mid_round() {
        let mut mm = MarketMaker::default();
        mm.on_game_start(&GameConfig {
            dice_sides: 10_000,
            team_name: "test".to_string(),
        });

        // Five of ten sub-rounds revealed; training history averages far higher
        let products = products(&["S,F,2", "S,C,3000000,2"]);
        let current = vec![1000; 10_000];
        let quotes = quote(
            &mm,
            &products,
            &[9000; 2000],
            &current,
            &PositionBook::new(),
            &RoundInfo::new(5, 10),
        );

        let future = quotes["S,F,2"];
        assert_eq!(future.mid(), 4_000_000.0);
        assert_eq!(future.width(), 2.0 * mm.config().min_future_half_spread);

        // Option on the known sum is worth its intrinsic value
        let call = quotes["S,C,3000000,2"];
        assert!((call.mid() - 1_000_000.0).abs() < 1e-6, "{call:?}");
    }

    #[test]
    fn test_overflowing_quote_skipped() {
        let mm = MarketMaker::default();
        let products = products(&["S,P,1.79e308,10", "S,F,10"]);
        let quotes = quote(
            &mm,
            &products,
            &[1, 2, 3, 4, 5, 6],
            &[],
            &PositionBook::new(),
            &RoundInfo::new(0, 10),
        );

        assert!(!quotes.contains_key("S,P,1.79e308,10"));
        assert!(quotes.contains_key("S,F,10"));
    }

    #[test]
    fn test_all_quotes_valid() {
        let mm = MarketMaker::default();
        let products = products(&[
            "S,F,0", "S,F,1", "S,F,10", "S,C,35000,5", "S,C,1,5", "S,C,1000000,10", "S,P,35000,5",
            "S,P,1,5", "S,P,-10,3",
        ]);
        let training: Vec<Roll> = (0..2000).map(|i| (i % 6) + 1).collect();
        let current: Vec<Roll> = (0..4000).map(|i| (i * 7 % 6) + 1).collect();

        for position in [-50, -3, 0, 2, 40] {
            let positions: PositionBook = products
                .iter()
                .map(|p| {
                    (
                        p.id.clone(),
                        Position {
                            position,
                            ..Default::default()
                        },
                    )
                })
                .collect();
            for sub_round in [0, 2, 9, 10] {
                let quotes = quote(
                    &mm,
                    &products,
                    &training,
                    &current,
                    &positions,
                    &RoundInfo::new(sub_round, 10),
                );
                assert_eq!(quotes.len(), products.len());
                for (id, q) in &quotes {
                    assert!(q.bid <= q.ask, "{id}: {q:?}");
                    assert!(q.bid >= mm.config().min_price, "{id}: {q:?}");
                }
            }
        }
    }

    #[test]
    fn test_long_position_skews_down() {
        let mm = MarketMaker::default();
        let products = products(&["S,F,10", "S,C,35000,10"]);
        let training: Vec<Roll> = (0..2000).map(|i| (i % 6) + 1).collect();
        let round = RoundInfo::new(3, 10);

        let flat = quote(&mm, &products, &training, &[], &PositionBook::new(), &round);
        let long_book = PositionBook::new()
            .with_position(
                "S,F,10",
                Position {
                    position: 3,
                    ..Default::default()
                },
            )
            .with_position(
                "S,C,35000,10",
                Position {
                    position: 3,
                    ..Default::default()
                },
            );
        let long = quote(&mm, &products, &training, &[], &long_book, &round);

        for id in ["S,F,10", "S,C,35000,10"] {
            assert!(long[id].mid() < flat[id].mid(), "{id}");
            // Skew moves the center, not the width (unless floored)
            assert!((long[id].width() - flat[id].width()).abs() < 1e-9, "{id}");
        }
    }

    #[test]
    fn test_empty_history_uses_uniform_fallback() {
        let mut mm = MarketMaker::default();
        let products = products(&["S,F,1"]);
        let round = RoundInfo::default();

        let quotes = quote(&mm, &products, &[], &[], &PositionBook::new(), &round);
        assert!((quotes["S,F,1"].mid() - 3.5 * 2000.0).abs() < 1e-6);

        mm.on_game_start(&GameConfig {
            dice_sides: 10_000,
            team_name: "dice".to_string(),
        });
        let quotes = quote(&mm, &products, &[], &[], &PositionBook::new(), &round);
        assert!((quotes["S,F,1"].mid() - 5000.5 * 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_put_call_parity_through_strategy() {
        let mm = MarketMaker::default();
        let training: Vec<Roll> = (0..2000).map(|i| (i % 6) + 1).collect();
        let current: Vec<Roll> = (0..2000).map(|i| (i % 5) + 2).collect();
        let snapshot_products = products(&["S,F,5"]);
        let dist = mm.distribution(&MarketSnapshot {
            products: &snapshot_products,
            training_rolls: &training,
            current_rolls: &current,
            positions: &PositionBook::new(),
            round_info: &RoundInfo::new(1, 10),
        });

        let call = ProductKind::Call {
            strike: 35_100.0,
            expiry: 5,
        };
        let put = ProductKind::Put {
            strike: 35_100.0,
            expiry: 5,
        };
        let (c, est) = fair_value(&call, &dist).unwrap();
        let (p, _) = fair_value(&put, &dist).unwrap();
        assert!((c - p - (est.expected_total - 35_100.0)).abs() < 1e-6);
    }

    #[test]
    fn test_game_start_rejects_degenerate_dice() {
        let mut mm = MarketMaker::default();
        mm.on_game_start(&GameConfig {
            dice_sides: 0,
            team_name: "zero".to_string(),
        });
        assert_eq!(mm.dice_sides(), 6);
        assert_eq!(mm.team_name(), "zero");
    }

    #[test]
    fn test_lifecycle_hooks_accept_payloads() {
        let mut mm = MarketMaker::default();
        mm.on_round_end(&RoundResult {
            pnl: 12.5,
            dice_rolls: (1..=20).collect(),
        });
        mm.on_round_end(&RoundResult::default());
        mm.on_game_end(&GameSummary {
            total_pnl: 100.0,
            final_score: 87.5,
        });
        assert_eq!(mm.dice_sides(), 6);
    }
}
