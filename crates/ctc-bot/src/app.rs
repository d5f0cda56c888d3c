//! Application orchestration.
//!
//! Holds one `MarketMaker` configured at start-up and feeds it
//! snapshots and lifecycle events.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::snapshot::SnapshotFile;
use ctc_core::{GameSummary, RoundResult};
use ctc_pricing::{MarketMaker, QuoteBook, TradingStrategy};
use tracing::info;

/// Main application.
pub struct Application {
    config: AppConfig,
    maker: MarketMaker,
}

impl Application {
    /// Create the application and deliver the game start configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;

        let mut maker = MarketMaker::new(config.pricing.clone());
        maker.on_game_start(&config.game);

        Ok(Self { config, maker })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn maker(&self) -> &MarketMaker {
        &self.maker
    }

    /// Validate a snapshot and quote it.
    pub fn quote(&self, snapshot: &SnapshotFile) -> AppResult<QuoteBook> {
        snapshot.validate(self.maker.dice_sides(), &self.config.pricing)?;

        let quotes = self.maker.make_market(&snapshot.as_market());
        let book = snapshot.positions.summary();
        info!(
            sub_round = snapshot.round_info.current_sub_round(),
            products = snapshot.products.len(),
            quoted = quotes.len(),
            open_products = book.open_products,
            net_contracts = book.net_contracts,
            "Snapshot quoted"
        );
        Ok(quotes)
    }

    pub fn end_round(&mut self, result: &RoundResult) {
        self.maker.on_round_end(result);
    }

    pub fn end_game(&mut self, summary: &GameSummary) {
        self.maker.on_game_end(summary);
    }
}
