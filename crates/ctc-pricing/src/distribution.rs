//! Roll-sum distribution estimation.
//!
//! Estimates the mean and population standard deviation of a single roll
//! from the pooled training and current rolls, then extrapolates to the
//! roll sum at a product's horizon:
//!
//! - `expected_total = mean × rolls_to_horizon`
//! - `std_dev = σ_roll × √(rolls still unrevealed by the horizon)`
//!
//! Revealed rolls contribute no variance. A horizon whose rolls have all
//! been revealed, and every horizon once the round is terminal, settles on
//! the realised sum with σ = 0.

use ctc_core::Roll;
use tracing::warn;

/// Empirical statistics of a single roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollStats {
    /// Mean roll.
    pub mean: f64,
    /// Population standard deviation of a roll.
    pub std_dev: f64,
    /// Number of rolls in the sample.
    pub sample_count: usize,
    /// False when the sample was empty and the theoretical values were used.
    pub is_empirical: bool,
}

impl RollStats {
    /// Discrete uniform distribution over `[1, dice_sides]`.
    pub fn uniform(dice_sides: u32) -> Self {
        let n = f64::from(dice_sides);
        Self {
            mean: (1.0 + n) / 2.0,
            std_dev: ((n * n - 1.0) / 12.0).max(0.0).sqrt(),
            sample_count: 0,
            is_empirical: false,
        }
    }

    /// Standard error of the mean roll. Without a sample the full roll
    /// deviation is returned.
    pub fn standard_error(&self) -> f64 {
        if self.sample_count == 0 {
            self.std_dev
        } else {
            self.std_dev / (self.sample_count as f64).sqrt()
        }
    }
}

/// Estimate single-roll statistics.
///
/// At the terminal sub-round only `current_rolls` are used: they are the
/// complete outcome of the round. Otherwise training and current rolls are
/// pooled. An empty sample falls back to [`RollStats::uniform`].
pub fn estimate_roll_stats(
    training_rolls: &[Roll],
    current_rolls: &[Roll],
    terminal: bool,
    dice_sides: u32,
) -> RollStats {
    let training: &[Roll] = if terminal { &[] } else { training_rolls };
    let sample = || training.iter().chain(current_rolls.iter()).copied();

    let count = training.len() + current_rolls.len();
    if count == 0 {
        return RollStats::uniform(dice_sides);
    }

    let out_of_range = sample().filter(|&r| r == 0 || r > dice_sides).count();
    if out_of_range > 0 {
        warn!(
            out_of_range,
            dice_sides, "Rolls outside [1, dice_sides] in history"
        );
    }

    let n = count as f64;
    let mean = sample().map(f64::from).sum::<f64>() / n;
    let variance = sample()
        .map(|r| {
            let d = f64::from(r) - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    RollStats {
        mean,
        std_dev: variance.max(0.0).sqrt(),
        sample_count: count,
        is_empirical: true,
    }
}

/// Roll-sum estimate at one horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonEstimate {
    /// Sub-round at which the sum is taken.
    pub horizon: u32,
    /// Rolls contributing to the sum at the horizon.
    pub rolls_to_horizon: u64,
    /// Rolls not yet revealed by the horizon.
    pub remaining_rolls: u64,
    /// Expected roll sum.
    pub expected_total: f64,
    /// Standard deviation of the roll sum.
    pub std_dev: f64,
    /// The sum is already realised.
    pub settled: bool,
}

/// Distribution of the roll sum for the current sub-round.
#[derive(Debug, Clone)]
pub struct RollDistribution {
    stats: RollStats,
    batch_size: u32,
    terminal: bool,
    /// Prefix sums of the current rolls; `realized[n]` is the sum of the first `n`.
    realized: Vec<u64>,
}

impl RollDistribution {
    pub fn new(stats: RollStats, current_rolls: &[Roll], terminal: bool, batch_size: u32) -> Self {
        let mut realized = Vec::with_capacity(current_rolls.len() + 1);
        let mut acc = 0u64;
        realized.push(acc);
        for &roll in current_rolls {
            acc += u64::from(roll);
            realized.push(acc);
        }

        Self {
            stats,
            batch_size,
            terminal,
            realized,
        }
    }

    /// Estimate from roll history in one step.
    pub fn from_history(
        training_rolls: &[Roll],
        current_rolls: &[Roll],
        terminal: bool,
        dice_sides: u32,
        batch_size: u32,
    ) -> Self {
        let stats = estimate_roll_stats(training_rolls, current_rolls, terminal, dice_sides);
        Self::new(stats, current_rolls, terminal, batch_size)
    }

    pub fn stats(&self) -> &RollStats {
        &self.stats
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Number of current-round rolls revealed so far.
    pub fn observed(&self) -> u64 {
        (self.realized.len() - 1) as u64
    }

    /// Roll-sum estimate at sub-round `horizon`.
    ///
    /// Settles on the realised prefix sum when the round is terminal or
    /// every roll up to the horizon has been revealed.
    pub fn at_horizon(&self, horizon: u32) -> HorizonEstimate {
        let rolls_to_horizon = u64::from(horizon) * u64::from(self.batch_size);
        let observed = self.observed();

        if self.terminal || rolls_to_horizon <= observed {
            let n = rolls_to_horizon.min(observed) as usize;
            return HorizonEstimate {
                horizon,
                rolls_to_horizon,
                remaining_rolls: 0,
                expected_total: self.realized[n] as f64,
                std_dev: 0.0,
                settled: true,
            };
        }

        let remaining_rolls = rolls_to_horizon - observed;
        HorizonEstimate {
            horizon,
            rolls_to_horizon,
            remaining_rolls,
            expected_total: self.stats.mean * rolls_to_horizon as f64,
            std_dev: self.stats.std_dev * (remaining_rolls as f64).sqrt(),
            settled: false,
        }
    }
}
