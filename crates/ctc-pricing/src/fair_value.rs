//! Fair values under a normal approximation of the roll sum.
//!
//! Futures are linear in the sum, so their fair value is the expected
//! total. Options use the Bachelier (additive) closed form:
//!
//! - call: `(S−K)·Φ(d) + σ·φ(d)`, `d = (S−K)/σ`
//! - put:  `(K−S)·Φ(−d) + σ·φ(−d)`
//!
//! With `σ = 0` both collapse to intrinsic value.

use ctc_core::ProductKind;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use crate::distribution::{HorizonEstimate, RollDistribution};

fn std_normal() -> Option<Normal> {
    Normal::new(0.0, 1.0).ok()
}

pub fn future_fair_value(estimate: &HorizonEstimate) -> f64 {
    estimate.expected_total
}

/// Expected payoff of `max(0, sum − strike)`.
pub fn call_fair_value(estimate: &HorizonEstimate, strike: f64) -> Option<f64> {
    let s = estimate.expected_total;
    let sigma = estimate.std_dev;
    if sigma <= 0.0 {
        return Some((s - strike).max(0.0));
    }

    let n = std_normal()?;
    let d = (s - strike) / sigma;
    let value = (s - strike) * n.cdf(d) + sigma * n.pdf(d);
    value.is_finite().then_some(value.max(0.0))
}

/// Expected payoff of `max(0, strike − sum)`.
pub fn put_fair_value(estimate: &HorizonEstimate, strike: f64) -> Option<f64> {
    let s = estimate.expected_total;
    let sigma = estimate.std_dev;
    if sigma <= 0.0 {
        return Some((strike - s).max(0.0));
    }

    let n = std_normal()?;
    let d = (s - strike) / sigma;
    let value = (strike - s) * n.cdf(-d) + sigma * n.pdf(-d);
    value.is_finite().then_some(value.max(0.0))
}

/// Fair value of a product with the horizon estimate it was priced against.
///
/// Returns `None` for invalid products, which are then left unquoted.
pub fn fair_value(kind: &ProductKind, dist: &RollDistribution) -> Option<(f64, HorizonEstimate)> {
    let estimate = dist.at_horizon(kind.horizon()?);
    let value = match *kind {
        ProductKind::Future { .. } => future_fair_value(&estimate),
        ProductKind::Call { strike, .. } => call_fair_value(&estimate, strike)?,
        ProductKind::Put { strike, .. } => put_fair_value(&estimate, strike)?,
        ProductKind::Invalid => return None,
    };
    Some((value, estimate))
}
