//! Initial state estimation for additive Holt-Winters
//!
//! The recursion needs a starting level, trend and one seasonal offset per
//! slot before the first update. All estimates are taken from the clean
//! training slice using an additive decomposition.
//!
//! Both estimators require at least two full seasonal cycles
//! (`y.len() >= 2 * period`) and `period >= 1`. Callers validate this before
//! estimating; the functions index the slice directly.

use serde::{Deserialize, Serialize};

/// Starting values for the Holt-Winters recursion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    /// First observation of the training slice
    pub level: f64,
    /// Average per-step slope over the first two cycles
    pub trend: f64,
    /// One additive offset per seasonal slot
    pub seasonals: Vec<f64>,
}

impl InitialState {
    /// Estimate the full starting state from a training slice
    pub fn estimate(y: &[f64], period: usize) -> Self {
        debug_assert!(!y.is_empty());

        Self {
            level: y[0],
            trend: initial_trend(y, period),
            seasonals: initial_seasonal_components(y, period),
        }
    }
}

/// Average of `(y[i + period] - y[i]) / period` for `i` in `0..period`
pub fn initial_trend(y: &[f64], period: usize) -> f64 {
    debug_assert!(period >= 1 && y.len() >= 2 * period);

    let p = period as f64;
    let sum: f64 = (0..period).map(|i| (y[i + period] - y[i]) / p).sum();

    sum / p
}

/// Per-slot average deviation from the mean of each complete cycle.
///
/// Only complete cycles take part; a trailing partial cycle is ignored.
pub fn initial_seasonal_components(y: &[f64], period: usize) -> Vec<f64> {
    debug_assert!(period >= 1 && y.len() >= 2 * period);

    let n_seasons = y.len() / period;
    let season_averages: Vec<f64> = y
        .chunks_exact(period)
        .map(|cycle| cycle.iter().sum::<f64>() / period as f64)
        .collect();

    (0..period)
        .map(|slot| {
            let deviation: f64 = season_averages
                .iter()
                .enumerate()
                .map(|(season, avg)| y[season * period + slot] - avg)
                .sum();
            deviation / n_seasons as f64
        })
        .collect()
}
