//! Additive Holt-Winters triple exponential smoothing
//!
//! ```text
//! Level:    L_t = α (x_t - S_s) + (1 - α)(L_{t-1} + T_{t-1})
//! Trend:    T_t = β (L_t - L_{t-1}) + (1 - β) T_{t-1}
//! Season:   S_s = γ (x_t - L_{t-1} - T_{t-1}) + (1 - γ) S_s
//! Forecast: F_m = L + m T + S_{(m-1) mod p}
//! ```
//!
//! `s = t mod p`, where `t` counts steps from the start of the training
//! slice. Forecasts reuse the final seasonal array unchanged for every
//! step, so horizons longer than one cycle repeat the same pattern.

use crate::data::Series;
use crate::error::{ForecastError, Result};
use crate::models::{
    check_unit_interval, describe_selected, split_series, DataType, ErrorMetrics, FitOptions,
    Model,
};
use serde::Serialize;
use smoothing_math::initial::InitialState;
use smoothing_math::{CancellationToken, Description, MathError};
use std::fmt;

/// Smallest held-out window a Holt-Winters fit accepts
pub const MIN_TEST_OBSERVATIONS: usize = 3;

/// Holt-Winters model bound to one input series
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Full input series
    data: Series,
    /// State of the last successful fit
    fitted: Option<HoltWintersFit>,
}

/// State persisted by a successful Holt-Winters fit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoltWintersFit {
    period: usize,
    alpha: f64,
    beta: f64,
    gamma: f64,
    level: f64,
    trend: f64,
    seasonal_components: Vec<f64>,
    initial_level: f64,
    initial_trend: f64,
    initial_seasonal_components: Vec<f64>,
    train: Series,
    test: Series,
    forecast: Series,
    metrics: ErrorMetrics,
}

impl HoltWinters {
    /// Create an unfitted model over `data`
    pub fn new(data: Series) -> Self {
        Self {
            name: "Holt-Winters (additive)".to_string(),
            data,
            fitted: None,
        }
    }

    /// The full input series
    pub fn data(&self) -> &Series {
        &self.data
    }

    /// Fitted state, if a fit has succeeded
    pub fn fitted(&self) -> Option<&HoltWintersFit> {
        self.fitted.as_ref()
    }

    fn state(&self) -> Result<&HoltWintersFit> {
        self.fitted.as_ref().ok_or(ForecastError::NotFitted)
    }

    fn validate(&self, opts: &FitOptions) -> Result<(usize, usize)> {
        let (start, end) = split_series(&self.data, &opts.train_range, MIN_TEST_OBSERVATIONS)?;

        check_unit_interval("alpha", opts.alpha)?;
        check_unit_interval("beta", opts.beta)?;
        check_unit_interval("gamma", opts.gamma)?;

        if opts.period == 0 {
            return Err(ForecastError::InvalidParameter(
                "period must be at least 1".to_string(),
            ));
        }

        let train_len = end - start + 1;
        let two_cycles = opts.period.checked_mul(2).ok_or_else(|| {
            ForecastError::ValidationError(format!(
                "period {} is too large for a series of {} values",
                opts.period,
                self.data.len()
            ))
        })?;
        if train_len < two_cycles {
            return Err(ForecastError::ValidationError(format!(
                "Training range holds {} values but two full cycles of period {} need {}",
                train_len, opts.period, two_cycles
            )));
        }

        Ok((start, end))
    }

    fn run(&self, ctx: &CancellationToken, opts: &FitOptions) -> Result<HoltWintersFit> {
        let (start, end) = self.validate(opts)?;
        let (alpha, beta, gamma, period) = (opts.alpha, opts.beta, opts.gamma, opts.period);

        log::debug!(
            "fitting {} on '{}': alpha={} beta={} gamma={} period={} train={}..={}",
            self.name,
            self.data.name(),
            alpha,
            beta,
            gamma,
            period,
            start,
            end
        );

        let train = self.data.slice(start..=end)?.renamed("Train Data");
        let test = self.data.slice(end + 1..)?.renamed("Test Data");

        let initial = InitialState::estimate(train.values(), period);
        let mut seasonals = initial.seasonals.clone();
        let mut level = initial.level;
        let mut trend = initial.trend;

        for (t, &xt) in train.values().iter().enumerate() {
            ctx.check()?;

            // Level is seeded with the first observation
            if t == 0 {
                continue;
            }

            let slot = t % period;
            let (prev_level, prev_trend) = (level, trend);

            level = alpha * (xt - seasonals[slot]) + (1.0 - alpha) * (level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
            seasonals[slot] =
                gamma * (xt - prev_level - prev_trend) + (1.0 - gamma) * seasonals[slot];
        }

        let forecast = Series::new(
            "Forecast Data",
            rollout(ctx, level, trend, &seasonals, test.len())?,
        );
        let metrics = ErrorMetrics::evaluate(ctx, &test, &forecast, opts.error_metric)?;

        Ok(HoltWintersFit {
            period,
            alpha,
            beta,
            gamma,
            level,
            trend,
            seasonal_components: seasonals,
            initial_level: initial.level,
            initial_trend: initial.trend,
            initial_seasonal_components: initial.seasonals,
            train,
            test,
            forecast,
            metrics,
        })
    }
}

/// `level + m * trend + seasonals[(m - 1) mod period]` for `m` in `1..=horizon`
fn rollout(
    ctx: &CancellationToken,
    level: f64,
    trend: f64,
    seasonals: &[f64],
    horizon: usize,
) -> std::result::Result<Vec<f64>, MathError> {
    let period = seasonals.len();
    let mut values = Vec::with_capacity(horizon);

    for m in 1..=horizon {
        ctx.check()?;
        values.push(level + m as f64 * trend + seasonals[(m - 1) % period]);
    }

    Ok(values)
}

impl Model for HoltWinters {
    fn name(&self) -> &str {
        &self.name
    }

    fn fit(&mut self, ctx: &CancellationToken, opts: &FitOptions) -> Result<&mut Self> {
        ctx.check()?;

        // Built in scratch space; the model only changes once everything succeeded
        let fit = match self.run(ctx, opts) {
            Ok(fit) => fit,
            Err(ForecastError::Cancelled) => {
                log::warn!("{} fit on '{}' cancelled", self.name, self.data.name());
                return Err(ForecastError::Cancelled);
            }
            Err(err) => return Err(err),
        };

        log::info!(
            "{} fitted on '{}': mae={:.4} sse={:.4} rmse={:.4} mape={:.4}",
            self.name,
            self.data.name(),
            fit.metrics.mae,
            fit.metrics.sse,
            fit.metrics.rmse,
            fit.metrics.mape
        );

        self.fitted = Some(fit);
        Ok(self)
    }

    fn predict(&self, ctx: &CancellationToken, horizon: usize) -> Result<Series> {
        if horizon == 0 {
            return Err(ForecastError::ValidationError(
                "value of horizon must be greater than 0".to_string(),
            ));
        }

        let fit = self.state()?;
        let values = rollout(ctx, fit.level, fit.trend, &fit.seasonal_components, horizon)?;

        Ok(Series::new("Prediction", values))
    }

    fn summary(&self) -> Result<String> {
        Ok(self.state()?.to_string())
    }

    fn describe(&self, ctx: &CancellationToken, which: DataType) -> Result<Description> {
        let slices = self.fitted.as_ref().map(|fit| (&fit.train, &fit.test));
        describe_selected(ctx, which, &self.data, slices)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn metrics(&self) -> Result<&ErrorMetrics> {
        Ok(&self.state()?.metrics)
    }
}

impl HoltWintersFit {
    /// Seasonal cycle length
    pub fn period(&self) -> usize {
        self.period
    }

    /// Level smoothing constant
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Trend smoothing constant
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Seasonal smoothing constant
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Smoothed level after the last training step
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Smoothed trend after the last training step
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Final seasonal offsets, one per slot
    pub fn seasonal_components(&self) -> &[f64] {
        &self.seasonal_components
    }

    /// Level seeded from the first training observation
    pub fn initial_level(&self) -> f64 {
        self.initial_level
    }

    /// Trend estimated before the recursion started
    pub fn initial_trend(&self) -> f64 {
        self.initial_trend
    }

    /// Seasonal offsets estimated before the recursion started
    pub fn initial_seasonal_components(&self) -> &[f64] {
        &self.initial_seasonal_components
    }

    /// Training slice
    pub fn train(&self) -> &Series {
        &self.train
    }

    /// Held-out slice
    pub fn test(&self) -> &Series {
        &self.test
    }

    /// Forecast over the held-out slice
    pub fn forecast(&self) -> &Series {
        &self.forecast
    }

    /// Held-out accuracy
    pub fn metrics(&self) -> &ErrorMetrics {
        &self.metrics
    }

    /// Serialize the fitted state to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for HoltWintersFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Holt-Winters (additive) Summary:")?;
        writeln!(f, "  Alpha:  {:.4}", self.alpha)?;
        writeln!(f, "  Beta:   {:.4}", self.beta)?;
        writeln!(f, "  Gamma:  {:.4}", self.gamma)?;
        writeln!(f, "  Period: {}", self.period)?;
        writeln!(f)?;
        writeln!(f, "Components:")?;
        writeln!(f, "  Initial Smoothing Level: {:.4}", self.initial_level)?;
        writeln!(f, "  Initial Trend Level:     {:.4}", self.initial_trend)?;
        writeln!(f, "  Smoothing Level:         {:.4}", self.level)?;
        writeln!(f, "  Trend Level:             {:.4}", self.trend)?;
        writeln!(f)?;
        writeln!(f, "Seasonal Components:")?;
        writeln!(f, "  {:>5} | {:>12} | {:>12}", "slot", "initial", "final")?;
        for (slot, (initial, last)) in self
            .initial_seasonal_components
            .iter()
            .zip(&self.seasonal_components)
            .enumerate()
        {
            writeln!(f, "  {:>5} | {:>12.4} | {:>12.4}", slot, initial, last)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.metrics)?;
        writeln!(f)?;
        writeln!(f, "{}", self.test)?;
        write!(f, "{}", self.forecast)
    }
}
