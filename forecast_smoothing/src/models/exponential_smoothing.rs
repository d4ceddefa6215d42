//! Simple exponential smoothing models for time series forecasting
//!
//! The level follows `L_t = α x_t + (1 - α) L_{t-1}`, seeded with the first
//! training observation. Forecasts for every future step are flat at the
//! final level, the steady-state forecast of the model; no bootstrapped or
//! resampled rollout is performed.

use crate::data::Series;
use crate::error::{ForecastError, Result};
use crate::models::{
    check_unit_interval, describe_selected, split_series, DataType, ErrorMetrics, FitOptions,
    Model,
};
use serde::Serialize;
use smoothing_math::{CancellationToken, Description};
use std::fmt;

/// Smallest held-out window a simple exponential smoothing fit accepts
pub const MIN_TEST_OBSERVATIONS: usize = 2;

/// Simple exponential smoothing model bound to one input series
#[derive(Debug, Clone)]
pub struct SimpleExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Full input series
    data: Series,
    /// State of the last successful fit
    fitted: Option<SesFit>,
}

/// Trained simple exponential smoothing state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SesFit {
    /// Smoothing parameter
    alpha: f64,
    /// First training observation
    initial_level: f64,
    /// Level after the last training step
    level: f64,
    train: Series,
    test: Series,
    forecast: Series,
    metrics: ErrorMetrics,
}

impl SimpleExponentialSmoothing {
    /// Create an unfitted model over `data`
    pub fn new(data: Series) -> Self {
        Self {
            name: "Simple Exponential Smoothing".to_string(),
            data,
            fitted: None,
        }
    }

    /// The full input series
    pub fn data(&self) -> &Series {
        &self.data
    }

    /// Fitted state, if a fit has succeeded
    pub fn fitted(&self) -> Option<&SesFit> {
        self.fitted.as_ref()
    }

    fn state(&self) -> Result<&SesFit> {
        self.fitted.as_ref().ok_or(ForecastError::NotFitted)
    }

    fn run(&self, ctx: &CancellationToken, opts: &FitOptions) -> Result<SesFit> {
        let (start, end) = split_series(&self.data, &opts.train_range, MIN_TEST_OBSERVATIONS)?;
        check_unit_interval("alpha", opts.alpha)?;
        let alpha = opts.alpha;

        log::debug!(
            "fitting {} on '{}': alpha={} train={}..={}",
            self.name,
            self.data.name(),
            alpha,
            start,
            end
        );

        let train = self.data.slice(start..=end)?.renamed("Train Data");
        let test = self.data.slice(end + 1..)?.renamed("Test Data");

        let initial_level = train.values()[0];
        let mut level = initial_level;
        for &value in &train.values()[1..] {
            ctx.check()?;
            level = alpha * value + (1.0 - alpha) * level;
        }

        // The forecast is constant at the last level
        let forecast = Series::new("Forecast Data", flat(ctx, level, test.len())?);
        let metrics = ErrorMetrics::evaluate(ctx, &test, &forecast, opts.error_metric)?;

        Ok(SesFit {
            alpha,
            initial_level,
            level,
            train,
            test,
            forecast,
            metrics,
        })
    }
}

fn flat(ctx: &CancellationToken, level: f64, horizon: usize) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        ctx.check()?;
        values.push(level);
    }
    Ok(values)
}

impl Model for SimpleExponentialSmoothing {
    fn name(&self) -> &str {
        &self.name
    }

    fn fit(&mut self, ctx: &CancellationToken, opts: &FitOptions) -> Result<&mut Self> {
        ctx.check()?;

        let fit = self.run(ctx, opts).map_err(|err| {
            if err.is_cancelled() {
                log::warn!("{} fit on '{}' cancelled", self.name, self.data.name());
            }
            err
        })?;

        log::info!(
            "{} fitted on '{}': level={:.4} mae={:.4} rmse={:.4}",
            self.name,
            self.data.name(),
            fit.level,
            fit.metrics.mae,
            fit.metrics.rmse
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
        Ok(Series::new("Prediction", flat(ctx, fit.level, horizon)?))
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

impl SesFit {
    /// Smoothing parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// First training observation
    pub fn initial_level(&self) -> f64 {
        self.initial_level
    }

    /// Level after the last training step
    pub fn level(&self) -> f64 {
        self.level
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

impl fmt::Display for SesFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simple Exponential Smoothing Summary:")?;
        writeln!(f, "  Alpha:                   {:.4}", self.alpha)?;
        writeln!(f, "  Initial Smoothing Level: {:.4}", self.initial_level)?;
        writeln!(f, "  Smoothing Level:         {:.4}", self.level)?;
        writeln!(f)?;
        writeln!(f, "{}", self.metrics)?;
        writeln!(f)?;
        writeln!(f, "{}", self.test)?;
        write!(f, "{}", self.forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrainRange;
    use assert_approx_eq::assert_approx_eq;

    fn ramp() -> Series {
        Series::new("ramp", (1..=10).map(f64::from).collect())
    }

    #[test]
    fn test_level_recursion() {
        let ctx = CancellationToken::new();
        let mut model = SimpleExponentialSmoothing::new(Series::new(
            "short",
            vec![10.0, 20.0, 30.0, 1.0, 1.0],
        ));
        let opts = FitOptions::simple(0.3).with_train_range(TrainRange::until(2));

        model.fit(&ctx, &opts).unwrap();
        let fit = model.fitted().unwrap();

        // 0.3*20 + 0.7*10 = 13, then 0.3*30 + 0.7*13 = 18.1
        assert_approx_eq!(fit.level(), 18.1);
        assert_eq!(fit.forecast().values(), &[fit.level(), fit.level()]);
    }

    #[test]
    fn test_alpha_one_tracks_last_value() {
        let ctx = CancellationToken::new();
        let mut model = SimpleExponentialSmoothing::new(ramp());
        let opts = FitOptions::simple(1.0).with_train_range(TrainRange::until(5));

        model.fit(&ctx, &opts).unwrap();
        let prediction = model.predict(&ctx, 3).unwrap();

        assert_eq!(prediction.values(), &[6.0, 6.0, 6.0]);
    }

    #[test]
    fn test_held_out_minimum() {
        let ctx = CancellationToken::new();
        let mut model = SimpleExponentialSmoothing::new(ramp());

        let ok = FitOptions::simple(0.5).with_train_range(TrainRange::until(7));
        assert!(model.fit(&ctx, &ok).is_ok());

        let short = FitOptions::simple(0.5).with_train_range(TrainRange::until(8));
        assert!(matches!(
            model.fit(&ctx, &short),
            Err(ForecastError::ValidationError(_))
        ));
    }

    #[test]
    fn test_predict_before_fit() {
        let ctx = CancellationToken::new();
        let model = SimpleExponentialSmoothing::new(ramp());
        assert!(matches!(
            model.predict(&ctx, 2),
            Err(ForecastError::NotFitted)
        ));
        assert!(matches!(model.summary(), Err(ForecastError::NotFitted)));
    }
}
