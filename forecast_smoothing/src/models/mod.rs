//! Forecasting models and the contract they share

use crate::data::Series;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use smoothing_math::accuracy::{
    mean_absolute_error, mean_absolute_percentage_error, root_mean_squared_error,
    sum_of_squared_errors,
};
use smoothing_math::{CancellationToken, Description, ErrorOptions, ErrorType};
use std::fmt;

pub mod exponential_smoothing;
pub mod holt_winters;

pub use exponential_smoothing::SimpleExponentialSmoothing;
pub use holt_winters::HoltWinters;

/// Selects which of a model's series an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// The training slice
    Train,
    /// The held-out slice following the training slice
    Test,
    /// The full series the model was built on
    Main,
}

impl DataType {
    /// Map the numeric selector codes 0 (train), 1 (test) and 2 (main).
    ///
    /// # Panics
    ///
    /// Panics on any other code. An unknown selector is a programming error
    /// with no sensible recovery.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => DataType::Train,
            1 => DataType::Test,
            2 => DataType::Main,
            other => panic!("unrecognised data type selection specified: {}", other),
        }
    }
}

/// Inclusive index range selecting the training portion of a series.
///
/// Unset bounds default to the first and last index. Everything after `end`
/// becomes the held-out window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrainRange {
    /// First training index
    pub start: Option<usize>,
    /// Last training index (inclusive)
    pub end: Option<usize>,
}

impl TrainRange {
    /// Range over `start..=end`
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Range from the first index through `end`
    pub fn until(end: usize) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Resolve the bounds against a series of length `len`
    pub fn limits(&self, len: usize) -> Result<(usize, usize)> {
        if len == 0 {
            return Err(ForecastError::DataError("Series is empty".to_string()));
        }

        let start = self.start.unwrap_or(0);
        let end = self.end.unwrap_or(len - 1);

        if start >= len || end >= len {
            return Err(ForecastError::ValidationError(format!(
                "Range {}..={} is out of bounds for a series of length {}",
                start, end, len
            )));
        }
        if start > end {
            return Err(ForecastError::ValidationError(format!(
                "Range start ({}) is after range end ({})",
                start, end
            )));
        }

        Ok((start, end))
    }
}

fn default_period() -> usize {
    1
}

/// Parameters for fitting any model in this crate.
///
/// Variants read only the fields they need; simple exponential smoothing
/// ignores `beta`, `gamma` and `period`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Level smoothing constant in [0, 1]
    pub alpha: f64,
    /// Trend smoothing constant in [0, 1]
    #[serde(default)]
    pub beta: f64,
    /// Seasonal smoothing constant in [0, 1]
    #[serde(default)]
    pub gamma: f64,
    /// Number of slots in one seasonal cycle
    #[serde(default = "default_period")]
    pub period: usize,
    /// Metric reported by [`ErrorMetrics::score`]
    #[serde(default)]
    pub error_metric: ErrorType,
    /// Training portion of the series
    #[serde(default)]
    pub train_range: TrainRange,
}

impl FitOptions {
    /// Options for a Holt-Winters fit over the whole series
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            period,
            error_metric: ErrorType::default(),
            train_range: TrainRange::default(),
        }
    }

    /// Options carrying only a level smoothing constant
    pub fn simple(alpha: f64) -> Self {
        Self::new(alpha, 0.0, 0.0, 1)
    }

    /// Restrict training to `range`
    pub fn with_train_range(mut self, range: TrainRange) -> Self {
        self.train_range = range;
        self
    }

    /// Choose the headline accuracy metric
    pub fn with_error_metric(mut self, kind: ErrorType) -> Self {
        self.error_metric = kind;
        self
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Accuracy of the held-out forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Sum of Squared Errors
    pub sse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, as a fraction
    pub mape: f64,
    /// Metric returned by [`score`](Self::score)
    pub selected: ErrorType,
}

impl ErrorMetrics {
    /// Score the `forecast` against `actual`
    pub fn evaluate(
        ctx: &CancellationToken,
        actual: &Series,
        forecast: &Series,
        selected: ErrorType,
    ) -> Result<Self> {
        let opts = ErrorOptions::default();
        let (a, f) = (actual.values(), forecast.values());

        Ok(Self {
            mae: mean_absolute_error(ctx, a, f, &opts)?,
            sse: sum_of_squared_errors(ctx, a, f, &opts)?,
            rmse: root_mean_squared_error(ctx, a, f, &opts)?,
            mape: mean_absolute_percentage_error(ctx, a, f, &opts)?,
            selected,
        })
    }

    /// Value of one metric
    pub fn get(&self, kind: ErrorType) -> f64 {
        match kind {
            ErrorType::Mae => self.mae,
            ErrorType::Sse => self.sse,
            ErrorType::Rmse => self.rmse,
            ErrorType::Mape => self.mape,
        }
    }

    /// Value of the metric chosen at fit time
    pub fn score(&self) -> f64 {
        self.get(self.selected)
    }
}

impl fmt::Display for ErrorMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  SSE:   {:.4}", self.sse)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape * 100.0)?;
        write!(f, "  Score ({}): {:.4}", self.selected, self.score())
    }
}

/// Common interface for forecasting models.
///
/// A model is bound to one input series at construction. `fit` is the only
/// mutator; the remaining methods are read-only views of the fitted state.
pub trait Model: fmt::Debug {
    /// Name of the model
    fn name(&self) -> &str;

    /// Split the series, run the smoothing recursion and score the
    /// held-out forecast. A failed fit leaves the previous state untouched.
    fn fit(&mut self, ctx: &CancellationToken, opts: &FitOptions) -> Result<&mut Self>;

    /// Project `horizon` steps past the end of the training slice
    fn predict(&self, ctx: &CancellationToken, horizon: usize) -> Result<Series>;

    /// Human-readable report of the fitted state
    fn summary(&self) -> Result<String>;

    /// Descriptive statistics of the selected series
    fn describe(&self, ctx: &CancellationToken, which: DataType) -> Result<Description>;

    /// Whether a fit has succeeded
    fn is_fitted(&self) -> bool;

    /// Held-out accuracy of the last successful fit
    fn metrics(&self) -> Result<&ErrorMetrics>;
}

/// Kinds of model available in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Additive Holt-Winters triple exponential smoothing
    HoltWinters,
    /// Single exponential smoothing of the level
    SimpleExponentialSmoothing,
}

/// Any model in this crate, dispatched by variant
#[derive(Debug, Clone)]
pub enum AnyModel {
    HoltWinters(HoltWinters),
    SimpleExponentialSmoothing(SimpleExponentialSmoothing),
}

impl AnyModel {
    /// Build an unfitted model of `kind` bound to `data`
    pub fn new(kind: ModelKind, data: Series) -> Self {
        match kind {
            ModelKind::HoltWinters => AnyModel::HoltWinters(HoltWinters::new(data)),
            ModelKind::SimpleExponentialSmoothing => {
                AnyModel::SimpleExponentialSmoothing(SimpleExponentialSmoothing::new(data))
            }
        }
    }

    /// Which variant this is
    pub fn kind(&self) -> ModelKind {
        match self {
            AnyModel::HoltWinters(_) => ModelKind::HoltWinters,
            AnyModel::SimpleExponentialSmoothing(_) => ModelKind::SimpleExponentialSmoothing,
        }
    }
}

impl Model for AnyModel {
    fn name(&self) -> &str {
        match self {
            AnyModel::HoltWinters(m) => m.name(),
            AnyModel::SimpleExponentialSmoothing(m) => m.name(),
        }
    }

    fn fit(&mut self, ctx: &CancellationToken, opts: &FitOptions) -> Result<&mut Self> {
        match self {
            AnyModel::HoltWinters(m) => {
                m.fit(ctx, opts)?;
            }
            AnyModel::SimpleExponentialSmoothing(m) => {
                m.fit(ctx, opts)?;
            }
        }
        Ok(self)
    }

    fn predict(&self, ctx: &CancellationToken, horizon: usize) -> Result<Series> {
        match self {
            AnyModel::HoltWinters(m) => m.predict(ctx, horizon),
            AnyModel::SimpleExponentialSmoothing(m) => m.predict(ctx, horizon),
        }
    }

    fn summary(&self) -> Result<String> {
        match self {
            AnyModel::HoltWinters(m) => m.summary(),
            AnyModel::SimpleExponentialSmoothing(m) => m.summary(),
        }
    }

    fn describe(&self, ctx: &CancellationToken, which: DataType) -> Result<Description> {
        match self {
            AnyModel::HoltWinters(m) => m.describe(ctx, which),
            AnyModel::SimpleExponentialSmoothing(m) => m.describe(ctx, which),
        }
    }

    fn is_fitted(&self) -> bool {
        match self {
            AnyModel::HoltWinters(m) => m.is_fitted(),
            AnyModel::SimpleExponentialSmoothing(m) => m.is_fitted(),
        }
    }

    fn metrics(&self) -> Result<&ErrorMetrics> {
        match self {
            AnyModel::HoltWinters(m) => m.metrics(),
            AnyModel::SimpleExponentialSmoothing(m) => m.metrics(),
        }
    }
}

/// Reject a smoothing constant outside [0, 1]
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ForecastError::InvalidParameter(format!(
            "{} must be between [0,1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Train/test split shared by every variant: `start..=end` trains, the rest
/// is held out and must contain at least `min_test` observations
pub(crate) fn split_series(
    data: &Series,
    range: &TrainRange,
    min_test: usize,
) -> Result<(usize, usize)> {
    let (start, end) = range.limits(data.len())?;

    if end - start < 1 {
        return Err(ForecastError::ValidationError(
            "no values in series range".to_string(),
        ));
    }

    let held_out = data.len() - (end + 1);
    if held_out < min_test {
        return Err(ForecastError::ValidationError(format!(
            "There should be a minimum of {} data left as testing data, found {}",
            min_test, held_out
        )));
    }

    Ok((start, end))
}

/// Statistics of the main series, or of a slice kept by a fitted model
pub(crate) fn describe_selected(
    ctx: &CancellationToken,
    which: DataType,
    main: &Series,
    fitted: Option<(&Series, &Series)>,
) -> Result<Description> {
    let series = match (which, fitted) {
        (DataType::Main, _) => main,
        (DataType::Train, Some((train, _))) => train,
        (DataType::Test, Some((_, test))) => test,
        (_, None) => return Err(ForecastError::NotFitted),
    };

    Ok(smoothing_math::describe::describe(ctx, series.values())?)
}
