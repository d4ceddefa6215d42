//! # Smoothcast
//!
//! `smoothcast` bundles the exponential smoothing workspace behind one
//! import: the numerical helpers from [`smoothing_math`] and the models from
//! [`forecast_smoothing`].
//!
//! ## Example
//!
//! ```
//! use smoothcast::prelude::*;
//!
//! let data = Series::new("simple data", (1..=10).map(f64::from).collect());
//! let ctx = CancellationToken::new();
//!
//! let mut model = AnyModel::new(ModelKind::SimpleExponentialSmoothing, data);
//! let opts = FitOptions::simple(0.1).with_train_range(TrainRange::until(5));
//! let prediction = model.fit(&ctx, &opts)?.predict(&ctx, 10)?;
//!
//! assert_eq!(prediction.len(), 10);
//! # Ok::<(), ForecastError>(())
//! ```

pub use forecast_smoothing;
pub use smoothing_math;

/// Fit a model of `kind` over `data` and project `horizon` steps ahead.
///
/// Convenience wrapper for one-shot use; keep the [`AnyModel`](prelude::AnyModel)
/// around instead when the fitted state or its summary is needed.
pub fn fit_and_predict(
    ctx: &prelude::CancellationToken,
    kind: prelude::ModelKind,
    data: prelude::Series,
    opts: &prelude::FitOptions,
    horizon: usize,
) -> forecast_smoothing::Result<prelude::Series> {
    use prelude::Model;

    let mut model = prelude::AnyModel::new(kind, data);
    let prediction = model.fit(ctx, opts)?.predict(ctx, horizon)?;
    log::debug!("{} projected {} steps", model.name(), prediction.len());
    Ok(prediction)
}

/// Types needed for everyday fitting and forecasting
pub mod prelude {
    pub use forecast_smoothing::models::{
        AnyModel, DataType, ErrorMetrics, FitOptions, HoltWinters, Model, ModelKind,
        SimpleExponentialSmoothing, TrainRange,
    };
    pub use forecast_smoothing::{DataLoader, ForecastError, Series};
    pub use smoothing_math::{CancellationToken, Description, ErrorOptions, ErrorType};
}
