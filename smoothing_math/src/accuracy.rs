//! Forecast accuracy metrics
//!
//! Every function compares an `actual` sequence against an equally long
//! `forecast` sequence, polls the cancellation token between elements and
//! fails with [`MathError::LengthMismatch`] when the lengths differ.
//!
//! Supported metrics:
//! - Mean Absolute Error (MAE)
//! - Sum of Squared Errors (SSE)
//! - Root Mean Squared Error (RMSE)
//! - Mean Absolute Percentage Error (MAPE), reported as a fraction

use crate::cancel::CancellationToken;
use crate::{MathError, Result};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects one of the accuracy metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// Mean Absolute Error
    #[default]
    Mae,
    /// Sum of Squared Errors
    Sse,
    /// Root Mean Squared Error
    Rmse,
    /// Mean Absolute Percentage Error
    Mape,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorType::Mae => "MAE",
            ErrorType::Sse => "SSE",
            ErrorType::Rmse => "RMSE",
            ErrorType::Mape => "MAPE",
        };
        f.write_str(label)
    }
}

/// Options for the accuracy metrics.
///
/// No options are recognised yet. The struct is non-exhaustive so that
/// settings such as a weighting scheme can be added without breaking
/// callers; construct it with `ErrorOptions::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ErrorOptions {}

/// Mean of `|actual[i] - forecast[i]|`
pub fn mean_absolute_error<T: Float>(
    ctx: &CancellationToken,
    actual: &[T],
    forecast: &[T],
    _opts: &ErrorOptions,
) -> Result<T> {
    let n = observation_count::<T>(actual, forecast)?;

    let mut sum = T::zero();
    for (&a, &f) in actual.iter().zip(forecast) {
        ctx.check()?;
        sum = sum + (a - f).abs();
    }

    Ok(sum / n)
}

/// Sum of `(actual[i] - forecast[i])^2`
pub fn sum_of_squared_errors<T: Float>(
    ctx: &CancellationToken,
    actual: &[T],
    forecast: &[T],
    _opts: &ErrorOptions,
) -> Result<T> {
    observation_count::<T>(actual, forecast)?;

    let mut sum = T::zero();
    for (&a, &f) in actual.iter().zip(forecast) {
        ctx.check()?;
        let err = a - f;
        sum = sum + err * err;
    }

    Ok(sum)
}

/// Square root of the mean squared error
pub fn root_mean_squared_error<T: Float>(
    ctx: &CancellationToken,
    actual: &[T],
    forecast: &[T],
    opts: &ErrorOptions,
) -> Result<T> {
    let n = observation_count::<T>(actual, forecast)?;
    let sse = sum_of_squared_errors(ctx, actual, forecast, opts)?;
    Ok((sse / n).sqrt())
}

/// Mean of `|actual[i] - forecast[i]| / |actual[i]|` over every observation.
///
/// A zero actual value contributes `+inf` (or NaN when the forecast is also
/// zero), so the result is non-finite rather than an error. The metric is a
/// score and never a reason to reject the data.
pub fn mean_absolute_percentage_error<T: Float>(
    ctx: &CancellationToken,
    actual: &[T],
    forecast: &[T],
    _opts: &ErrorOptions,
) -> Result<T> {
    let n = observation_count::<T>(actual, forecast)?;

    let mut sum = T::zero();
    for (&a, &f) in actual.iter().zip(forecast) {
        ctx.check()?;
        sum = sum + (a - f).abs() / a.abs();
    }

    Ok(sum / n)
}

/// Validate the pair of sequences and return their length as `T`
fn observation_count<T: Float>(actual: &[T], forecast: &[T]) -> Result<T> {
    if actual.len() != forecast.len() {
        return Err(MathError::LengthMismatch {
            actual: actual.len(),
            forecast: forecast.len(),
        });
    }
    if actual.is_empty() {
        return Err(MathError::InsufficientData(
            "At least one observation is required to compute an error metric".to_string(),
        ));
    }

    T::from(actual.len()).ok_or_else(|| {
        MathError::CalculationError("Observation count is not representable".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    const ACTUAL: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];
    const PREDICTED: [f64; 5] = [12.0, 18.0, 33.0, 37.0, 52.0];

    fn opts() -> ErrorOptions {
        ErrorOptions::default()
    }

    #[test]
    fn test_regression_metrics() {
        let ctx = CancellationToken::new();

        let mae = mean_absolute_error(&ctx, &ACTUAL, &PREDICTED, &opts()).unwrap();
        assert_approx_eq!(mae, 2.4);

        let sse = sum_of_squared_errors(&ctx, &ACTUAL, &PREDICTED, &opts()).unwrap();
        assert_approx_eq!(sse, 30.0);

        let rmse = root_mean_squared_error(&ctx, &ACTUAL, &PREDICTED, &opts()).unwrap();
        assert_approx_eq!(rmse, 6.0_f64.sqrt());

        // 0.2 + 0.1 + 0.1 + 0.075 + 0.04 = 0.515
        let mape = mean_absolute_percentage_error(&ctx, &ACTUAL, &PREDICTED, &opts()).unwrap();
        assert_approx_eq!(mape, 0.103);
    }

    #[test]
    fn test_metrics_on_f32() {
        let ctx = CancellationToken::new();
        let actual = [1.0_f32, 2.0, 3.0];
        let forecast = [1.5_f32, 2.0, 2.0];

        let mae = mean_absolute_error(&ctx, &actual, &forecast, &opts()).unwrap();
        assert!((mae - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sse_equals_rmse_squared_times_n() {
        let ctx = CancellationToken::new();
        let actual = [3.1, -4.7, 12.25, 0.5, 8.0, 9.75, -1.0];
        let forecast = [2.9, -3.2, 10.0, 1.5, 8.5, 11.0, 0.25];

        let sse = sum_of_squared_errors(&ctx, &actual, &forecast, &opts()).unwrap();
        let rmse = root_mean_squared_error(&ctx, &actual, &forecast, &opts()).unwrap();

        assert_approx_eq!(sse, rmse * rmse * actual.len() as f64, 1e-9);
    }

    #[test]
    fn test_mape_with_zero_actuals_is_non_finite() {
        let ctx = CancellationToken::new();

        let mape = mean_absolute_percentage_error(&ctx, &[0.0, 10.0], &[5.0, 11.0], &opts())
            .unwrap();
        assert!(mape.is_infinite() && mape > 0.0);

        let mape = mean_absolute_percentage_error(&ctx, &[0.0, 0.0], &[0.0, 1.0], &opts())
            .unwrap();
        assert!(mape.is_nan());
    }

    #[rstest]
    #[case(ErrorType::Mae)]
    #[case(ErrorType::Sse)]
    #[case(ErrorType::Rmse)]
    #[case(ErrorType::Mape)]
    fn test_length_mismatch(#[case] kind: ErrorType) {
        let ctx = CancellationToken::new();
        let actual = [1.0, 2.0, 3.0];
        let forecast = [1.0, 2.0];

        let result = match kind {
            ErrorType::Mae => mean_absolute_error(&ctx, &actual, &forecast, &opts()),
            ErrorType::Sse => sum_of_squared_errors(&ctx, &actual, &forecast, &opts()),
            ErrorType::Rmse => root_mean_squared_error(&ctx, &actual, &forecast, &opts()),
            ErrorType::Mape => mean_absolute_percentage_error(&ctx, &actual, &forecast, &opts()),
        };

        assert_eq!(
            result,
            Err(MathError::LengthMismatch {
                actual: 3,
                forecast: 2
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let ctx = CancellationToken::new();
        let empty: [f64; 0] = [];
        let result = mean_absolute_error(&ctx, &empty, &empty, &opts());
        assert!(matches!(result, Err(MathError::InsufficientData(_))));
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let ctx = CancellationToken::new();
        ctx.cancel();

        let result = sum_of_squared_errors(&ctx, &ACTUAL, &PREDICTED, &opts());
        assert_eq!(result, Err(MathError::Cancelled));
    }

    #[test]
    fn test_error_type_labels() {
        assert_eq!(ErrorType::default(), ErrorType::Mae);
        assert_eq!(ErrorType::Rmse.to_string(), "RMSE");
    }
}
