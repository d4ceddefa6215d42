//! # Forecast Smoothing
//!
//! Exponential smoothing models for univariate time series.
//!
//! ## Features
//!
//! - Additive Holt-Winters (level, trend and seasonal components)
//! - Simple exponential smoothing of the level
//! - Train/test splitting with held-out accuracy scoring (MAE, SSE, RMSE, MAPE)
//! - Cooperative cancellation of every long-running loop
//! - Series loading from CSV files
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_smoothing::models::{FitOptions, HoltWinters, Model, TrainRange};
//! use forecast_smoothing::{CancellationToken, Series};
//!
//! let values = (0..32).map(|i| [3.0, 7.0, 5.0, 1.0][i % 4] + i as f64 * 0.1).collect();
//! let mut model = HoltWinters::new(Series::new("demand", values));
//!
//! let ctx = CancellationToken::new();
//! let opts = FitOptions::new(0.4, 0.1, 0.3, 4).with_train_range(TrainRange::until(23));
//!
//! let prediction = model.fit(&ctx, &opts)?.predict(&ctx, 8)?;
//! assert_eq!(prediction.len(), 8);
//! # Ok::<(), forecast_smoothing::ForecastError>(())
//! ```

pub mod data;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use crate::data::{DataLoader, Series};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{
    AnyModel, DataType, ErrorMetrics, FitOptions, Model, ModelKind, TrainRange,
};
pub use smoothing_math::{CancellationToken, Description, ErrorOptions, ErrorType};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
