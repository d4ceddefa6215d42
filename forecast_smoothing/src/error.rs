//! Error types for the forecast_smoothing crate

use polars::prelude::PolarsError;
use smoothing_math::MathError;
use thiserror::Error;

/// Custom error types for the forecast_smoothing crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data loading or series access
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The model was asked for output before a successful fit
    #[error("Model has not been fitted")]
    NotFitted,

    /// The caller's cancellation token fired
    #[error("Operation cancelled")]
    Cancelled,

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error writing CSV output
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error rendering JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Cancelled => ForecastError::Cancelled,
            MathError::LengthMismatch { .. } => ForecastError::ValidationError(err.to_string()),
            other => ForecastError::MathError(other.to_string()),
        }
    }
}

impl ForecastError {
    /// Whether this error came from a fired cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ForecastError::Cancelled)
    }
}
