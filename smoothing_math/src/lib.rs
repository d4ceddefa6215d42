//! # Smoothing Math
//!
//! Numerical building blocks for exponential smoothing models.
//! This crate provides the accuracy metrics used to score forecasts,
//! the initial-state estimator for additive Holt-Winters, descriptive
//! statistics and a cooperative cancellation token shared by every
//! long-running loop.

use thiserror::Error;

pub mod accuracy;
pub mod cancel;
pub mod describe;
pub mod initial;

pub use accuracy::{ErrorOptions, ErrorType};
pub use cancel::CancellationToken;
pub use describe::Description;

/// Errors that can occur in smoothing calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Length mismatch: actual has {actual} values, forecast has {forecast}")]
    LengthMismatch { actual: usize, forecast: usize },

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type for smoothing math operations
pub type Result<T> = std::result::Result<T, MathError>;
