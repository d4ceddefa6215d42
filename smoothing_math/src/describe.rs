//! Descriptive statistics for a series of observations

use crate::cancel::CancellationToken;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, Statistics};
use std::fmt;

/// Summary statistics of a sequence of observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (NaN for a single observation)
    pub std_dev: f64,
    /// Smallest observation
    pub min: f64,
    /// First quartile
    pub q25: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q75: f64,
    /// Largest observation
    pub max: f64,
}

/// Compute count, mean, spread and quantiles of `values`
pub fn describe(ctx: &CancellationToken, values: &[f64]) -> Result<Description> {
    ctx.check()?;

    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot describe an empty series".to_string(),
        ));
    }

    let mean = values.iter().mean();
    let std_dev = values.iter().std_dev();
    let min = Statistics::min(values.iter());
    let max = Statistics::max(values.iter());

    let mut ordered = Data::new(values.to_vec());
    let q25 = ordered.quantile(0.25);
    let median = ordered.quantile(0.5);
    let q75 = ordered.quantile(0.75);

    Ok(Description {
        count: values.len(),
        mean,
        std_dev,
        min,
        q25,
        median,
        q75,
        max,
    })
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  count:  {}", self.count)?;
        writeln!(f, "  mean:   {:.4}", self.mean)?;
        writeln!(f, "  std:    {:.4}", self.std_dev)?;
        writeln!(f, "  min:    {:.4}", self.min)?;
        writeln!(f, "  25%:    {:.4}", self.q25)?;
        writeln!(f, "  50%:    {:.4}", self.median)?;
        writeln!(f, "  75%:    {:.4}", self.q75)?;
        writeln!(f, "  max:    {:.4}", self.max)?;
        Ok(())
    }
}
