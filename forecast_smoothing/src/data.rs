//! Series container and loaders for forecasting input

use crate::error::{ForecastError, Result};
use polars::prelude::{CsvReader, DataFrame, DataType, SerReader};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::ops::{Bound, RangeBounds};
use std::path::Path;

/// Named, ordered sequence of equally spaced observations.
///
/// Slices are owned copies, so mutating a derived series never touches the
/// series it was cut from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    /// Label used in reports
    name: String,
    /// Observations, index 0 first
    values: Vec<f64>,
}

impl Series {
    /// Create a new series from a name and computed values
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Get the series name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the observations
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the observation at `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Copy out the observations covered by `range`.
    ///
    /// Accepts half-open (`2..5`), closed (`2..=4`) and open-ended (`3..`)
    /// ranges. The slice keeps this series' name.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Self> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.values.len(),
        };

        if start > end || end > self.values.len() {
            return Err(ForecastError::DataError(format!(
                "Slice {}..{} is out of bounds for series '{}' of length {}",
                start,
                end,
                self.name,
                self.values.len()
            )));
        }

        Ok(Self {
            name: self.name.clone(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Return the same observations under a different name
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Serialize the series to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the series as a single CSV column headed by its name
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([self.name.as_str()])?;
        for value in &self.values {
            wtr.write_record([value.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.name.len().max(12);
        writeln!(f, "+-------+-{}-+", "-".repeat(width))?;
        writeln!(f, "|       | {:>width$} |", self.name, width = width)?;
        writeln!(f, "+-------+-{}-+", "-".repeat(width))?;
        for (i, value) in self.values.iter().enumerate() {
            writeln!(f, "| {:>5} | {:>width$.4} |", i, value, width = width)?;
        }
        write!(f, "+-------+-{}-+", "-".repeat(width))
    }
}

/// Data loader for series stored in tabular files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load one numeric column of a CSV file (with header row) as a series
    pub fn from_csv<P: AsRef<Path>>(path: P, column: &str) -> Result<Series> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(&df, column)
    }

    /// Extract one numeric column of an existing DataFrame as a series
    pub fn from_dataframe(df: &DataFrame, column: &str) -> Result<Series> {
        let col = df.column(column).map_err(|e| {
            ForecastError::DataError(format!("Column '{}' not found: {}", column, e))
        })?;

        if !col.dtype().is_numeric() {
            return Err(ForecastError::DataError(format!(
                "Column '{}' cannot be converted to f64",
                column
            )));
        }

        let casted = col.cast(&DataType::Float64)?;
        let values = casted
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.ok_or_else(|| {
                    ForecastError::DataError(format!(
                        "Missing value in column '{}' at row {}",
                        column, row
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok(Series::new(column, values))
    }
}
