//! Fit a monthly seasonal series, print the report and a two-year projection.
//!
//! Run with `cargo run --example seasonal_forecast [path/to/file.csv column]`.

use smoothcast::prelude::*;
use std::env;

fn main() -> Result<(), ForecastError> {
    let args: Vec<String> = env::args().collect();
    let data = match args.as_slice() {
        [_, path, column] => DataLoader::from_csv(path, column)?,
        _ => Series::new(
            "demo",
            (0..84)
                .map(|i| {
                    let month = (i % 12) as f64;
                    30.0 + 0.1 * i as f64 + 12.0 * (month / 12.0 * std::f64::consts::TAU).sin()
                })
                .collect(),
        ),
    };

    let ctx = CancellationToken::new();
    let end = data.len().saturating_sub(13);
    let opts = FitOptions::new(0.45, 0.03, 0.73, 12)
        .with_train_range(TrainRange::until(end))
        .with_error_metric(ErrorType::Rmse);

    let mut model = HoltWinters::new(data);
    let prediction = model.fit(&ctx, &opts)?.predict(&ctx, 24)?;

    println!("{}", model.summary()?);
    println!("{}", model.describe(&ctx, DataType::Main)?);
    println!("{}", prediction);

    Ok(())
}
