use assert_approx_eq::assert_approx_eq;
use smoothcast::prelude::*;

const MONTHLY: [f64; 84] = [
    30.0, 21.0, 29.0, 31.0, 40.0, 48.0, 53.0, 47.0, 37.0, 39.0, 31.0, 29.0, 17.0, 9.0, 20.0,
    24.0, 27.0, 35.0, 41.0, 38.0, 27.0, 31.0, 27.0, 26.0, 21.0, 13.0, 21.0, 18.0, 33.0, 35.0,
    40.0, 36.0, 22.0, 24.0, 21.0, 20.0, 17.0, 14.0, 17.0, 19.0, 26.0, 29.0, 40.0, 31.0, 20.0,
    24.0, 18.0, 26.0, 17.0, 9.0, 17.0, 21.0, 28.0, 32.0, 46.0, 33.0, 23.0, 28.0, 22.0, 27.0,
    18.0, 8.0, 17.0, 21.0, 31.0, 34.0, 44.0, 38.0, 31.0, 30.0, 26.0, 32.0, 45.0, 34.0, 30.0,
    27.0, 25.0, 22.0, 28.0, 33.0, 42.0, 32.0, 40.0, 52.0,
];

#[test]
fn test_seasonal_fit_configured_from_json() {
    let ctx = CancellationToken::new();
    let opts = FitOptions::from_json(
        r#"{
            "alpha": 0.45,
            "beta": 0.03,
            "gamma": 0.73,
            "period": 12,
            "error_metric": "mape",
            "train_range": { "end": 71 }
        }"#,
    )
    .unwrap();

    let mut model = HoltWinters::new(Series::new("simple data", MONTHLY.to_vec()));
    let prediction = model.fit(&ctx, &opts).unwrap().predict(&ctx, 24).unwrap();
    assert_eq!(prediction.len(), 24);

    let fit = model.fitted().unwrap();
    assert_eq!(fit.seasonal_components().len(), 12);
    assert_eq!(fit.initial_level(), 30.0);

    let metrics = model.metrics().unwrap();
    assert_eq!(metrics.selected, ErrorType::Mape);
    assert!(metrics.mape.is_finite() && metrics.mape >= 0.0);
    assert_approx_eq!(
        metrics.sse,
        metrics.rmse * metrics.rmse * fit.test().len() as f64,
        1e-6
    );

    // Second cycle of the projection repeats the first, shifted by 12 trend steps
    let values = prediction.values();
    for m in 0..12 {
        assert_approx_eq!(values[m + 12] - values[m], 12.0 * fit.trend(), 1e-9);
    }
}

#[test]
fn test_simple_smoothing_on_ramp() {
    let ctx = CancellationToken::new();
    let data = Series::new("simple data", (1..=10).map(f64::from).collect());

    let mut model = AnyModel::new(ModelKind::SimpleExponentialSmoothing, data);
    model
        .fit(&ctx, &FitOptions::simple(0.1).with_train_range(TrainRange::until(5)))
        .unwrap();

    let prediction = model.predict(&ctx, 10).unwrap();
    assert_eq!(prediction.len(), 10);
    assert!(prediction.values().iter().all(|v| v.is_finite()));

    let main = model.describe(&ctx, DataType::Main).unwrap();
    assert_eq!(main.count, 10);
    assert_approx_eq!(main.mean, 5.5);

    let test = model.describe(&ctx, DataType::Test).unwrap();
    assert_eq!(test.count, 4);
    assert_approx_eq!(test.min, 7.0);
}

#[test]
fn test_cancellation_shared_across_threads() {
    let ctx = CancellationToken::new();
    let remote = ctx.clone();
    std::thread::spawn(move || remote.cancel()).join().unwrap();

    let mut model = HoltWinters::new(Series::new("simple data", MONTHLY.to_vec()));
    let opts = FitOptions::new(0.45, 0.03, 0.73, 12).with_train_range(TrainRange::until(71));

    assert!(matches!(
        model.fit(&ctx, &opts),
        Err(ForecastError::Cancelled)
    ));
    assert!(!model.is_fitted());
}
