use forecast_smoothing::data::{DataLoader, Series};
use forecast_smoothing::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_numeric_column() {
    let file = write_csv("date,sales\n2023-01-01,10.5\n2023-01-02,12\n2023-01-03,9.25\n");

    let series = DataLoader::from_csv(file.path(), "sales").unwrap();

    assert_eq!(series.name(), "sales");
    assert_eq!(series.values(), &[10.5, 12.0, 9.25]);
}

#[test]
fn test_load_integer_column() {
    let file = write_csv("units\n3\n4\n5\n");
    let series = DataLoader::from_csv(file.path(), "units").unwrap();
    assert_eq!(series.values(), &[3.0, 4.0, 5.0]);
}

#[test]
fn test_missing_column() {
    let file = write_csv("a,b\n1,2\n");
    let err = DataLoader::from_csv(file.path(), "c").unwrap_err();
    assert!(matches!(err, ForecastError::DataError(_)));
}

#[test]
fn test_missing_value_rejected() {
    let file = write_csv("t,v\n1,1.0\n2,\n3,3.0\n");
    let err = DataLoader::from_csv(file.path(), "v").unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn test_missing_file() {
    let err = DataLoader::from_csv("/nonexistent/path/data.csv", "v").unwrap_err();
    assert!(matches!(err, ForecastError::IoError(_)));
}

#[test]
fn test_csv_round_trip_through_loader() {
    let series = Series::new("Prediction", vec![1.5, 2.5, 3.5]);

    let mut file = NamedTempFile::new().unwrap();
    series.write_csv(&mut file).unwrap();

    let loaded = DataLoader::from_csv(file.path(), "Prediction").unwrap();
    assert_eq!(loaded, series);
}

#[test]
fn test_series_json() {
    let series = Series::new("Prediction", vec![1.0, 2.0]);
    assert_eq!(
        series.to_json().unwrap(),
        r#"{"name":"Prediction","values":[1.0,2.0]}"#
    );
}
