//! Validate stage: sanity checks over the daily aggregate.
//!
//! Four checks run in a fixed order and the first violation aborts the run:
//! completeness, temperature range, humidity range, non-negative wind speed.
//! The checks are deterministic for a given file, so re-validating the same
//! daily CSV yields the same outcome and the same error message.

mod error;

pub use error::ValidationError;

use crate::schema::{COL_AVG_HUMIDITY, COL_AVG_TEMPERATURE, COL_AVG_WIND_SPEED, COL_DATE};
use log::info;
use polars::prelude::*;
use std::path::Path;

pub const TEMPERATURE_RANGE_C: (f64, f64) = (-50.0, 50.0);
pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 1.0);

/// Reloads the daily aggregate from `daily_csv` and runs the four checks.
///
/// # Errors
///
/// The first violated check produces its error; later checks never run.
/// These errors are fatal and non-retryable: the load stage must not execute
/// after a validation failure.
pub fn run(daily_csv: &Path) -> Result<(), ValidationError> {
    let df = read_daily(daily_csv)?;

    check_complete(&df)?;

    let (min_temp, max_temp) = TEMPERATURE_RANGE_C;
    if let Some((idx, value)) = first_outside(&df, COL_AVG_TEMPERATURE, min_temp, max_temp)? {
        return Err(ValidationError::TemperatureOutOfRange {
            date: date_at(&df, idx),
            value,
        });
    }

    let (min_hum, max_hum) = HUMIDITY_RANGE;
    if let Some((idx, value)) = first_outside(&df, COL_AVG_HUMIDITY, min_hum, max_hum)? {
        return Err(ValidationError::HumidityOutOfRange {
            date: date_at(&df, idx),
            value,
        });
    }

    if let Some((idx, value)) = first_outside(&df, COL_AVG_WIND_SPEED, 0.0, f64::INFINITY)? {
        return Err(ValidationError::NegativeWindSpeed {
            date: date_at(&df, idx),
            value,
        });
    }

    info!("Validated {} daily aggregate rows from {:?}", df.height(), daily_csv);
    Ok(())
}

fn read_daily(path: &Path) -> Result<DataFrame, ValidationError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| ValidationError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| ValidationError::CsvRead(path.to_path_buf(), e))
}

/// Any empty cell anywhere in the table fails the run.
fn check_complete(df: &DataFrame) -> Result<(), ValidationError> {
    let cells: usize = df
        .get_columns()
        .iter()
        .map(|column| column.null_count())
        .sum();
    if cells > 0 {
        return Err(ValidationError::MissingValues { cells });
    }
    Ok(())
}

/// First row whose value in `name` falls outside `[min, max]`, in row order.
fn first_outside(
    df: &DataFrame,
    name: &str,
    min: f64,
    max: f64,
) -> Result<Option<(usize, f64)>, ValidationError> {
    let values = float_column(df, name)?;
    let found = values.into_iter().enumerate().find_map(|(idx, value)| {
        value
            .filter(|v| *v < min || *v > max)
            .map(|v| (idx, v))
    });
    Ok(found)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, ValidationError> {
    let column = df
        .column(name)
        .map_err(|e| ValidationError::ColumnNotFound(name.to_string(), e))?;
    let cast = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(cast.f64()?.clone())
}

fn date_at(df: &DataFrame, idx: usize) -> String {
    df.column(COL_DATE)
        .ok()
        .and_then(|column| column.str().ok())
        .and_then(|dates| dates.get(idx))
        .unwrap_or("?")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DAILY_HEADER: &str = "date,avg_temperature_c,avg_humidity,avg_wind_speed_kmh,\
avg_visibility_km,avg_pressure_mb,wind_strength\n";

    fn write_daily(rows: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily_weather.csv");
        let mut csv = DAILY_HEADER.to_string();
        for row in rows {
            csv.push_str(row);
            csv.push('\n');
        }
        std::fs::write(&path, csv).unwrap();
        (dir, path)
    }

    #[test]
    fn well_formed_aggregate_passes() {
        let (_dir, path) = write_daily(&[
            "2006-04-01,15.0,0.5,2.0,11.3,1015.1,Light Air",
            "2006-04-02,25.0,0.6,5.0,11.3,1014.8,Light Breeze",
        ]);
        run(&path).unwrap();
    }

    #[test]
    fn humidity_above_one_fails_with_the_humidity_error() {
        let (_dir, path) = write_daily(&["2006-04-01,15.0,1.2,2.0,11.3,1015.1,Light Air"]);
        let err = run(&path).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::HumidityOutOfRange { ref date, value }
                if date == "2006-04-01" && (value - 1.2).abs() < 1e-9
        ));
    }

    #[test]
    fn temperature_is_checked_before_humidity() {
        // Both out of range; the earlier check wins.
        let (_dir, path) = write_daily(&["2006-04-01,-60.0,1.5,2.0,11.3,1015.1,Calm"]);
        let err = run(&path).unwrap_err();
        assert!(matches!(err, ValidationError::TemperatureOutOfRange { .. }));
    }

    #[test]
    fn missing_cells_fail_before_any_range_check() {
        let (_dir, path) = write_daily(&["2006-04-01,,1.5,2.0,11.3,1015.1,Calm"]);
        let err = run(&path).unwrap_err();
        assert!(matches!(err, ValidationError::MissingValues { cells: 1 }));
    }

    #[test]
    fn negative_wind_speed_is_rejected() {
        let (_dir, path) = write_daily(&["2006-04-01,15.0,0.5,-2.0,11.3,1015.1,Calm"]);
        let err = run(&path).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeWindSpeed { value, .. } if (value + 2.0).abs() < 1e-9
        ));
    }

    #[test]
    fn validation_is_idempotent() {
        let (_dir, path) = write_daily(&[
            "2006-04-01,15.0,0.5,2.0,11.3,1015.1,Light Air",
            "2006-04-02,25.0,1.4,5.0,11.3,1014.8,Light Breeze",
        ]);
        let first = run(&path).unwrap_err().to_string();
        let second = run(&path).unwrap_err().to_string();
        assert_eq!(first, second);
        assert!(first.contains("humidity"));
    }
}
