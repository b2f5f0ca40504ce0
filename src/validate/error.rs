use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Failed to read daily aggregate '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' not found in daily aggregate")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed processing daily aggregate: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Missing values detected in daily aggregate ({cells} empty cells)")]
    MissingValues { cells: usize },

    #[error("Daily mean temperature {value} on {date} is outside the valid range -50 to 50 C")]
    TemperatureOutOfRange { date: String, value: f64 },

    #[error("Daily mean humidity {value} on {date} is outside the valid range 0 to 1")]
    HumidityOutOfRange { date: String, value: f64 },

    #[error("Negative daily mean wind speed {value} on {date}")]
    NegativeWindSpeed { date: String, value: f64 },
}
