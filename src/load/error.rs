use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read aggregate '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to open database '{0}'")]
    Open(PathBuf, #[source] rusqlite::Error),

    #[error("Database write failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed processing aggregate: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Column '{column}' has unsupported type {dtype} for the relational store")]
    UnsupportedType { column: String, dtype: String },
}
