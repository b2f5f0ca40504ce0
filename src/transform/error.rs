use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Parsing error reading raw observations '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error(
        "Raw CSV column count ({found}) does not match the expected schema length ({expected}) for '{path}'"
    )]
    SchemaMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Failed to rename raw observation columns for '{path}'")]
    ColumnRename {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing observations: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Required column '{0}' not found in aggregate")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("I/O error writing aggregate '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing aggregate '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),
}
