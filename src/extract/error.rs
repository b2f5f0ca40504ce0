use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Dataset host credential '{0}' is not set in the environment")]
    MissingCredential(&'static str),

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to write archive '{0}'")]
    ArchiveWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to open archive '{0}'")]
    ArchiveOpen(PathBuf, #[source] ZipError),

    #[error("Archive '{archive}' has no entry named '{name}'")]
    EntryNotFound { archive: PathBuf, name: String },

    #[error("Failed to read entry '{name}' from archive '{archive}'")]
    EntryRead {
        archive: PathBuf,
        name: String,
        #[source]
        source: ZipError,
    },

    #[error("I/O error unpacking '{0}'")]
    UnpackIo(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
