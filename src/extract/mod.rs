//! Extract stage: download the dataset archive and unpack the raw CSV.
//!
//! Credentials for the dataset host live outside this logic (environment
//! variables); download, auth, and unzip failures are fatal for the run and
//! propagate to the caller.

mod error;

pub use error::ExtractError;

use crate::config::PipelineConfig;
use futures_util::TryStreamExt;
use log::{info, warn};
use reqwest::Client;
use std::env;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::{fs, task};
use tokio_util::io::StreamReader;
use zip::result::ZipError;
use zip::ZipArchive;

const DATASET_DOWNLOAD_URL: &str = "https://www.kaggle.com/api/v1/datasets/download";
const USERNAME_VAR: &str = "KAGGLE_USERNAME";
const KEY_VAR: &str = "KAGGLE_KEY";

/// Basic-auth credentials for the dataset host, read from the environment.
#[derive(Debug, Clone)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl KaggleCredentials {
    pub fn from_env() -> Result<Self, ExtractError> {
        let username =
            env::var(USERNAME_VAR).map_err(|_| ExtractError::MissingCredential(USERNAME_VAR))?;
        let key = env::var(KEY_VAR).map_err(|_| ExtractError::MissingCredential(KEY_VAR))?;
        Ok(Self { username, key })
    }
}

/// Downloads the configured dataset archive and unpacks the raw CSV member.
///
/// Returns the path of the extracted CSV, which is the transform stage's
/// input.
pub async fn run(config: &PipelineConfig) -> Result<PathBuf, ExtractError> {
    let credentials = KaggleCredentials::from_env()?;

    fs::create_dir_all(&config.data_dir)
        .await
        .map_err(|e| ExtractError::DataDirCreation(config.data_dir.clone(), e))?;

    let archive_path = config.raw_archive_path();
    download_archive(&config.dataset, &credentials, &archive_path).await?;

    let csv_path = config.raw_csv_path();
    unpack_entry(
        archive_path,
        config.raw_file_name.clone(),
        csv_path.clone(),
    )
    .await?;

    info!("Extracted raw observations to {:?}", csv_path);
    Ok(csv_path)
}

/// Streams the archive for `dataset` to `dest`.
async fn download_archive(
    dataset: &str,
    credentials: &KaggleCredentials,
    dest: &Path,
) -> Result<(), ExtractError> {
    let url = format!("{DATASET_DOWNLOAD_URL}/{dataset}");
    info!("Downloading dataset archive from {}", url);

    let response = Client::new()
        .get(&url)
        .basic_auth(&credentials.username, Some(&credentials.key))
        .send()
        .await
        .map_err(|e| ExtractError::NetworkRequest(url.clone(), e))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            return Err(if let Some(status) = e.status() {
                ExtractError::HttpStatus {
                    url,
                    status,
                    source: e,
                }
            } else {
                ExtractError::NetworkRequest(url, e)
            });
        }
    };

    let stream = response
        .bytes_stream()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
    let mut reader = StreamReader::new(stream);

    let mut file = fs::File::create(dest)
        .await
        .map_err(|e| ExtractError::ArchiveWrite(dest.to_path_buf(), e))?;
    let bytes = tokio::io::copy(&mut reader, &mut file)
        .await
        .map_err(|e| ExtractError::ArchiveWrite(dest.to_path_buf(), e))?;
    file.flush()
        .await
        .map_err(|e| ExtractError::ArchiveWrite(dest.to_path_buf(), e))?;

    info!("Downloaded {} archive bytes to {:?}", bytes, dest);
    Ok(())
}

/// Unpacks a single named member of the zip archive to `dest` on a blocking
/// task.
async fn unpack_entry(
    archive: PathBuf,
    entry_name: String,
    dest: PathBuf,
) -> Result<(), ExtractError> {
    task::spawn_blocking(move || unpack_entry_blocking(&archive, &entry_name, &dest)).await?
}

fn unpack_entry_blocking(
    archive: &Path,
    entry_name: &str,
    dest: &Path,
) -> Result<(), ExtractError> {
    let file = std::fs::File::open(archive)
        .map_err(|e| ExtractError::UnpackIo(archive.to_path_buf(), e))?;
    let mut zip =
        ZipArchive::new(file).map_err(|e| ExtractError::ArchiveOpen(archive.to_path_buf(), e))?;

    let mut entry = match zip.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ExtractError::EntryNotFound {
                archive: archive.to_path_buf(),
                name: entry_name.to_string(),
            })
        }
        Err(e) => {
            return Err(ExtractError::EntryRead {
                archive: archive.to_path_buf(),
                name: entry_name.to_string(),
                source: e,
            })
        }
    };

    let mut out =
        std::fs::File::create(dest).map_err(|e| ExtractError::UnpackIo(dest.to_path_buf(), e))?;
    std::io::copy(&mut entry, &mut out)
        .map_err(|e| ExtractError::UnpackIo(dest.to_path_buf(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_test_archive(path: &Path, entry_name: &str, contents: &[u8]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file(entry_name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn unpack_extracts_named_entry() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("weather-dataset.zip");
        let dest = dir.path().join("weatherHistory.csv");
        write_test_archive(&archive, "weatherHistory.csv", b"a,b\n1,2\n");

        unpack_entry_blocking(&archive, "weatherHistory.csv", &dest).unwrap();

        let contents = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(contents, "a,b\n1,2\n");
    }

    #[test]
    fn unpack_reports_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("weather-dataset.zip");
        let dest = dir.path().join("weatherHistory.csv");
        write_test_archive(&archive, "other.csv", b"x\n");

        let err = unpack_entry_blocking(&archive, "weatherHistory.csv", &dest).unwrap_err();
        assert!(matches!(err, ExtractError::EntryNotFound { name, .. } if name == "weatherHistory.csv"));
    }

    #[test]
    fn credentials_come_from_the_environment() {
        // Touches process-global env vars, so both directions are checked in
        // one test to avoid interleaving with other tests.
        std::env::remove_var(USERNAME_VAR);
        std::env::remove_var(KEY_VAR);
        let err = KaggleCredentials::from_env().unwrap_err();
        assert!(matches!(err, ExtractError::MissingCredential(USERNAME_VAR)));

        std::env::set_var(USERNAME_VAR, "user");
        std::env::set_var(KEY_VAR, "secret");
        let creds = KaggleCredentials::from_env().unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.key, "secret");
        std::env::remove_var(USERNAME_VAR);
        std::env::remove_var(KEY_VAR);
    }
}
