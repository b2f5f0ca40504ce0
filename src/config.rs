//! Runtime configuration for the pipeline.
//!
//! All file locations are explicit configuration rather than ambient
//! constants: the CLI (or environment) decides where the run keeps its
//! working files, and every stage receives concrete paths derived from
//! [`PipelineConfig`].

use clap::Parser;
use std::path::PathBuf;

const DAILY_CSV_NAME: &str = "daily_weather.csv";
const MONTHLY_CSV_NAME: &str = "monthly_weather.csv";

#[derive(Parser, Clone, Debug)]
#[command(
    author,
    version,
    about = "Weather ETL - resamples a raw hourly weather dataset into daily and monthly aggregates"
)]
pub struct Cli {
    /// Directory for the downloaded archive and the extracted raw CSV
    #[arg(long, env = "WEATHER_ETL_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for the daily/monthly aggregate CSVs
    #[arg(long, env = "WEATHER_ETL_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// SQLite database file the aggregates are loaded into
    #[arg(long, env = "WEATHER_ETL_DB_PATH", default_value = "weather.db")]
    pub db_path: PathBuf,

    /// Dataset slug on the dataset host
    #[arg(long, env = "WEATHER_ETL_DATASET", default_value = "muthuj7/weather-dataset")]
    pub dataset: String,

    /// Name of the CSV member inside the downloaded archive
    #[arg(long, env = "WEATHER_ETL_RAW_FILE", default_value = "weatherHistory.csv")]
    pub raw_file: String,

    /// Hour of day (UTC) at which the scheduled daily run fires
    #[arg(
        long,
        env = "WEATHER_ETL_RUN_HOUR",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(0..24)
    )]
    pub run_hour_utc: u32,

    /// Run the pipeline once and exit instead of scheduling daily runs
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.data_dir.clone(),
            output_dir: self.output_dir.clone(),
            db_path: self.db_path.clone(),
            dataset: self.dataset.clone(),
            raw_file_name: self.raw_file.clone(),
        }
    }
}

/// File locations and dataset identity for one pipeline run.
///
/// Each run wholly owns and overwrites the paths below; nothing else is
/// assumed to touch them while a run is in flight.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub db_path: PathBuf,
    pub dataset: String,
    pub raw_file_name: String,
}

impl PipelineConfig {
    /// Where the downloaded archive lands, named after the dataset slug tail.
    pub fn raw_archive_path(&self) -> PathBuf {
        let tail = self.dataset.rsplit('/').next().unwrap_or(&self.dataset);
        self.data_dir.join(format!("{tail}.zip"))
    }

    pub fn raw_csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.raw_file_name)
    }

    pub fn daily_csv_path(&self) -> PathBuf {
        self.output_dir.join(DAILY_CSV_NAME)
    }

    pub fn monthly_csv_path(&self) -> PathBuf {
        self.output_dir.join(MONTHLY_CSV_NAME)
    }
}
