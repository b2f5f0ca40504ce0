//! The four-stage pipeline: extract -> transform -> validate -> load.
//!
//! Stages hand off through explicit inputs and outputs: extract returns the
//! raw CSV path, transform returns the aggregate paths, validate gates the
//! load. The first failing stage stops the run; files already written by
//! earlier stages stay on disk.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::{extract, load, transform, validate};
use log::info;
use std::path::PathBuf;
use tokio::task;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub raw_csv: PathBuf,
    pub daily_rows: usize,
    pub monthly_rows: usize,
}

/// Runs all four stages.
pub async fn run(config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    let raw_csv = extract::run(config).await?;
    run_from_raw(config, raw_csv).await
}

/// Runs transform -> validate -> load on an already-extracted raw CSV.
///
/// The tabular and database stages are blocking, so each runs on a blocking
/// task.
pub async fn run_from_raw(
    config: &PipelineConfig,
    raw_csv: PathBuf,
) -> Result<RunReport, PipelineError> {
    let outputs = {
        let raw = raw_csv.clone();
        let daily_out = config.daily_csv_path();
        let monthly_out = config.monthly_csv_path();
        task::spawn_blocking(move || transform::run(&raw, &daily_out, &monthly_out)).await??
    };

    {
        let daily = outputs.daily_path.clone();
        task::spawn_blocking(move || validate::run(&daily)).await??;
    }

    let loaded = {
        let daily = outputs.daily_path.clone();
        let monthly = outputs.monthly_path.clone();
        let db_path = config.db_path.clone();
        task::spawn_blocking(move || load::run(&daily, &monthly, &db_path)).await??
    };

    info!(
        "Pipeline run complete: {} daily rows, {} monthly rows",
        loaded.daily_rows, loaded.monthly_rows
    );
    Ok(RunReport {
        raw_csv,
        daily_rows: loaded.daily_rows,
        monthly_rows: loaded.monthly_rows,
    })
}
