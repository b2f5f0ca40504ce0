//! Transform stage: raw hourly observations into daily and monthly
//! aggregates.
//!
//! The raw CSV is renamed to a fixed schema, timestamps are normalized to a
//! naive UTC timeline, duplicate and incomplete rows are removed, and the
//! five numeric fields are averaged per calendar day and per calendar month.
//! Daily rows additionally get a wind-strength label; monthly rows get the
//! mode of the precipitation type.

mod error;
mod wind;

pub use error::TransformError;
pub use wind::wind_strength;

use crate::schema::{
    numeric_aggregates, raw_schema_column_names, COL_AVG_WIND_SPEED, COL_DATE, COL_HUMIDITY,
    COL_MODE_PRECIP_TYPE, COL_MONTH, COL_PRECIP_TYPE, COL_TEMPERATURE, COL_TIMESTAMP,
    COL_WIND_SPEED, COL_WIND_STRENGTH, RAW_TIMESTAMP_FORMAT,
};
use log::info;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Paths and row counts of the written aggregates, handed to the next stages.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub daily_path: PathBuf,
    pub monthly_path: PathBuf,
    pub daily_rows: usize,
    pub monthly_rows: usize,
}

/// Runs the transform stage: reads `raw_csv`, writes the daily aggregate to
/// `daily_out` and the monthly aggregate to `monthly_out`.
///
/// # Errors
///
/// Fails on malformed input (unparseable timestamps, wrong column count) and
/// on any I/O or engine error; all are fatal for the run.
pub fn run(
    raw_csv: &Path,
    daily_out: &Path,
    monthly_out: &Path,
) -> Result<TransformOutput, TransformError> {
    info!("Transforming raw observations from {:?}", raw_csv);

    let raw = read_raw_frame(raw_csv)?;
    let raw_rows = raw.height();
    let cleaned = cleaned_observations(raw);

    let mut daily = daily_aggregate(cleaned.clone())?;
    let mut monthly = monthly_aggregate(cleaned)?;

    for parent in [daily_out.parent(), monthly_out.parent()]
        .into_iter()
        .flatten()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| TransformError::OutputDirCreation(parent.to_path_buf(), e))?;
    }
    write_aggregate_csv(&mut daily, daily_out)?;
    write_aggregate_csv(&mut monthly, monthly_out)?;

    info!(
        "Wrote {} daily and {} monthly aggregate rows from {} raw observations",
        daily.height(),
        monthly.height(),
        raw_rows
    );

    Ok(TransformOutput {
        daily_path: daily_out.to_path_buf(),
        monthly_path: monthly_out.to_path_buf(),
        daily_rows: daily.height(),
        monthly_rows: monthly.height(),
    })
}

/// Reads the raw CSV and assigns the fixed snake_case schema positionally.
///
/// The source file spells missing values as the literal string `null`.
fn read_raw_frame(path: &Path) -> Result<DataFrame, TransformError> {
    let schema_names = raw_schema_column_names();

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_null_values(Some(NullValues::AllColumnsSingle("null".into()))),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| TransformError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| TransformError::CsvRead(path.to_path_buf(), e))?;

    if df.width() != schema_names.len() {
        return Err(TransformError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: schema_names.len(),
            found: df.width(),
        });
    }

    df.set_column_names(schema_names.iter().copied())
        .map_err(|e| TransformError::ColumnRename {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(df)
}

/// Parses timestamps onto a naive UTC timeline, then drops exact-duplicate
/// rows and rows missing temperature, humidity, or wind speed.
fn cleaned_observations(raw: DataFrame) -> LazyFrame {
    raw.lazy()
        .with_column(utc_timestamp_expr())
        .unique_stable(None, UniqueKeepStrategy::First)
        .drop_nulls(Some(vec![
            col(COL_TEMPERATURE),
            col(COL_HUMIDITY),
            col(COL_WIND_SPEED),
        ]))
}

/// Strict timestamp parse: offset-aware strings -> UTC -> timezone tag
/// dropped.
fn utc_timestamp_expr() -> Expr {
    col(COL_TIMESTAMP)
        .str()
        .to_datetime(
            Some(TimeUnit::Milliseconds),
            Some("UTC".into()),
            StrptimeOptions {
                format: Some(RAW_TIMESTAMP_FORMAT.into()),
                ..Default::default()
            },
            lit("raise"),
        )
        .dt()
        .replace_time_zone(None, lit("raise"), NonExistent::Raise)
        .alias(COL_TIMESTAMP)
}

fn month_expr() -> Expr {
    col(COL_TIMESTAMP)
        .dt()
        .truncate(lit("1mo"))
        .dt()
        .date()
        .alias(COL_MONTH)
}

fn mean_exprs() -> Vec<Expr> {
    numeric_aggregates()
        .into_iter()
        .map(|(source, target)| col(source).mean().alias(target))
        .collect()
}

/// Mean of the numeric fields per calendar day, labelled with the wind
/// strength of the day's mean wind speed.
fn daily_aggregate(cleaned: LazyFrame) -> Result<DataFrame, TransformError> {
    let mut daily = cleaned
        .group_by([col(COL_TIMESTAMP).dt().date().alias(COL_DATE)])
        .agg(mean_exprs())
        .sort([COL_DATE], Default::default())
        .collect()?;

    let labels: StringChunked = {
        let speeds = daily
            .column(COL_AVG_WIND_SPEED)
            .map_err(|e| TransformError::ColumnNotFound(COL_AVG_WIND_SPEED.to_string(), e))?
            .f64()?;
        speeds
            .into_iter()
            .map(|speed| speed.map(wind_strength))
            .collect()
    };
    daily.with_column(labels.with_name(COL_WIND_STRENGTH.into()).into_series())?;

    Ok(daily)
}

/// Mean of the numeric fields per calendar month, joined with the month's
/// precipitation-type mode.
fn monthly_aggregate(cleaned: LazyFrame) -> Result<DataFrame, TransformError> {
    let numeric = cleaned
        .clone()
        .group_by([month_expr()])
        .agg(mean_exprs());

    let mode = monthly_precip_mode(cleaned)?;

    let monthly = numeric
        .join(
            mode.lazy(),
            [col(COL_MONTH)],
            [col(COL_MONTH)],
            JoinArgs::new(JoinType::Left),
        )
        .sort([COL_MONTH], Default::default())
        .collect()?;

    Ok(monthly)
}

/// Most frequent non-null precipitation type per month.
///
/// Ties go to the value seen first in row order; months whose precipitation
/// type is entirely null are absent here and come out of the left join with a
/// null mode.
fn monthly_precip_mode(cleaned: LazyFrame) -> Result<DataFrame, TransformError> {
    let pairs = cleaned
        .select([month_expr(), col(COL_PRECIP_TYPE)])
        .collect()?;
    let months = pairs.column(COL_MONTH)?.date()?;
    let precip = pairs.column(COL_PRECIP_TYPE)?.str()?;

    // Per month: (value, count) in first-encountered order.
    let mut month_keys: Vec<i32> = Vec::new();
    let mut counts: HashMap<i32, Vec<(String, usize)>> = HashMap::new();
    for idx in 0..pairs.height() {
        let (Some(month), Some(kind)) = (months.get(idx), precip.get(idx)) else {
            continue;
        };
        let slot = counts.entry(month).or_insert_with(|| {
            month_keys.push(month);
            Vec::new()
        });
        match slot.iter_mut().find(|(value, _)| value.as_str() == kind) {
            Some((_, count)) => *count += 1,
            None => slot.push((kind.to_string(), 1)),
        }
    }

    let modes: Vec<Option<String>> = month_keys
        .iter()
        .map(|month| {
            let mut best: Option<(&String, usize)> = None;
            for (value, count) in &counts[month] {
                if best.map_or(true, |(_, best_count)| *count > best_count) {
                    best = Some((value, *count));
                }
            }
            best.map(|(value, _)| value.clone())
        })
        .collect();

    let month_column: Column = Int32Chunked::from_vec(COL_MONTH.into(), month_keys)
        .into_date()
        .into_series()
        .into();
    let mode_column: Column = Series::new(COL_MODE_PRECIP_TYPE.into(), modes).into();
    DataFrame::new(vec![month_column, mode_column]).map_err(Into::into)
}

fn write_aggregate_csv(df: &mut DataFrame, path: &Path) -> Result<(), TransformError> {
    let mut file = std::fs::File::create(path)
        .map_err(|e| TransformError::CsvWriteIo(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| TransformError::CsvWritePolars(path.to_path_buf(), e))?;
    Ok(())
}
