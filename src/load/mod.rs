//! Load stage: persist the aggregates into the relational store.
//!
//! Each run drops and recreates the two destination tables inside a single
//! transaction, so the store always holds exactly one copy of the latest
//! aggregates. The table schema is derived from the frame columns; there is
//! no separate migration step.

mod error;

pub use error::LoadError;

use chrono::{Duration, NaiveDate};
use log::info;
use polars::prelude::*;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction};
use std::path::Path;

pub const DAILY_TABLE: &str = "daily_weather";
pub const MONTHLY_TABLE: &str = "monthly_weather";

/// Row counts written to the two destination tables.
#[derive(Debug, Clone, Copy)]
pub struct LoadReport {
    pub daily_rows: usize,
    pub monthly_rows: usize,
}

/// Reloads both aggregate CSVs and replaces the destination tables.
pub fn run(daily_csv: &Path, monthly_csv: &Path, db_path: &Path) -> Result<LoadReport, LoadError> {
    let daily = read_aggregate(daily_csv)?;
    let monthly = read_aggregate(monthly_csv)?;

    let mut conn =
        Connection::open(db_path).map_err(|e| LoadError::Open(db_path.to_path_buf(), e))?;
    let tx = conn.transaction()?;
    let daily_rows = replace_table(&tx, DAILY_TABLE, &daily)?;
    let monthly_rows = replace_table(&tx, MONTHLY_TABLE, &monthly)?;
    tx.commit()?;

    info!(
        "Loaded {} rows into {} and {} rows into {} at {:?}",
        daily_rows, DAILY_TABLE, monthly_rows, MONTHLY_TABLE, db_path
    );
    Ok(LoadReport {
        daily_rows,
        monthly_rows,
    })
}

fn read_aggregate(path: &Path) -> Result<DataFrame, LoadError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))
}

/// Drops and recreates `table` from the frame's columns, then inserts every
/// row. Destructive overwrite, not append.
fn replace_table(tx: &Transaction, table: &str, df: &DataFrame) -> Result<usize, LoadError> {
    let columns = df.get_columns();

    let declarations: Vec<String> = columns
        .iter()
        .map(|column| format!("\"{}\" {}", column.name(), sqlite_type(column.dtype())))
        .collect();
    tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{table}\""))?;
    tx.execute(
        &format!("CREATE TABLE \"{}\" ({})", table, declarations.join(", ")),
        [],
    )?;

    let names: Vec<String> = columns
        .iter()
        .map(|column| format!("\"{}\"", column.name()))
        .collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let insert = format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        names.join(", "),
        placeholders.join(", ")
    );

    let mut stmt = tx.prepare(&insert)?;
    for row in 0..df.height() {
        let mut values = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.as_materialized_series().get(row)?;
            values.push(sqlite_value(column.name(), value)?);
        }
        stmt.execute(params_from_iter(values))?;
    }

    Ok(df.height())
}

fn sqlite_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Float32 | DataType::Float64 => "REAL",
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Boolean => "INTEGER",
        _ => "TEXT",
    }
}

fn sqlite_value(column: &str, value: AnyValue) -> Result<Value, LoadError> {
    match value {
        AnyValue::Null => Ok(Value::Null),
        AnyValue::Boolean(v) => Ok(Value::Integer(v as i64)),
        AnyValue::Int32(v) => Ok(Value::Integer(v as i64)),
        AnyValue::Int64(v) => Ok(Value::Integer(v)),
        AnyValue::Float32(v) => Ok(Value::Real(v as f64)),
        AnyValue::Float64(v) => Ok(Value::Real(v)),
        AnyValue::String(v) => Ok(Value::Text(v.to_string())),
        AnyValue::StringOwned(v) => Ok(Value::Text(v.to_string())),
        AnyValue::Date(days) => {
            let date = NaiveDate::default() + Duration::days(days as i64);
            Ok(Value::Text(date.to_string()))
        }
        other => Err(LoadError::UnsupportedType {
            column: column.to_string(),
            dtype: other.dtype().to_string(),
        }),
    }
}
