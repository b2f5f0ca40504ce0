//! Scheduled ETL pipeline for a public hourly weather dataset: download the
//! archive, resample the observations into daily and monthly aggregates,
//! validate the daily aggregate, and replace two tables in a local SQLite
//! database.

pub mod config;
mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod schedule;
pub mod schema;
pub mod transform;
pub mod validate;

pub use config::{Cli, PipelineConfig};
pub use error::PipelineError;
pub use pipeline::RunReport;

pub use extract::ExtractError;
pub use load::{LoadError, LoadReport};
pub use transform::{wind_strength, TransformError, TransformOutput};
pub use validate::ValidationError;
