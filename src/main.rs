use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use log::info;
use tracing_subscriber::EnvFilter;
use weatherpipe::{pipeline, schedule, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.pipeline_config();
    info!(
        "Starting weatherpipe for dataset '{}' (database {:?})",
        config.dataset, config.db_path
    );

    if cli.once {
        let report = pipeline::run(&config).await?;
        info!(
            "Run complete: {} daily rows and {} monthly rows loaded",
            report.daily_rows, report.monthly_rows
        );
        return Ok(());
    }

    schedule::run_daily(config, cli.run_hour_utc).await;
    Ok(())
}

/// Installs the tracing subscriber; its log bridge picks up the library's
/// `log` records.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
