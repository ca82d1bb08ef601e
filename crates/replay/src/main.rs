//! Scenario runner entry point.

use std::process::ExitCode;

use factory_replay::{Config, LogFormat};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env().with_args(std::env::args().skip(1));

    // Logs go to stderr; stdout carries the exported stream.
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    match factory_replay::run(&config).await {
        Ok(report) => {
            tracing::info!(
                scenario = %report.scenario,
                events = report.recorded.len(),
                version = report.final_version.as_i64(),
                "scenario passed"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(
                path = %config.scenario_path.display(),
                error = %err,
                "scenario failed"
            );
            ExitCode::FAILURE
        }
    }
}
