//! Dev Center app deployer entry point.

mod adapter;
mod app;
mod cli;
mod config;
mod outputs;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Settings;
use outputs::OutputTarget;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the outputs.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match try_main(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting app deployer");

    let settings = Settings::resolve(cli)?;
    tracing::debug!(?settings, "configuration resolved");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(settings, &OutputTarget::from_env()))?;
    Ok(())
}
