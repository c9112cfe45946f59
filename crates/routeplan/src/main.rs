//! Routeplan CLI binary.
//!
//! Runs the usage command once, writes the routing artifact and prints its
//! path. Logs go to stderr so stdout carries only the path.

use clap::Parser;
use routeplan::{CommandStatusSource, RouteplanConfig, RouteplanResult, run_once};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Routing run failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> RouteplanResult<PathBuf> {
    let config = RouteplanConfig::load()?;
    let source = CommandStatusSource::from_config(&config.status_command);
    let outcome = run_once(&config, &source, chrono::Utc::now().timestamp())?;
    Ok(outcome.path)
}
