//! CLI argument definitions.

use clap::Parser;

/// Routeplan - choose a model provider per task category from observed usage
#[derive(Parser, Debug)]
#[command(name = "routeplan")]
#[command(about = "Choose a model provider per task category from observed usage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
