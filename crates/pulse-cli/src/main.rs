//! Pulse CLI - WPU spending assistant
//!
//! Usage:
//!   pulse serve --port 5000     Start web server
//!   pulse classify 42           Print the suggestion for a total
//!   pulse demo --amount 5       Record spends and show alerts

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_demo,
        } => commands::cmd_serve(host, port, no_demo).await,
        Commands::Classify { total } => commands::cmd_classify(total),
        Commands::Demo { account, amounts } => commands::cmd_demo(&account, &amounts),
    }
}
