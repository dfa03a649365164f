//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};

/// Pulse - Keep an eye on your WPU spending
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Rule-based spending suggestions for WPU wallets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on (overrides PORT, default 5000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides PULSE_HOST, default 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Skip the startup spend check against the demo account
        #[arg(long)]
        no_demo: bool,
    },

    /// Print the suggestion for a spend total
    Classify {
        /// Total spent, in whole WPU
        #[arg(allow_negative_numbers = true)]
        total: f64,
    },

    /// Record spends for an account and report running totals
    Demo {
        /// Account identifier
        #[arg(short, long, default_value = pulse_core::DEMO_ACCOUNT)]
        account: String,

        /// Amount in whole WPU (repeatable; defaults to 5 then 6)
        #[arg(long = "amount")]
        amounts: Vec<String>,
    },
}
