//! Server command implementation

use anyhow::{Context, Result};
use pulse_core::{run_startup_demo, SpendAccumulator, SpendAlert, DEMO_ACCOUNT};
use pulse_server::ServerConfig;
use tracing::info;

/// Environment configuration with CLI overrides applied
pub fn resolve_config(host: Option<String>, port: Option<u16>) -> ServerConfig {
    let mut config = ServerConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config
}

/// Run the fixed startup spends unless `--no-demo` was given
///
/// Alerts go to standard output as they fire and are also returned.
pub fn startup_check(no_demo: bool) -> Vec<SpendAlert> {
    if no_demo {
        info!("Startup spend check skipped (--no-demo)");
        return Vec::new();
    }

    let accumulator = SpendAccumulator::new();
    let alerts = run_startup_demo(&accumulator);
    info!(
        account = DEMO_ACCOUNT,
        alerts = alerts.len(),
        "Startup spend check complete"
    );
    alerts
}

pub async fn cmd_serve(host: Option<String>, port: Option<u16>, no_demo: bool) -> Result<()> {
    let config = resolve_config(host, port);

    println!("🚀 Starting Pulse web server...");
    println!("   Listening: http://{}:{}", config.host, config.port);
    println!("   Endpoint: POST /analyze");
    println!();
    println!("   Press Ctrl+C to stop");

    startup_check(no_demo);

    pulse_server::serve_with_config(config)
        .await
        .context("Web server stopped with an error")?;

    Ok(())
}
