//! Hours Guard - personal work-hours tracking
//!
//! Main entry point for the `hoursguard` CLI.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use hoursguard_lib::cli::{self, Cli};
use hoursguard_lib::hooks;
use hoursguard_lib::utils::logging::init_logging;
use hoursguard_lib::AppContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG, so read it before logging starts
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = cli::load_config(cli.config.clone()).context("failed to load configuration")?;
    init_logging(cli.log_json, &config.log_level)?;

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let ctx = AppContext::new(config).context("failed to start")?;
    hooks::install_panic_hook(Arc::clone(&ctx.handler));

    let result = cli::run(&ctx, cli.command).await;

    hooks::remove_panic_hook();
    ctx.shutdown();

    let output = result?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
