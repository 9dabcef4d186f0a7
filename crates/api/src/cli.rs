//! Command-line interface
//!
//! Every command prints its result as pretty JSON on stdout; logs go to
//! stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hoursguard_domain::{Config, HoursGuardError, Result};
use hoursguard_infra::config;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::commands;
use crate::AppContext;

#[derive(Debug, Parser)]
#[command(name = "hoursguard", version, about = "Personal work-hours tracking")]
pub struct Cli {
    /// Config file (JSON or TOML); skips environment and probed files
    #[arg(long, global = true, env = "HOURSGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start a work session
    ClockIn {
        #[arg(long)]
        note: Option<String>,
    },
    /// End the open work session
    ClockOut {
        #[arg(long)]
        note: Option<String>,
    },
    /// Today's sessions and total
    Today,
    /// Monthly totals, the current month by default
    Month {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Inspect or manage the error log
    Errors {
        #[command(subcommand)]
        action: ErrorsCommand,
    },
    /// Produce a health report
    Diagnose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ErrorsCommand {
    List,
    Clear,
    /// Save the log as JSON into the download directory
    Export,
}

/// Resolve configuration: explicit file, then environment or probed file,
/// then defaults.
///
/// # Errors
/// Returns `HoursGuardError::Config` only when an explicit file fails to
/// load.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return config::load_from_file(Some(path));
    }

    Ok(config::load().unwrap_or_else(|err| {
        debug!(error = %err, "no configuration found, using defaults");
        Config::default()
    }))
}

/// Execute `command` against `ctx`
pub async fn run(ctx: &AppContext, command: Command) -> Result<Value> {
    match command {
        Command::ClockIn { note } => to_json(&commands::clock_in(ctx, note)?),
        Command::ClockOut { note } => to_json(&commands::clock_out(ctx, note)?),
        Command::Today => to_json(&commands::today_stats(ctx)?),
        Command::Month { year, month } => to_json(&commands::month_stats(ctx, year, month)?),
        Command::Errors { action: ErrorsCommand::List } => to_json(&commands::list_errors(ctx)?),
        Command::Errors { action: ErrorsCommand::Clear } => {
            to_json(&serde_json::json!({ "cleared": commands::clear_errors(ctx)? }))
        }
        Command::Errors { action: ErrorsCommand::Export } => {
            to_json(&commands::export_errors(ctx)?)
        }
        Command::Diagnose => to_json(&commands::diagnose(ctx).await?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| HoursGuardError::Internal(format!("serialize command output: {e}")))
}
