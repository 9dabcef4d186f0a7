//! Error log and health commands

use hoursguard_domain::{DiagnosticsReport, ErrorRecord, Result};
use serde::Serialize;

use crate::utils::command_helpers::{execute_logged, execute_logged_async};
use crate::AppContext;

/// Result of an error log export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub filename: String,
    pub directory: String,
    pub records: usize,
}

/// Records in the error log, oldest first
pub fn list_errors(ctx: &AppContext) -> Result<Vec<ErrorRecord>> {
    execute_logged("errors::list", || Ok(ctx.handler.error_log()))
}

/// Empty the error log and its persisted mirror; returns how many records
/// were dropped
pub fn clear_errors(ctx: &AppContext) -> Result<usize> {
    execute_logged("errors::clear", || {
        let dropped = ctx.handler.error_log().len();
        ctx.handler.clear_error_log();
        Ok(dropped)
    })
}

/// Write the error log to the download directory
pub fn export_errors(ctx: &AppContext) -> Result<ExportReceipt> {
    execute_logged("errors::export", || {
        let records = ctx.handler.error_log().len();
        let filename = ctx.handler.export_error_log()?;
        Ok(ExportReceipt {
            filename,
            directory: ctx.config.storage.download_dir.clone(),
            records,
        })
    })
}

/// Compute a fresh health report
pub async fn diagnose(ctx: &AppContext) -> Result<DiagnosticsReport> {
    execute_logged_async("diagnostics::diagnose", || async {
        Ok(ctx.handler.system_diagnosis().await)
    })
    .await
}
