//! Integration tests for the command layer and CLI dispatch

mod support;

use chrono::Duration;
use hoursguard_domain::{ClockKind, HoursGuardError, WorkDuration};
use hoursguard_lib::cli::{self, Command, ErrorsCommand};
use hoursguard_lib::commands;
use support::create_test_app;

// ============================================================================
// Tracking
// ============================================================================

#[tokio::test]
async fn test_clock_in_out_and_today() {
    let app = create_test_app();

    let first = commands::clock_in(&app.ctx, Some("standup".into())).unwrap();
    app.clock.advance(Duration::hours(7) + Duration::minutes(45));
    let second = commands::clock_out(&app.ctx, None).unwrap();

    assert_eq!(first.kind, ClockKind::In);
    assert_eq!(first.note.as_deref(), Some("standup"));
    assert_eq!(second.kind, ClockKind::Out);

    let today = commands::today_stats(&app.ctx).unwrap();
    assert_eq!(today.total, WorkDuration { hours: 7, minutes: 45 });
    assert!(!today.open);
}

#[tokio::test]
async fn test_month_defaults_to_current_year() {
    let app = create_test_app();
    commands::clock_in(&app.ctx, None).unwrap();
    app.clock.advance(Duration::hours(2));
    commands::clock_out(&app.ctx, None).unwrap();

    let explicit = commands::month_stats(&app.ctx, None, Some(3)).unwrap();
    assert_eq!(explicit.year, 2026);
    assert_eq!(explicit.days_worked, 1);

    let current = commands::month_stats(&app.ctx, None, None).unwrap();
    assert_eq!(current, explicit);

    let err = commands::month_stats(&app.ctx, Some(2026), None).unwrap_err();
    assert!(matches!(err, HoursGuardError::InvalidInput(_)));
}

#[tokio::test]
async fn test_double_clock_in_surfaces_invalid_input() {
    let app = create_test_app();
    commands::clock_in(&app.ctx, None).unwrap();

    let err = commands::clock_in(&app.ctx, None).unwrap_err();

    assert!(matches!(err, HoursGuardError::InvalidInput(_)));
    // caller errors are not failures of the system
    assert!(app.ctx.handler.error_log().is_empty());
}

// ============================================================================
// Error log
// ============================================================================

#[tokio::test]
async fn test_error_log_list_export_clear() {
    let app = create_test_app();
    app.ctx.handler.handle_error(HoursGuardError::Internal("first".into()), "ui");
    app.ctx.handler.handle_error(HoursGuardError::Network("fetch failed".into()), "sync");

    let listed = commands::list_errors(&app.ctx).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].context, "sync");

    let receipt = commands::export_errors(&app.ctx).unwrap();
    assert_eq!(receipt.filename, "hoursguard-errors-2026-03-02.json");
    assert_eq!(receipt.records, 2);
    assert!(app.export_dir().join(&receipt.filename).exists());

    assert_eq!(commands::clear_errors(&app.ctx).unwrap(), 2);
    assert!(commands::list_errors(&app.ctx).unwrap().is_empty());
}

#[tokio::test]
async fn test_diagnose_reports_error_rate() {
    let app = create_test_app();
    for i in 0..11 {
        app.ctx.handler.handle_error(HoursGuardError::Internal(format!("boom {i}")), "ui");
    }

    let report = commands::diagnose(&app.ctx).await.unwrap();

    assert_eq!(report.error_stats.last_24h, 11);
    assert_eq!(report.error_stats.by_context["ui"], 11);
    assert!(report.issues.contains(&"Too many errors in the last 24 hours".to_string()));
    assert!(report.suggestions.contains(&"Restart the application".to_string()));
}

// ============================================================================
// CLI dispatch
// ============================================================================

#[tokio::test]
async fn test_cli_run_returns_json() {
    let app = create_test_app();

    let record = cli::run(&app.ctx, Command::ClockIn { note: None }).await.unwrap();
    assert_eq!(record["kind"], "in");

    let cleared =
        cli::run(&app.ctx, Command::Errors { action: ErrorsCommand::Clear }).await.unwrap();
    assert_eq!(cleared["cleared"], 0);

    let report = cli::run(&app.ctx, Command::Diagnose).await.unwrap();
    assert!(report["storageInfo"]["keyCount"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_cli_run_propagates_command_errors() {
    let app = create_test_app();

    let result = cli::run(&app.ctx, Command::ClockOut { note: None }).await;

    assert!(matches!(result, Err(HoursGuardError::InvalidInput(_))));
}
