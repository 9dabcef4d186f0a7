//! Shared helpers for `hoursguard-app` integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use hoursguard_common::MockClock;
use hoursguard_domain::Config;
use hoursguard_lib::AppContext;
use tempfile::TempDir;

/// Context backed by a temporary directory, plus the handles tests poke at.
///
/// The directory lives as long as the fixture.
pub struct TestApp {
    pub ctx: AppContext,
    pub clock: MockClock,
    pub dir: TempDir,
}

impl TestApp {
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.dir.path().join("exports")
    }
}

/// Config pointing storage and downloads into `dir`
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config { locale: "en".to_string(), ..Config::default() };
    config.storage.path = dir.path().join("store.json").to_string_lossy().to_string();
    config.storage.download_dir = dir.path().join("exports").to_string_lossy().to_string();
    config
}

/// 2026-03-02 09:00 at the default UTC+8 offset
pub fn start_clock() -> MockClock {
    MockClock::at(Utc.with_ymd_and_hms(2026, 3, 2, 1, 0, 0).unwrap())
}

pub fn create_test_app() -> TestApp {
    let dir = TempDir::new().expect("failed to create temporary test directory");
    create_test_app_in(dir, |_| {})
}

/// Build an app in `dir`, letting the caller adjust the config first
pub fn create_test_app_in(dir: TempDir, adjust: impl FnOnce(&mut Config)) -> TestApp {
    let mut config = test_config(&dir);
    adjust(&mut config);
    let clock = start_clock();
    let ctx = AppContext::with_clock(config, Arc::new(clock.clone()))
        .expect("AppContext creation should succeed");
    TestApp { ctx, clock, dir }
}
