//! Shared test helpers for `hoursguard-core` integration tests.
//!
//! Lightweight in-memory mocks for every port plus a [`Harness`] that wires
//! them into an [`ErrorHandler`], so tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use hoursguard_common::{Clock, MockClock};
use hoursguard_core::{
    EnvironmentProbe, ErrorHandler, ErrorHandlerPorts, FileDownloader, KeyValueStore, Localizer,
    Notifier, StorageHandle,
};
use hoursguard_domain::constants::{
    CAPABILITY_ASYNC_RUNTIME, CAPABILITY_NETWORK_REQUESTS, CAPABILITY_PERSISTENT_STORAGE,
    CAPABILITY_STRUCTURED_SERIALIZATION,
};
use hoursguard_domain::{
    Config, HoursGuardError, NetworkInfo, NotifySeverity, Result as DomainResult, SystemInfo,
};
use parking_lot::Mutex;

/// In-memory key/value store with switchable failure modes.
#[derive(Default)]
pub struct MockStore {
    entries: Mutex<BTreeMap<String, String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    fail_keys: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes fail like an exhausted browser quota.
    pub fn failing_writes() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_keys(&self, fail: bool) {
        self.fail_keys.store(fail, Ordering::SeqCst);
    }

    /// Seed a value, bypassing failure modes.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    /// Read a value, bypassing failure modes.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(HoursGuardError::Storage("storage read failed".into()));
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HoursGuardError::Storage("QuotaExceededError: quota exceeded".into()));
        }
        self.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> DomainResult<()> {
        self.entries.lock().clear();
        Ok(())
    }

    fn keys(&self) -> DomainResult<Vec<String>> {
        if self.fail_keys.load(Ordering::SeqCst) {
            return Err(HoursGuardError::Storage("keys unavailable".into()));
        }
        Ok(self.entries.lock().keys().cloned().collect())
    }
}

/// Notifier that records every message it is asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<(String, NotifySeverity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, NotifySeverity)> {
        self.shown.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.shown.lock().len()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, severity: NotifySeverity) {
        self.shown.lock().push((message.to_string(), severity));
    }
}

/// Localizer with English retry templates; everything else echoes the key.
#[derive(Default)]
pub struct TemplateLocalizer;

impl Localizer for TemplateLocalizer {
    fn translate(&self, key: &str) -> String {
        match key {
            "retry.succeeded" => "Succeeded after {attempts} attempts".to_string(),
            "retry.exhausted" => "Failed after {attempts} attempts".to_string(),
            other => other.to_string(),
        }
    }
}

/// Downloader that keeps (filename, mime, content) triples.
#[derive(Default)]
pub struct RecordingDownloader {
    files: Mutex<Vec<(String, String, String)>>,
    fail: AtomicBool,
}

impl RecordingDownloader {
    pub fn files(&self) -> Vec<(String, String, String)> {
        self.files.lock().clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl FileDownloader for RecordingDownloader {
    fn download(&self, filename: &str, mime: &str, content: &str) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(HoursGuardError::Storage("download directory unavailable".into()));
        }
        self.files.lock().push((filename.to_string(), mime.to_string(), content.to_string()));
        Ok(())
    }
}

/// Probe reporting a fixed environment.
pub struct StaticProbe {
    capabilities: BTreeMap<String, bool>,
}

impl Default for StaticProbe {
    fn default() -> Self {
        let capabilities = [
            CAPABILITY_PERSISTENT_STORAGE,
            CAPABILITY_STRUCTURED_SERIALIZATION,
            CAPABILITY_ASYNC_RUNTIME,
            CAPABILITY_NETWORK_REQUESTS,
        ]
        .into_iter()
        .map(|name| (name.to_string(), true))
        .collect();
        Self { capabilities }
    }
}

impl StaticProbe {
    pub fn without(mut self, capability: &str) -> Self {
        self.capabilities.insert(capability.to_string(), false);
        self
    }
}

#[async_trait]
impl EnvironmentProbe for StaticProbe {
    fn system_info(&self) -> SystemInfo {
        SystemInfo {
            os: "linux".into(),
            arch: "x86_64".into(),
            family: "unix".into(),
            cpu_count: 4,
            user_agent: "hoursguard/test".into(),
            locale: "en-US".into(),
            capabilities: BTreeMap::new(),
        }
    }

    async fn network_info(&self) -> NetworkInfo {
        NetworkInfo::default()
    }

    fn capabilities(&self) -> BTreeMap<String, bool> {
        self.capabilities.clone()
    }
}

/// Fixed start time used by every harness.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 1, 0, 0).unwrap()
}

/// An [`ErrorHandler`] wired to mocks that stay reachable from the test.
pub struct Harness {
    pub handler: Arc<ErrorHandler>,
    pub primary: Arc<MockStore>,
    pub memory: Arc<MockStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub downloader: Arc<RecordingDownloader>,
    pub clock: MockClock,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(MockStore::new(), StaticProbe::default(), Config::default())
    }

    pub fn with(primary: MockStore, probe: StaticProbe, config: Config) -> Self {
        Self::on_primary(Arc::new(primary), probe, config)
    }

    /// Handler over an existing primary store, as after a restart.
    pub fn on_primary(primary: Arc<MockStore>, probe: StaticProbe, config: Config) -> Self {
        let memory = Arc::new(MockStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let downloader = Arc::new(RecordingDownloader::default());
        let clock = MockClock::at(start_time());

        let storage = Arc::new(StorageHandle::new(
            Arc::clone(&primary) as Arc<dyn KeyValueStore>,
            Arc::clone(&memory) as Arc<dyn KeyValueStore>,
        ));
        let ports = ErrorHandlerPorts {
            storage,
            notifier: Arc::clone(&notifier) as Arc<dyn Notifier>,
            localizer: Arc::new(TemplateLocalizer),
            downloader: Arc::clone(&downloader) as Arc<dyn FileDownloader>,
            probe: Arc::new(probe),
            clock: Arc::new(clock.clone()),
        };

        Self {
            handler: Arc::new(ErrorHandler::new(ports, &config)),
            primary,
            memory,
            notifier,
            downloader,
            clock,
        }
    }

    pub fn clock_handle(&self) -> Arc<dyn Clock> {
        Arc::new(self.clock.clone())
    }
}
