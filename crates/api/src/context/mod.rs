//! Application context - dependency injection container

use std::path::Path;
use std::sync::Arc;

use hoursguard_common::{Clock, SystemClock};
use hoursguard_core::{ErrorHandler, ErrorHandlerPorts, HoursService, KeyValueStore, StorageHandle};
use hoursguard_domain::{Config, HoursGuardError, Result};
use hoursguard_infra::{
    Catalog, DirectoryDownloader, FileStore, HostProbe, MemoryStore, ToastNotifier,
    UnavailableStore,
};
use tracing::{info, warn};

/// Application context - holds all services and dependencies
///
/// Built once at startup; the [`ErrorHandler`] it owns is the only one in
/// the process and is shared by reference with everything that reports
/// failures.
pub struct AppContext {
    pub config: Config,
    pub handler: Arc<ErrorHandler>,
    pub hours: Arc<HoursService>,
    pub notifier: Arc<ToastNotifier>,
}

impl AppContext {
    /// Wire the application against the system clock
    ///
    /// # Errors
    /// Returns `HoursGuardError::Config` if the tracking offset is invalid.
    /// An unreadable store file is not an error: the failure is routed
    /// through the handler and the process runs on in-memory storage.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Wire the application against an explicit clock
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let (primary, open_error) = open_primary_store(&config);
        let storage = Arc::new(StorageHandle::new(primary, Arc::new(MemoryStore::new())));
        let notifier = Arc::new(ToastNotifier::new(config.notifier.clone()));

        let storage_dir = Path::new(&config.storage.path).parent().unwrap_or(Path::new("."));
        let probe = HostProbe::new(
            config.environment.user_agent.clone(),
            config.locale.clone(),
            storage_dir,
            &config.diagnostics,
        );

        let ports = ErrorHandlerPorts {
            storage,
            notifier: notifier.clone(),
            localizer: Arc::new(Catalog::new(&config.locale)),
            downloader: Arc::new(DirectoryDownloader::new(&config.storage.download_dir)),
            probe: Arc::new(probe),
            clock: Arc::clone(&clock),
        };
        let handler = Arc::new(ErrorHandler::new(ports, &config));

        let restored = handler.restore_error_log();
        if let Some(err) = open_error {
            handler.handle_error(&err, "storage");
        }

        let hours = Arc::new(HoursService::new(Arc::clone(&handler), clock, &config.tracking)?);

        info!(
            storage = %config.storage.path,
            locale = %config.locale,
            restored_errors = restored,
            "application context ready"
        );

        Ok(Self { config, handler, hours, notifier })
    }

    /// Stop background work; pending toasts are dropped
    pub fn shutdown(&self) {
        self.notifier.shutdown();
        info!("application context shut down");
    }
}

fn open_primary_store(config: &Config) -> (Arc<dyn KeyValueStore>, Option<HoursGuardError>) {
    match FileStore::open(&config.storage.path, config.storage.quota_bytes) {
        Ok(store) => (Arc::new(store), None),
        Err(err) => {
            warn!(path = %config.storage.path, error = %err, "persistent store unavailable");
            (Arc::new(UnavailableStore::new(err.to_string())), Some(err))
        }
    }
}
