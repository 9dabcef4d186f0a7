//! Host environment probe
//!
//! Reports static host facts, checks the capabilities the application
//! depends on and optionally measures TCP connectivity to a configured
//! `host:port` target.

use std::collections::BTreeMap;
use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use hoursguard_common::duration_ms;
use hoursguard_core::EnvironmentProbe;
use hoursguard_domain::constants::{
    CAPABILITY_ASYNC_RUNTIME, CAPABILITY_NETWORK_REQUESTS, CAPABILITY_PERSISTENT_STORAGE,
    CAPABILITY_STRUCTURED_SERIALIZATION,
};
use hoursguard_domain::{DiagnosticsConfig, NetworkInfo, SystemInfo};
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::time::{timeout, Instant};
use tracing::debug;

/// Probe of the machine the process runs on
#[derive(Debug, Clone)]
pub struct HostProbe {
    user_agent: String,
    locale: String,
    storage_dir: PathBuf,
    probe_target: Option<String>,
    probe_timeout: Duration,
}

impl HostProbe {
    /// `storage_dir` is the directory holding the persistent store; it is
    /// checked for writability.
    pub fn new(
        user_agent: impl Into<String>,
        locale: impl Into<String>,
        storage_dir: impl Into<PathBuf>,
        config: &DiagnosticsConfig,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            locale: locale.into(),
            storage_dir: storage_dir.into(),
            probe_target: config.network_probe.clone(),
            probe_timeout: Duration::from_millis(config.network_probe_timeout_ms),
        }
    }

    fn storage_writable(&self) -> bool {
        let dir = if self.storage_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            self.storage_dir.clone()
        };

        match fs::metadata(&dir) {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            // created on first write if the parent allows it
            Err(_) => dir
                .parent()
                .and_then(|parent| fs::metadata(parent).ok())
                .is_some_and(|meta| !meta.permissions().readonly()),
        }
    }
}

fn serialization_works() -> bool {
    let probe = serde_json::json!({ "probe": [1, 2, 3] });
    serde_json::to_string(&probe)
        .ok()
        .and_then(|text| serde_json::from_str::<serde_json::Value>(&text).ok())
        .is_some_and(|value| value == probe)
}

fn sockets_available() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[async_trait]
impl EnvironmentProbe for HostProbe {
    fn system_info(&self) -> SystemInfo {
        SystemInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            family: std::env::consts::FAMILY.to_string(),
            cpu_count: std::thread::available_parallelism().map_or(1, usize::from),
            user_agent: self.user_agent.clone(),
            locale: self.locale.clone(),
            capabilities: BTreeMap::new(),
        }
    }

    async fn network_info(&self) -> NetworkInfo {
        let Some(target) = self.probe_target.clone() else {
            return NetworkInfo::default();
        };

        let started = Instant::now();
        let online = match timeout(self.probe_timeout, TcpStream::connect(target.as_str())).await
        {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                debug!(target = %target, error = %err, "network probe failed");
                false
            }
            Err(_) => {
                debug!(target = %target, "network probe timed out");
                false
            }
        };

        NetworkInfo {
            online: Some(online),
            latency_ms: online.then(|| duration_ms(started.elapsed())),
            probe_target: Some(target),
        }
    }

    fn capabilities(&self) -> BTreeMap<String, bool> {
        BTreeMap::from([
            (CAPABILITY_PERSISTENT_STORAGE.to_string(), self.storage_writable()),
            (CAPABILITY_STRUCTURED_SERIALIZATION.to_string(), serialization_works()),
            (CAPABILITY_ASYNC_RUNTIME.to_string(), Handle::try_current().is_ok()),
            (CAPABILITY_NETWORK_REQUESTS.to_string(), sockets_available()),
        ])
    }
}
