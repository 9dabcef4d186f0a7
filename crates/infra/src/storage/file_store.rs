//! JSON file backed key/value store
//!
//! The whole map is held in memory and rewritten on every mutation. Writes go
//! to a sibling temp file that is renamed over the target, so a crash never
//! leaves a half-written store behind.
//!
//! Usage is measured like browser storage: the sum of key and value lengths
//! in UTF-16 code units, the unit storage diagnostics report. A write that
//! would push usage past the quota is refused with a storage error and
//! leaves the store unchanged.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hoursguard_common::CommonError;
use hoursguard_core::errors::diagnostics::utf16_len;
use hoursguard_core::KeyValueStore;
use hoursguard_domain::{HoursGuardError, Result};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::errors::InfraError;

/// Persistent store serialized as a single JSON object
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    quota: u64,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store; the file is created on first write.
    ///
    /// # Errors
    /// Returns `HoursGuardError::Storage` if the file exists but cannot be
    /// read or does not hold a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>, quota: u64) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                HoursGuardError::Storage(format!(
                    "store file {} is unreadable: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(HoursGuardError::from(InfraError::from(e))),
        };

        info!(path = %path.display(), keys = entries.len(), "opened file store");
        Ok(Self { path, quota, entries: RwLock::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Quota in UTF-16 code units
    pub fn quota(&self) -> u64 {
        self.quota
    }

    /// UTF-16 code units currently used (key + value lengths)
    pub fn used_units(&self) -> u64 {
        usage(&self.entries.read())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }

        let serialized = serde_json::to_string(entries).map_err(InfraError::from)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized).map_err(InfraError::from)?;
        fs::rename(&tmp, &self.path).map_err(InfraError::from)?;

        debug!(path = %self.path.display(), keys = entries.len(), "store persisted");
        Ok(())
    }
}

fn usage(entries: &BTreeMap<String, String>) -> u64 {
    entries.iter().map(|(k, v)| utf16_len(k) + utf16_len(v)).sum()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();

        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        let needed = usage(&next);
        if needed > self.quota {
            return Err(CommonError::quota_exceeded(key, needed, self.quota).into());
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write();
        self.persist(&BTreeMap::new())?;
        entries.clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}
