//! Switchable key/value storage
//!
//! [`StorageHandle`] forwards to the primary store until the storage
//! fallback switches it to an in-memory substitute. The switch is one-way for
//! the life of the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hoursguard_domain::Result;
use tracing::{debug, warn};

use crate::errors::ports::KeyValueStore;

pub struct StorageHandle {
    primary: Arc<dyn KeyValueStore>,
    memory: Arc<dyn KeyValueStore>,
    memory_active: AtomicBool,
}

impl StorageHandle {
    pub fn new(primary: Arc<dyn KeyValueStore>, memory: Arc<dyn KeyValueStore>) -> Self {
        Self { primary, memory, memory_active: AtomicBool::new(false) }
    }

    /// Route all further operations to the in-memory substitute.
    ///
    /// Returns `true` only for the call that performed the switch.
    pub fn switch_to_memory(&self) -> bool {
        let switched = !self.memory_active.swap(true, Ordering::SeqCst);
        if switched {
            warn!("persistent storage unavailable, continuing in memory");
        }
        switched
    }

    pub fn is_memory_active(&self) -> bool {
        self.memory_active.load(Ordering::SeqCst)
    }

    fn active(&self) -> &dyn KeyValueStore {
        if self.is_memory_active() {
            self.memory.as_ref()
        } else {
            self.primary.as_ref()
        }
    }
}

impl KeyValueStore for StorageHandle {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.active().get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.active().set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.active().remove(key)
    }

    fn clear(&self) -> Result<()> {
        self.active().clear()
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.active().keys()
    }

    /// After the switch the primary store may still hold an older copy;
    /// it is removed too, best-effort.
    fn purge(&self, key: &str) -> Result<()> {
        self.active().remove(key)?;
        if self.is_memory_active() {
            if let Err(err) = self.primary.remove(key) {
                debug!(key, error = %err, "stale copy left on primary store");
            }
        }
        Ok(())
    }
}
