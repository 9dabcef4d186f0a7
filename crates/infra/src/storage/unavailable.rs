//! Stand-in for a persistent store that could not be opened

use hoursguard_common::CommonError;
use hoursguard_core::KeyValueStore;
use hoursguard_domain::Result;

/// Store whose every operation fails with the reason it is unavailable
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(CommonError::storage_unavailable(self.reason.as_str()).into())
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        self.fail()
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        self.fail()
    }

    fn remove(&self, _key: &str) -> Result<()> {
        self.fail()
    }

    fn clear(&self) -> Result<()> {
        self.fail()
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use hoursguard_domain::HoursGuardError;

    use super::*;

    #[test]
    fn every_operation_is_a_storage_failure() {
        let store = UnavailableStore::new("disk missing");
        assert!(matches!(store.get("k"), Err(HoursGuardError::Storage(_))));
        assert!(matches!(store.set("k", "v"), Err(HoursGuardError::Storage(_))));
        assert!(store.keys().unwrap_err().to_string().contains("disk missing"));
    }
}
