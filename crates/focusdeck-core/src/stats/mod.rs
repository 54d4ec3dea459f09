mod ledger;

pub use ledger::{StatsLedger, StatsRecord, StatsStore, STATS_KEY};

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StoreError;

/// In-memory store, for tests and embedders that don't need a database.
#[derive(Debug, Default)]
pub struct MemStore {
    map: RefCell<HashMap<String, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
