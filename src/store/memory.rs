//! In-memory store for tests and embedding.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::store::ConfigStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn remove_all(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}
