use super::Defaults;
use anyhow::Result;
use std::collections::HashMap;

/// In-process defaults store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDefaults {
    values: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Defaults for MemoryDefaults {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        self.writes += 1;
        Ok(())
    }
}
