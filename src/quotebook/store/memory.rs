use super::KeyValueStore;
use crate::error::{QuoteError, Result};
use std::cell::Cell;
use std::collections::HashMap;

/// In-memory store for tests and session-scoped keys.
///
/// Nothing survives the process, which is exactly what the session key
/// for the last shown quote wants.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
    simulate_write_error: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(QuoteError::Store("Simulated write error".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(QuoteError::Store("Simulated write error".to_string()));
        }
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_write_keeps_prior_value() {
        let mut store = InMemoryStore::new();
        store.set("quotes", "[1]").unwrap();

        store.set_simulate_write_error(true);
        assert!(store.set("quotes", "[2]").is_err());
        assert!(store.remove("quotes").is_err());

        store.set_simulate_write_error(false);
        assert_eq!(store.get("quotes").unwrap().as_deref(), Some("[1]"));
    }
}
