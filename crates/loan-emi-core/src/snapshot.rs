//! Saved-calculation history over an injected key-value store.
//!
//! The surrounding UI persists past calculations in a flat key-value store
//! (browser localStorage, a JSON file, an in-memory map in tests). The engine
//! only sees the `SnapshotStore` port; everything lives under one fixed
//! namespace key with no schema versioning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{LoanInput, LoanResult};
use crate::EmiResult;

/// Namespace key under which the calculation history is stored.
pub const SNAPSHOT_NAMESPACE: &str = "emi.calculations";

/// Flat key-value storage port. Implementations are provided by the host:
/// `MemoryStore` here, a JSON file in the CLI, localStorage in a browser.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> EmiResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> EmiResult<()>;
}

/// One saved calculation: the inputs, what they produced, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub saved_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub input: LoanInput,
    pub result: LoanResult,
}

/// Read the saved history. A missing key is an empty history.
pub fn load_history(store: &impl SnapshotStore) -> EmiResult<Vec<SavedCalculation>> {
    match store.get(SNAPSHOT_NAMESPACE)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Append one calculation to the history and write it back.
pub fn append_history(
    store: &mut impl SnapshotStore,
    entry: SavedCalculation,
) -> EmiResult<()> {
    let mut history = load_history(store)?;
    history.push(entry);
    let raw = serde_json::to_string(&history)?;
    store.set(SNAPSHOT_NAMESPACE, &raw)
}

/// HashMap-backed store for tests and embedders without real persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> EmiResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EmiResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
