use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

use loan_emi_core::snapshot::SnapshotStore;
use loan_emi_core::{EmiError, EmiResult};

/// Flat key-value store backed by a single JSON object file. Stands in for
/// the browser's localStorage when running from the command line.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> EmiResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| EmiError::StorageError(format!("{}: {}", self.path.display(), e)))?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(EmiError::StorageError(format!(
                "{}: expected a JSON object at the top level",
                self.path.display()
            ))),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn get(&self, key: &str) -> EmiResult<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(String::from))
    }

    fn set(&mut self, key: &str, value: &str) -> EmiResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        let serialized = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, serialized)
            .map_err(|e| EmiError::StorageError(format!("{}: {}", self.path.display(), e)))
    }
}
