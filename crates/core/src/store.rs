//! Session-scoped key-value store abstraction and implementations.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const STORE_SCHEMA_VERSION: u32 = 1;

/// Store operation failure. Callers in the gate treat any store error as a
/// fail-closed denial rather than propagating it.
#[derive(Debug, Clone, Error)]
#[error("session store: {0}")]
pub struct StoreError(pub String);

/// String-key/JSON-value store scoped to one browser session.
///
/// Mirrors the extension's session storage surface: get, set, and bulk
/// remove. Implementations must be safe to share across tasks; the gate
/// serializes per-key read-modify-write sequences itself.
pub trait SessionStore: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
	fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
	fn remove(&self, keys: &[&str]) -> Result<(), StoreError>;
}

/// In-process store, cleared when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl SessionStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
		Ok(self.entries.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
		self.entries.write().insert(key.to_string(), value);
		Ok(())
	}

	fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
		let mut entries = self.entries.write();
		for key in keys {
			entries.remove(*key);
		}
		Ok(())
	}
}

/// On-disk format for a file-backed store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
	schema: u32,
	#[serde(default)]
	entries: HashMap<String, Value>,
}

impl Default for StoreFile {
	fn default() -> Self {
		Self {
			schema: STORE_SCHEMA_VERSION,
			entries: HashMap::new(),
		}
	}
}

/// JSON-file-backed store for state that must survive a process restart.
///
/// The file is the single source of truth: it is read once at open and
/// rewritten on every mutation, so the in-memory map is only a write-through
/// cache. Unreadable or malformed files load as empty rather than failing.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	file: Mutex<StoreFile>,
}

impl FileStore {
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let file = fs::read_to_string(&path)
			.ok()
			.and_then(|content| serde_json::from_str(&content).ok())
			.unwrap_or_default();
		Self {
			path,
			file: Mutex::new(file),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// All keys currently present, for operator inspection.
	pub fn keys(&self) -> Vec<String> {
		let mut keys: Vec<String> = self.file.lock().entries.keys().cloned().collect();
		keys.sort();
		keys
	}

	fn persist(&self, file: &StoreFile) -> Result<(), StoreError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).map_err(|err| StoreError(err.to_string()))?;
		}
		let json = serde_json::to_string_pretty(file).map_err(|err| StoreError(err.to_string()))?;
		fs::write(&self.path, json).map_err(|err| StoreError(err.to_string()))?;
		debug!(target = "aas.store", path = %self.path.display(), "store persisted");
		Ok(())
	}
}

impl SessionStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
		Ok(self.file.lock().entries.get(key).cloned())
	}

	fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
		let mut file = self.file.lock();
		file.entries.insert(key.to_string(), value);
		self.persist(&file)
	}

	fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
		let mut file = self.file.lock();
		let mut changed = false;
		for key in keys {
			changed |= file.entries.remove(*key).is_some();
		}
		if changed {
			self.persist(&file)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn memory_store_round_trip() {
		let store = MemoryStore::new();
		store.set("a", json!({"x": 1})).unwrap();
		assert_eq!(store.get("a").unwrap(), Some(json!({"x": 1})));
		store.remove(&["a", "missing"]).unwrap();
		assert_eq!(store.get("a").unwrap(), None);
	}

	#[test]
	fn file_store_survives_reopen() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested/gate.json");

		let store = FileStore::open(&path);
		store.set("nav_history_1_copart.com", json!({"blocked": true})).unwrap();

		let reopened = FileStore::open(&path);
		assert_eq!(
			reopened.get("nav_history_1_copart.com").unwrap(),
			Some(json!({"blocked": true}))
		);
		assert_eq!(reopened.keys(), vec!["nav_history_1_copart.com".to_string()]);
	}

	#[test]
	fn file_store_tolerates_garbage_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("gate.json");
		fs::write(&path, "not json at all").unwrap();

		let store = FileStore::open(&path);
		assert_eq!(store.get("anything").unwrap(), None);
	}

	#[test]
	fn file_store_remove_missing_is_noop() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::open(dir.path().join("gate.json"));
		store.remove(&["missing"]).unwrap();
		assert!(store.keys().is_empty());
	}
}
