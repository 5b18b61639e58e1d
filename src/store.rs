//! Persisted filter state
//!
//! Control values are kept as one JSON object (control id -> bool or string)
//! under a single key of a key-value backend. Backend faults never reach the
//! caller: a store that cannot be read is treated as empty and a failed write
//! is dropped.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::controls::{self, ControlBar};
use crate::Result;

/// Minimal string key-value port, in the spirit of browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend persisting every key into one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Saves, restores and clears the control bar through a backend
#[derive(Debug, Clone)]
pub struct FilterStateStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> FilterStateStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Persist every control except the page limit
    pub fn save(&mut self, bar: &ControlBar) {
        let data: Map<String, Value> = bar
            .iter()
            .filter(|c| c.id() != controls::PAGE_LIMIT)
            .map(|c| {
                let value = if c.is_checkbox() {
                    Value::Bool(c.checked())
                } else {
                    Value::String(c.value().to_string())
                };
                (c.id().to_string(), value)
            })
            .collect();

        let result = serde_json::to_string(&data)
            .map_err(crate::Error::from)
            .and_then(|json| self.backend.set(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "failed to persist filters");
        }
    }

    /// Restore persisted values onto the bar, returning how many were applied.
    ///
    /// Unknown ids and the page limit are skipped; a missing or corrupt entry
    /// restores nothing.
    pub fn load(&self, bar: &mut ControlBar) -> usize {
        let data = match self.read() {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "ignoring unreadable filter state");
                return 0;
            }
        };

        let mut restored = 0;
        for (id, value) in data {
            if id == controls::PAGE_LIMIT {
                continue;
            }
            let Some(control) = bar.get_mut(&id) else {
                continue;
            };
            if control.is_checkbox() {
                control.set_checked(truthy(&value));
            } else {
                control.set_value(value_text(&value));
            }
            restored += 1;
        }
        restored
    }

    fn read(&self) -> Result<Map<String, Value>> {
        let Some(json) = self.backend.get(&self.key)? else {
            return Ok(Map::new());
        };
        match serde_json::from_str::<Value>(&json)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    /// Reset the bar to defaults and forget the persisted entry
    pub fn clear(&mut self, bar: &mut ControlBar) {
        bar.reset();
        if let Err(e) = self.backend.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to remove persisted filters");
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn store() -> FilterStateStore<MemoryStore> {
        FilterStateStore::new(MemoryStore::new(), "hdencodeFilters")
    }

    #[test]
    fn test_save_excludes_page_limit() {
        let mut store = store();
        let mut bar = ControlBar::new();
        bar.set_checked(controls::DOLBY_VISION, true);
        bar.set_value(controls::SEARCH, "remux");
        bar.set_value(controls::PAGE_LIMIT, "10");
        store.save(&bar);

        let json = store.backend().get("hdencodeFilters").unwrap().unwrap();
        let saved: Map<String, Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(saved["f-dv"], Value::Bool(true));
        assert_eq!(saved["f-search"], Value::String("remux".into()));
        assert_eq!(saved["f-hdr"], Value::Bool(false));
        assert!(!saved.contains_key("f-pagelimit"));
    }

    #[test]
    fn test_save_then_load_restores_values() {
        let mut store = store();
        let mut bar = ControlBar::new();
        bar.set_checked(controls::HDR, true);
        bar.set_value(controls::RESOLUTION, "2160p");
        bar.set_value(controls::MIN_RATING, "7.2");
        store.save(&bar);

        let mut fresh = ControlBar::new();
        let restored = store.load(&mut fresh);
        assert_eq!(restored, 9);
        assert!(fresh.checked(controls::HDR));
        assert_eq!(fresh.value(controls::RESOLUTION), "2160p");
        assert_eq!(fresh.value(controls::MIN_RATING), "7.2");
    }

    #[test]
    fn test_load_ignores_page_limit_and_unknown_ids() {
        let mut store = store();
        store
            .backend
            .set(
                "hdencodeFilters",
                r#"{"f-pagelimit":"5","f-bogus":"x","f-search":"dune","f-dv":1}"#,
            )
            .unwrap();

        let mut bar = ControlBar::new();
        assert_eq!(store.load(&mut bar), 2);
        assert_eq!(bar.value(controls::PAGE_LIMIT), "all");
        assert_eq!(bar.value(controls::SEARCH), "dune");
        assert!(bar.checked(controls::DOLBY_VISION));
    }

    #[test]
    fn test_load_tolerates_missing_and_corrupt_state() {
        let mut store = store();
        let mut bar = ControlBar::new();
        assert_eq!(store.load(&mut bar), 0);

        store.backend.set("hdencodeFilters", "{not json").unwrap();
        assert_eq!(store.load(&mut bar), 0);

        store.backend.set("hdencodeFilters", "[1,2,3]").unwrap();
        assert_eq!(store.load(&mut bar), 0);
    }

    #[test]
    fn test_clear_resets_and_removes() {
        let mut store = store();
        let mut bar = ControlBar::new();
        bar.set_value(controls::SEARCH, "x");
        bar.set_value(controls::PAGE_LIMIT, "20");
        store.save(&bar);

        store.clear(&mut bar);
        assert_eq!(bar.value(controls::SEARCH), "");
        assert_eq!(bar.value(controls::PAGE_LIMIT), "all");
        assert!(store.backend().get("hdencodeFilters").unwrap().is_none());

        let mut reloaded = ControlBar::new();
        assert_eq!(store.load(&mut reloaded), 0);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage(std::io::Error::other("denied")))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage(std::io::Error::other("denied")))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(Error::Storage(std::io::Error::other("denied")))
        }
    }

    #[test]
    fn test_backend_faults_are_swallowed() {
        let mut store = FilterStateStore::new(FailingStore, "k");
        let mut bar = ControlBar::new();
        bar.set_value(controls::SEARCH, "x");

        store.save(&bar);
        assert_eq!(store.load(&mut bar), 0);
        store.clear(&mut bar);
        assert_eq!(bar.value(controls::SEARCH), "");
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileStore::new(dir.path().join("nested").join("state.json"));

        assert_eq!(backend.get("a").unwrap(), None);
        backend.set("a", "1").unwrap();
        backend.set("b", "2").unwrap();
        assert_eq!(backend.get("a").unwrap(), Some("1".into()));

        backend.remove("a").unwrap();
        assert_eq!(backend.get("a").unwrap(), None);
        assert_eq!(backend.get("b").unwrap(), Some("2".into()));
    }

    #[test]
    fn test_json_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "garbage").unwrap();

        let backend = JsonFileStore::new(&path);
        assert!(backend.get("a").is_err());

        let filters = FilterStateStore::new(backend, "a");
        assert_eq!(filters.load(&mut ControlBar::new()), 0);
    }
}
