use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Typed schema over every preference key the panel stores. Keys render in
/// one place so call sites never build format strings by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey<'a> {
    HistoryCount,
    HistoryItem(usize),
    SceneFavorite(&'a str),
}

impl PrefKey<'_> {
    pub fn render(&self) -> String {
        match self {
            PrefKey::HistoryCount => "screenshot_history:count".to_string(),
            PrefKey::HistoryItem(index) => format!("screenshot_history:item:{index}"),
            PrefKey::SceneFavorite(path) => format!("scene:favorite:[{path}]"),
        }
    }
}

/// Project-scoped key-value preference store, persisted as one JSON file.
/// Keys outlive the session; the store is loaded leniently (a missing or
/// unreadable file starts empty) and written only on an explicit `save`.
pub struct EditorPrefs {
    path: PathBuf,
    values: Map<String, Value>,
    saves: u64,
}

impl EditorPrefs {
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load_values(&path);
        Self { path, values, saves: 0 }
    }

    fn load_values(path: &Path) -> Map<String, Value> {
        if !path.exists() {
            return Map::new();
        }
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => {
                eprintln!("[prefs] failed to read {}: {err}", path.display());
                return Map::new();
            }
        };
        match serde_json::from_str::<Map<String, Value>>(&data) {
            Ok(values) => values,
            Err(err) => {
                eprintln!("[prefs] failed to parse {}: {err}", path.display());
                Map::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, key: &PrefKey) -> bool {
        self.values.contains_key(&key.render())
    }

    pub fn get_bool(&self, key: &PrefKey) -> Option<bool> {
        self.values.get(&key.render()).and_then(Value::as_bool)
    }

    pub fn set_bool(&mut self, key: &PrefKey, value: bool) {
        self.values.insert(key.render(), Value::Bool(value));
    }

    pub fn get_i64(&self, key: &PrefKey) -> Option<i64> {
        self.values.get(&key.render()).and_then(Value::as_i64)
    }

    pub fn set_i64(&mut self, key: &PrefKey, value: i64) {
        self.values.insert(key.render(), Value::from(value));
    }

    pub fn get_string(&self, key: &PrefKey) -> Option<&str> {
        self.values.get(&key.render()).and_then(Value::as_str)
    }

    pub fn set_string(&mut self, key: &PrefKey, value: impl Into<String>) {
        self.values.insert(key.render(), Value::String(value.into()));
    }

    pub fn remove(&mut self, key: &PrefKey) -> bool {
        self.values.remove(&key.render()).is_some()
    }

    /// Flush the store to disk. A write failure aborts the save and is
    /// surfaced to the caller; a partial write would corrupt the count/item
    /// invariant the history relies on.
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create prefs dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, format!("{json}\n"))
            .with_context(|| format!("Failed to write prefs file {}", self.path.display()))?;
        self.saves += 1;
        Ok(())
    }

    /// Number of successful disk writes since construction.
    pub fn save_count(&self) -> u64 {
        self.saves
    }
}
