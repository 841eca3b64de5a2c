//! Named configuration snapshots stored in a JSON file.
//!
//! The file is one JSON object mapping preset names to config records:
//!
//! ```json
//! { "big-sunflower": { "numDots": 610, "spacing": 1.5, "patternType": "sunflower" } }
//! ```
//!
//! Records are kept as raw JSON until they are asked for, so one broken or
//! newer-format preset never stops the rest of the store from loading or
//! being saved back intact.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Config, ConfigRecord};
use crate::error::{Error, Result};

/// Default preset file name.
pub const DEFAULT_STORE: &str = "sunflower-presets.json";

/// A preset file, loaded into memory.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
    presets: BTreeMap<String, Value>,
}

impl PresetStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A file that isn't a JSON object is
    /// also treated as empty (with a warning); the next [`save`](Self::save)
    /// replaces it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let presets = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
                Ok(presets) => presets,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable preset store, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::Io(e)),
        };

        debug!(path = %path.display(), count = presets.len(), "opened preset store");
        Ok(Self { path, presets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store back to its file.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.presets)?;
        fs::write(&self.path, json + "\n")?;
        debug!(path = %self.path.display(), count = self.presets.len(), "saved preset store");
        Ok(())
    }

    /// Store `config` under `name`, replacing any existing preset.
    pub fn insert(&mut self, name: &str, config: &Config) -> Result<()> {
        let key = name.trim();
        if key.is_empty() {
            return Err(Error::InvalidPresetName(name.to_string()));
        }
        let record = serde_json::to_value(ConfigRecord::from(config.clone()))?;
        self.presets.insert(key.to_string(), record);
        Ok(())
    }

    /// Decode the preset called `name`, filling missing fields with defaults.
    pub fn get(&self, name: &str) -> Result<Config> {
        let value = self
            .presets
            .get(name.trim())
            .ok_or_else(|| Error::PresetNotFound(name.to_string()))?;
        let record: ConfigRecord = serde_json::from_value(value.clone())?;
        Config::from_record(record)
    }

    /// Delete a preset. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.presets.remove(name.trim()).is_some()
    }

    /// Preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HoleSizeMode, PatternType};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PathBuf {
        dir.path().join("presets.json")
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = PresetStore::open(store_in(&dir)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);

        let mut store = PresetStore::open(&path).unwrap();
        let config = Config {
            pattern: PatternType::ShapeRectangle,
            dot_count: 144,
            ..Config::default()
        };
        store.insert("grid", &config).unwrap();
        store.insert("  default ", &Config::default()).unwrap();
        store.save().unwrap();

        let store = PresetStore::open(&path).unwrap();
        assert_eq!(store.names(), vec!["default", "grid"]);
        let loaded = store.get("grid").unwrap();
        assert_eq!(loaded.pattern, PatternType::ShapeRectangle);
        assert_eq!(loaded.dot_count, 144);
    }

    #[test]
    fn blank_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = PresetStore::open(store_in(&dir)).unwrap();
        assert!(matches!(
            store.insert("   ", &Config::default()),
            Err(Error::InvalidPresetName(_))
        ));
    }

    #[test]
    fn remove_and_missing() {
        let dir = TempDir::new().unwrap();
        let mut store = PresetStore::open(store_in(&dir)).unwrap();
        store.insert("a", &Config::default()).unwrap();
        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert!(matches!(store.get("a"), Err(Error::PresetNotFound(_))));
    }

    #[test]
    fn old_records_fill_defaults() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        fs::write(
            &path,
            r#"{"old": {"numDots": 21, "shapeMargin": 4, "shapeFibSizes": false}}"#,
        )
        .unwrap();

        let config = PresetStore::open(&path).unwrap().get("old").unwrap();
        assert_eq!(config.dot_count, 21);
        assert_eq!(config.edge_margin_mm, 4.0);
        assert_eq!(config.hole_size_mode, HoleSizeMode::Uniform);
        assert_eq!(config.fib_ccw, 34);
    }

    #[test]
    fn garbage_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        fs::write(&path, "not json").unwrap();
        assert!(PresetStore::open(&path).unwrap().is_empty());
    }

    #[test]
    fn one_bad_record_keeps_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        fs::write(
            &path,
            r#"{"bad": {"patternType": "hexagon"}, "good": {"numDots": 8}}"#,
        )
        .unwrap();

        let mut store = PresetStore::open(&path).unwrap();
        assert!(matches!(store.get("bad"), Err(Error::UnknownPattern(_))));
        assert_eq!(store.get("good").unwrap().dot_count, 8);

        store.insert("new", &Config::default()).unwrap();
        store.save().unwrap();
        let reopened = PresetStore::open(&path).unwrap();
        assert_eq!(reopened.names(), vec!["bad", "good", "new"]);
    }
}
