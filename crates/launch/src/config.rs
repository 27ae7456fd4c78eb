// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Two-layer key/value config store with dirty-tracking and atomic save.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::LaunchResult;

/// Known global keys. `version` is per-instance only and never read from the
/// global layer.
pub const KEY_JAVA_PATH: &str = "java.path";
pub const KEY_JAVA_MEMORY_MIN: &str = "java.memory.min";
pub const KEY_JAVA_MEMORY_MAX: &str = "java.memory.max";
pub const KEY_JAVA_JVMARGS: &str = "java.jvmargs";
pub const KEY_VERSION: &str = "version";

pub fn default_java_path() -> Value {
    Value::String("java".to_string())
}

/// `get(k)` returns the upper layer's value if present, else the lower
/// (defaults) layer. `set`/`delete` mutate the upper layer only and mark it
/// dirty; `save` is a no-op unless dirty.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverlay {
    upper: Map<String, Value>,
    lower: Map<String, Value>,
    dirty: bool,
}

impl ConfigOverlay {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_defaults(lower: Map<String, Value>) -> Self {
        Self {
            upper: Map::new(),
            lower,
            dirty: false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.upper.get(key).or_else(|| self.lower.get(key))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.upper.insert(key.to_string(), value);
        self.dirty = true;
    }

    pub fn delete(&mut self, key: &str) {
        if self.upper.remove(key).is_some() {
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Loads the upper layer from `path` if it exists (an absent file yields
    /// an empty upper layer, not an error), over the global config as the
    /// lower layer.
    pub async fn open_overlay(path: &Path, global: &ConfigOverlay) -> LaunchResult<Self> {
        let upper = match tokio::fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            upper,
            lower: global.flattened(),
            dirty: false,
        })
    }

    pub async fn open_global(path: &Path) -> LaunchResult<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Self {
                upper: serde_json::from_str(&content).unwrap_or_default(),
                lower: Map::new(),
                dirty: false,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::empty()),
            Err(e) => Err(e.into()),
        }
    }

    /// The upper layer merged over the lower one, used as the lower layer of
    /// a child overlay (instance config over global config).
    fn flattened(&self) -> Map<String, Value> {
        let mut merged = self.lower.clone();
        for (k, v) in &self.upper {
            merged.insert(k.clone(), v.clone());
        }
        merged
    }

    /// Serializes the upper layer to `path` atomically (temp file beside the
    /// destination, renamed into place), the same discipline
    /// [`picomc_core::HashedStore`] uses for content-addressed writes. No-op
    /// if the overlay isn't dirty.
    pub async fn save(&mut self, path: &Path) -> LaunchResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(&self.upper)?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &body).await?;
        tokio::fs::rename(&tmp_path, path).await?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_falls_back_to_lower_layer() {
        let mut lower = Map::new();
        lower.insert(KEY_JAVA_PATH.to_string(), default_java_path());
        let overlay = ConfigOverlay::with_defaults(lower);
        assert_eq!(overlay.get_str(KEY_JAVA_PATH), Some("java"));
    }

    #[test]
    fn set_shadows_lower_layer_and_marks_dirty() {
        let mut lower = Map::new();
        lower.insert(KEY_JAVA_PATH.to_string(), default_java_path());
        let mut overlay = ConfigOverlay::with_defaults(lower);
        assert!(!overlay.is_dirty());
        overlay.set(KEY_JAVA_PATH, Value::String("/usr/bin/java".to_string()));
        assert_eq!(overlay.get_str(KEY_JAVA_PATH), Some("/usr/bin/java"));
        assert!(overlay.is_dirty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_upper_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut overlay = ConfigOverlay::empty();
        overlay.set(KEY_JAVA_MEMORY_MAX, Value::String("2G".to_string()));
        overlay.save(&path).await.unwrap();
        assert!(!overlay.is_dirty());

        let global = ConfigOverlay::empty();
        let reloaded = ConfigOverlay::open_overlay(&path, &global).await.unwrap();
        assert_eq!(reloaded.get_str(KEY_JAVA_MEMORY_MAX), Some("2G"));
    }

    #[tokio::test]
    async fn save_is_noop_when_not_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut overlay = ConfigOverlay::empty();
        overlay.save(&path).await.unwrap();
        assert!(!path.exists());
    }
}
