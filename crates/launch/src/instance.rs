// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Per-instance directory CRUD and name sanitization.

use std::path::{Path, PathBuf};

use crate::config::ConfigOverlay;
use crate::error::{LaunchError, LaunchResult};

/// Strips a raw instance name down to a filesystem-safe one: trim
/// whitespace, collapse internal whitespace runs to `_`, then retain only
/// `[A-Za-z0-9_.-]` bytes. The retained charset cannot reconstruct a `..`
/// segment or a path separator, so sanitization doubles as traversal
/// protection and is idempotent by construction (boundary property 3).
pub fn sanitize(name: &str) -> String {
    let collapsed_whitespace = name.trim().split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = collapsed_whitespace
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    // A run of two or more dots collapses to one: the filter above keeps
    // single dots (legitimate in e.g. "Test.Pack"), but a literal ".."
    // substring would read as a parent-dir reference if the name were ever
    // joined onto a path, so no run survives.
    let mut out = String::with_capacity(filtered.len());
    let mut prev_dot = false;
    for c in filtered.chars() {
        if c == '.' {
            if prev_dot {
                continue;
            }
            prev_dot = true;
        } else {
            prev_dot = false;
        }
        out.push(c);
    }
    out
}

/// A named instance directory: `<instances_root>/<sanitized_name>/`, holding
/// `config.json` and the `minecraft/` game directory used as the JVM's CWD.
pub struct Instance {
    pub name: String,
    pub root: PathBuf,
}

impl Instance {
    pub fn game_dir(&self) -> PathBuf {
        self.root.join("minecraft")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// The instance's config as an overlay over the global config.
    pub async fn load_config(&self, global: &ConfigOverlay) -> LaunchResult<ConfigOverlay> {
        ConfigOverlay::open_overlay(&self.config_path(), global).await
    }
}

pub struct InstanceStore {
    instances_root: PathBuf,
}

impl InstanceStore {
    pub fn new(instances_root: impl Into<PathBuf>) -> Self {
        Self {
            instances_root: instances_root.into(),
        }
    }

    fn dir_for(&self, name: &str) -> PathBuf {
        self.instances_root.join(sanitize(name))
    }

    pub async fn exists(&self, name: &str) -> bool {
        tokio::fs::try_exists(self.dir_for(name)).await.unwrap_or(false)
    }

    /// Creates `<instances_root>/<sanitized_name>/` and writes an initial
    /// config carrying the `version` field.
    pub async fn create(&self, name: &str, version: &str) -> LaunchResult<Instance> {
        let sanitized = sanitize(name);
        if sanitized.is_empty() {
            return Err(LaunchError::InvalidInstanceName(name.to_string()));
        }
        let root = self.dir_for(name);
        if tokio::fs::try_exists(&root).await.unwrap_or(false) {
            return Err(LaunchError::InstanceAlreadyExists(sanitized));
        }
        tokio::fs::create_dir_all(root.join("minecraft")).await?;

        let mut config = ConfigOverlay::empty();
        config.set("version", serde_json::json!(version));
        config.save(&root.join("config.json")).await?;

        Ok(Instance { name: sanitized, root })
    }

    pub async fn get(&self, name: &str) -> LaunchResult<Instance> {
        let root = self.dir_for(name);
        if !tokio::fs::try_exists(&root).await.unwrap_or(false) {
            return Err(LaunchError::InstanceNotFound(name.to_string()));
        }
        Ok(Instance {
            name: sanitize(name),
            root,
        })
    }

    pub async fn list(&self) -> LaunchResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.instances_root).await {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub async fn delete(&self, name: &str) -> LaunchResult<()> {
        let root = self.dir_for(name);
        if !tokio::fs::try_exists(&root).await.unwrap_or(false) {
            return Err(LaunchError::InstanceNotFound(name.to_string()));
        }
        tokio::fs::remove_dir_all(&root).await?;
        Ok(())
    }

    /// Fails closed if the destination already exists.
    pub async fn rename(&self, old: &str, new: &str) -> LaunchResult<()> {
        let old_root = self.dir_for(old);
        if !tokio::fs::try_exists(&old_root).await.unwrap_or(false) {
            return Err(LaunchError::InstanceNotFound(old.to_string()));
        }
        let new_sanitized = sanitize(new);
        if new_sanitized.is_empty() {
            return Err(LaunchError::InvalidInstanceName(new.to_string()));
        }
        let new_root = self.dir_for(new);
        if tokio::fs::try_exists(&new_root).await.unwrap_or(false) {
            return Err(LaunchError::InstanceAlreadyExists(new_sanitized));
        }
        tokio::fs::rename(&old_root, &new_root).await?;
        Ok(())
    }
}

pub fn instances_root(app_root: &Path) -> PathBuf {
    app_root.join("instances")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_whitespace_and_disallowed_chars() {
        assert_eq!(sanitize("  my server!! "), "my_server");
        assert_eq!(sanitize("a/b\\c..d"), "abc.d");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize("  weird   Name$$ ");
        let twice = sanitize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn sanitize_never_contains_separators_or_dotdot() {
        let s = sanitize("../../etc/passwd");
        assert!(!s.contains('/'));
        assert!(!s.contains('\\'));
        assert!(!s.contains(".."));
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = InstanceStore::new(dir.path());
        store.create("My Pack", "1.20.4").await.unwrap();
        assert!(store.exists("My Pack").await);
        let instance = store.get("My_Pack").await.unwrap();
        assert!(instance.config_path().exists());
    }

    #[tokio::test]
    async fn rename_fails_if_target_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = InstanceStore::new(dir.path());
        store.create("a", "1.20.4").await.unwrap();
        store.create("b", "1.20.4").await.unwrap();
        let err = store.rename("a", "b").await.unwrap_err();
        assert!(matches!(err, LaunchError::InstanceAlreadyExists(_)));
    }
}
