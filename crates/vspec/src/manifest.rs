//! Upstream version manifest fetch/cache and metaversion resolution
//!.

use std::path::PathBuf;

use picomc_core::HTTP_CLIENT;
use serde::Deserialize;

use crate::error::VspecResult;

pub const VERSION_MANIFEST_URL: &str = "https://launchermeta.mojang.com/mc/game/version_manifest.json";

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct VersionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionManifest {
    pub latest: Latest,
    pub versions: Vec<VersionEntry>,
}

impl VersionManifest {
    pub fn find(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Resolve a metaversion alias (`"latest"`/`"snapshot"`) or pass through
    /// an already-concrete id unchanged.
    pub fn resolve_metaversion<'a>(&'a self, id: &'a str) -> &'a str {
        match id {
            "latest" => &self.latest.release,
            "snapshot" => &self.latest.snapshot,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMask {
    pub release: bool,
    pub snapshot: bool,
    pub alpha: bool,
    pub beta: bool,
}

impl TypeMask {
    pub fn all() -> Self {
        Self {
            release: true,
            snapshot: true,
            alpha: true,
            beta: true,
        }
    }

    fn matches(&self, kind: &str) -> bool {
        match kind {
            "release" => self.release,
            "snapshot" => self.snapshot,
            "old_alpha" => self.alpha,
            "old_beta" => self.beta,
            _ => false,
        }
    }
}

/// Fetches/caches the upstream manifest, falling back to the on-disk copy
/// on network failure, and answers `version {list}`/metaversion queries.
pub struct VersionManager {
    versions_root: PathBuf,
}

impl VersionManager {
    pub fn new(versions_root: impl Into<PathBuf>) -> Self {
        Self {
            versions_root: versions_root.into(),
        }
    }

    fn manifest_path(&self) -> PathBuf {
        self.versions_root.join("manifest.json")
    }

    /// Fetch the manifest, caching it to disk on success and falling back to
    /// the cached copy if the network request fails and a cache exists.
    pub async fn fetch(&self) -> VspecResult<VersionManifest> {
        match self.fetch_live().await {
            Ok(manifest) => {
                let path = self.manifest_path();
                if let Some(parent) = path.parent() {
                    let _ = tokio::fs::create_dir_all(parent).await;
                }
                if let Ok(body) = serde_json::to_vec_pretty(&ManifestWire::from(&manifest)) {
                    let _ = tokio::fs::write(&path, body).await;
                }
                Ok(manifest)
            }
            Err(network_error) => self.load_cached().await.ok_or(network_error),
        }
    }

    async fn fetch_live(&self) -> VspecResult<VersionManifest> {
        let manifest = HTTP_CLIENT
            .get(VERSION_MANIFEST_URL)
            .send()
            .await?
            .json::<VersionManifest>()
            .await?;
        Ok(manifest)
    }

    async fn load_cached(&self) -> Option<VersionManifest> {
        let content = tokio::fs::read_to_string(self.manifest_path()).await.ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Version ids filtered by `mask`, augmented with locally installed
    /// (custom) profile ids not present upstream when `include_local` is set.
    pub async fn list(
        &self,
        manifest: &VersionManifest,
        mask: TypeMask,
        include_local: bool,
    ) -> Vec<String> {
        let mut ids: Vec<String> = manifest
            .versions
            .iter()
            .filter(|v| mask.matches(&v.kind))
            .map(|v| v.id.clone())
            .collect();

        if include_local {
            if let Ok(mut entries) = tokio::fs::read_dir(&self.versions_root).await {
                while let Ok(Some(entry)) = entries.next_entry().await {
                    if let Ok(file_type) = entry.file_type().await {
                        if file_type.is_dir() {
                            let name = entry.file_name().to_string_lossy().to_string();
                            if !ids.contains(&name) {
                                ids.push(name);
                            }
                        }
                    }
                }
            }
        }
        ids
    }
}

/// Serialization helper so the cached manifest round-trips through the same
/// shape it was deserialized from.
#[derive(serde::Serialize)]
struct ManifestWire<'a> {
    latest: &'a Latest,
    versions: &'a [VersionEntry],
}

impl<'a> From<&'a VersionManifest> for ManifestWire<'a> {
    fn from(m: &'a VersionManifest) -> Self {
        Self {
            latest: &m.latest,
            versions: &m.versions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VersionManifest {
        VersionManifest {
            latest: Latest {
                release: "1.20.4".into(),
                snapshot: "24w10a".into(),
            },
            versions: vec![
                VersionEntry {
                    id: "1.20.4".into(),
                    kind: "release".into(),
                    url: "https://example/1.20.4.json".into(),
                },
                VersionEntry {
                    id: "1.16.5".into(),
                    kind: "release".into(),
                    url: "https://example/1.16.5.json".into(),
                },
            ],
        }
    }

    #[test]
    fn resolves_latest_metaversion() {
        let m = sample();
        assert_eq!(m.resolve_metaversion("latest"), "1.20.4");
        assert_eq!(m.resolve_metaversion("snapshot"), "24w10a");
        assert_eq!(m.resolve_metaversion("1.16.5"), "1.16.5");
    }
}
