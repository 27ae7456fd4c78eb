//! Asset index fetch/verify and object materialization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use picomc_core::{calculate_file_sha1_sync, verify_file_sha1, DownloadItem, Downloader, DownloaderConfig, HTTP_CLIENT};

use crate::error::VspecResult;
use crate::raw::{RawAssetIndex, RawAssetIndexRef};

pub const ASSET_OBJECTS_BASE_URL: &str = "https://resources.download.minecraft.net";

#[derive(Debug, Clone)]
pub struct AssetObject {
    pub logical_name: String,
    pub hash: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct AssetIndex {
    pub id: String,
    pub objects: Vec<AssetObject>,
    pub is_virtual: bool,
    pub map_to_resources: bool,
}

/// Fetches/verifies the asset index JSON and enumerates/materializes its
/// objects against a content-addressed `assets/objects/<h2>/<hash>` tree.
pub struct AssetResolver {
    assets_root: PathBuf,
}

impl AssetResolver {
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
        }
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.assets_root.join("objects")
    }

    pub fn object_path(&self, hash: &str) -> PathBuf {
        self.objects_dir().join(&hash[..2]).join(hash)
    }

    /// Fetch-or-verify `assets/indexes/<id>.json` against its declared
    /// SHA-1, then parse and return the [`AssetIndex`].
    pub async fn fetch_index(&self, spec: &RawAssetIndexRef) -> VspecResult<AssetIndex> {
        let index_path = self.assets_root.join("indexes").join(format!("{}.json", spec.id));

        let needs_fetch = match verify_file_sha1(&index_path, &spec.sha1).await {
            Ok(true) => false,
            _ => true,
        };

        if needs_fetch {
            let body = HTTP_CLIENT.get(&spec.url).send().await?.bytes().await?;
            if let Some(parent) = index_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&index_path, &body).await?;
        }

        let content = tokio::fs::read_to_string(&index_path).await?;
        let raw: RawAssetIndex = serde_json::from_str(&content).map_err(|source| crate::error::VspecError::Malformed {
            id: spec.id.clone(),
            source,
        })?;

        let objects = raw
            .objects
            .into_iter()
            .map(|(logical_name, obj)| AssetObject {
                logical_name,
                hash: obj.hash,
                size: obj.size,
            })
            .collect();

        Ok(AssetIndex {
            id: spec.id.clone(),
            objects,
            is_virtual: raw.virtual_.unwrap_or(false),
            map_to_resources: raw.map_to_resources.unwrap_or(false),
        })
    }

    /// Enqueue every object not already present (or not verified, under
    /// `verify`) for download.
    pub async fn ensure_objects(&self, index: &AssetIndex, verify: bool) -> VspecResult<picomc_core::DownloadReport> {
        let mut items = Vec::new();
        for object in &index.objects {
            let path = self.object_path(&object.hash);
            let present = if verify {
                verify_file_sha1(&path, &object.hash).await.unwrap_or(false)
            } else {
                tokio::fs::try_exists(&path).await.unwrap_or(false)
            };
            if present {
                continue;
            }
            let url = format!("{}/{}/{}", ASSET_OBJECTS_BASE_URL, &object.hash[..2], object.hash);
            items.push(
                DownloadItem::new(url, path)
                    .with_sha1(object.hash.clone())
                    .with_size(object.size),
            );
        }
        let downloader = Downloader::new(DownloaderConfig::default());
        Ok(downloader.run(items).await)
    }

    /// Mirror objects under human-readable logical names for the launch
    /// presentation step. Idempotent: a destination that already matches
    /// size (and, on size collision, content) is left untouched, which is
    /// what makes repeated materialization byte-for-byte identical.
    pub async fn materialize(&self, index: &AssetIndex, destination_root: &Path) -> VspecResult<()> {
        for object in &index.objects {
            let src = self.object_path(&object.hash);
            let dest = destination_root.join(&object.logical_name);
            if let Some(parent) = dest.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            if already_materialized(&dest, object.size, &object.hash).await {
                continue;
            }
            tokio::fs::copy(&src, &dest).await?;
        }
        Ok(())
    }

    /// Dispatch to the right presentation mode (called
    /// from `picomc-launch`'s `LaunchComposer` before spawning the child).
    pub async fn present(&self, index: &AssetIndex, game_dir: &Path) -> VspecResult<Option<PathBuf>> {
        if index.is_virtual {
            let virtual_dir = self.assets_root.join("virtual").join(&index.id);
            self.materialize(index, &virtual_dir).await?;
            Ok(Some(virtual_dir))
        } else if index.map_to_resources {
            let resources_dir = game_dir.join("resources");
            self.materialize(index, &resources_dir).await?;
            Ok(None)
        } else {
            Ok(None)
        }
    }
}

async fn already_materialized(dest: &Path, expected_size: u64, expected_hash: &str) -> bool {
    let meta = match tokio::fs::metadata(dest).await {
        Ok(m) => m,
        Err(_) => return false,
    };
    if meta.len() != expected_size {
        return false;
    }
    calculate_file_sha1_sync(dest)
        .map(|h| h.eq_ignore_ascii_case(expected_hash))
        .unwrap_or(false)
}

/// Convenience grouping of an index's objects by logical name, used by
/// tests and by `picomc-launch` when it needs direct lookups.
pub fn index_by_name(index: &AssetIndex) -> HashMap<&str, &AssetObject> {
    index.objects.iter().map(|o| (o.logical_name.as_str(), o)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_fans_out_by_first_two_hex_chars() {
        let resolver = AssetResolver::new("/tmp/assets");
        let path = resolver.object_path("abcdef1234567890abcdef1234567890abcdef12");
        assert_eq!(
            path,
            PathBuf::from("/tmp/assets/objects/ab/abcdef1234567890abcdef1234567890abcdef12")
        );
    }
}
