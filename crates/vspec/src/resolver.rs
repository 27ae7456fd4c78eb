//! Inheritance-chain resolution over `RawVspec` nodes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use picomc_core::HTTP_CLIENT;

use crate::error::{VspecError, VspecResult};
use crate::manifest::VersionManifest;
use crate::raw::{RawArgumentElement, RawArguments, RawAssetIndexRef, RawDownloadEntry, RawDownloads, RawLibrary, RawVspec};

/// Well-known legacy asset index, injected when a vspec names
/// `assets == "legacy"` (or omits `assets` altogether) without an explicit
/// `assetIndex` block.
pub fn legacy_asset_index() -> RawAssetIndexRef {
    RawAssetIndexRef {
        id: "legacy".to_string(),
        url: "https://launchermeta.mojang.com/v1/packages/770388a9e6d5346f4a1f96c8101f4bba3f5d1a2/legacy.json"
            .to_string(),
        sha1: "770388a9e6d5346f4a1f96c8101f4bba3f5d1a2".to_string(),
        size: 0,
        total_size: None,
    }
}

/// The merged view over an inheritance chain.
/// `chain` is root-first (the chain's ancestor-most node
/// first, the leaf last) and is kept around so downstream resolvers (client
/// jar fallback, `downloads` inheritance) can walk it.
#[derive(Debug, Clone)]
pub struct ResolvedVspec {
    pub id: String,
    pub chain: Vec<RawVspec>,
    pub main_class: String,
    pub jar: String,
    pub asset_index: RawAssetIndexRef,
    pub assets: String,
    pub libraries: Vec<RawLibrary>,
    pub downloads: RawDownloads,
    pub minecraft_arguments: Option<String>,
    pub arguments: Option<RawArguments>,
}

impl ResolvedVspec {
    /// The nearest ancestor (leaf included) that declares a
    /// `downloads.client` entry: a loader profile that omits
    /// `downloads.client` still verifies the jar against whichever ancestor
    /// in the chain declared it.
    pub fn client_download(&self) -> Option<&RawDownloadEntry> {
        self.chain
            .iter()
            .rev()
            .find_map(|node| node.downloads.as_ref().and_then(|d| d.client.as_ref()))
    }
}

/// Fetches and caches raw vspec JSON nodes, walks `inheritsFrom` chains, and
/// merges them per field-specific policy.
pub struct VspecResolver {
    versions_root: PathBuf,
}

impl VspecResolver {
    pub fn new(versions_root: impl Into<PathBuf>) -> Self {
        Self {
            versions_root: versions_root.into(),
        }
    }

    /// Resolve the full inheritance chain for `id`, fetching/validating each
    /// node's raw JSON against `manifest` (when the id is a known upstream
    /// version) and merging the chain into a [`ResolvedVspec`].
    pub async fn resolve(&self, id: &str, manifest: Option<&VersionManifest>) -> VspecResult<ResolvedVspec> {
        let chain = self.build_chain(id, manifest).await?;
        Ok(self.merge(id, chain))
    }

    async fn build_chain(&self, id: &str, manifest: Option<&VersionManifest>) -> VspecResult<Vec<RawVspec>> {
        let mut visited = HashSet::new();
        let mut ordered_leaf_first = Vec::new();
        let mut current = id.to_string();

        loop {
            if !visited.insert(current.clone()) {
                return Err(VspecError::CyclicInheritance(current));
            }
            let node = self.fetch_node(&current, manifest).await?;
            let next = node.inherits_from.clone();
            ordered_leaf_first.push(node);
            match next {
                Some(parent) => current = parent,
                None => break,
            }
        }

        ordered_leaf_first.reverse(); // root-first
        Ok(ordered_leaf_first)
    }

    /// Fetch-or-verify one chain node's raw JSON (the trust
    /// rule): an upstream manifest entry whose URL hash matches the local
    /// file's SHA-1 trusts the cached copy without re-download; a custom
    /// (loader/modpack) node trusts whatever is on disk, fatal if absent.
    async fn fetch_node(&self, id: &str, manifest: Option<&VersionManifest>) -> VspecResult<RawVspec> {
        let path = self.node_path(id);

        if let Some(entry) = manifest.and_then(|m| m.find(id)) {
            let needs_download = match picomc_core::calculate_file_sha1_sync(&path) {
                Ok(local_sha1) => !embedded_hash_matches(&entry.url, &local_sha1),
                Err(_) => true,
            };
            if needs_download {
                let body = HTTP_CLIENT.get(&entry.url).send().await?.bytes().await?;
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, &body).await?;
            }
        } else if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(VspecError::NotCached(id.to_string()));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        serde_json::from_str(&content).map_err(|source| VspecError::Malformed {
            id: id.to_string(),
            source,
        })
    }

    fn node_path(&self, id: &str) -> PathBuf {
        self.versions_root.join(id).join(format!("{id}.json"))
    }

    fn merge(&self, id: &str, chain: Vec<RawVspec>) -> ResolvedVspec {
        // Override fields: first present walking leaf-to-root wins, i.e.
        // last present walking root-to-leaf (chain is root-first already).
        let main_class = chain
            .iter()
            .rev()
            .find_map(|n| n.main_class.clone())
            .unwrap_or_default();
        let jar = chain
            .iter()
            .rev()
            .find_map(|n| n.jar.clone())
            .unwrap_or_else(|| id.to_string());
        let assets = chain
            .iter()
            .rev()
            .find_map(|n| n.assets.clone())
            .unwrap_or_else(|| "legacy".to_string());
        let downloads = chain
            .iter()
            .rev()
            .find_map(|n| n.downloads.clone())
            .unwrap_or_default();
        let asset_index = chain
            .iter()
            .rev()
            .find_map(|n| n.asset_index.clone())
            .unwrap_or_else(legacy_asset_index);
        let minecraft_arguments = chain.iter().rev().find_map(|n| n.minecraft_arguments.clone());

        // Reduce fields: concatenate root-first then leaf-appended.
        let libraries = chain.iter().flat_map(|n| n.libraries.clone()).collect();
        let arguments = if chain.iter().any(|n| n.arguments.is_some()) {
            let mut game = Vec::new();
            let mut jvm = Vec::new();
            for node in &chain {
                if let Some(a) = &node.arguments {
                    game.extend(a.game.clone());
                    jvm.extend(a.jvm.clone());
                }
            }
            Some(RawArguments { game, jvm })
        } else {
            None
        };

        ResolvedVspec {
            id: id.to_string(),
            chain,
            main_class,
            jar,
            asset_index,
            assets,
            libraries,
            downloads,
            minecraft_arguments,
            arguments,
        }
    }
}

/// Whether `url` embeds `sha1` as a path segment (the upstream
/// `piston-meta` convention for version.json URLs).
fn embedded_hash_matches(url: &str, sha1: &str) -> bool {
    url.split('/').any(|segment| segment.eq_ignore_ascii_case(sha1))
}

/// Flattens a structured argument element list under RuleEngine filtering.
pub fn flatten_argument_elements(
    elements: &[RawArgumentElement],
    env: &crate::rule::Environment,
) -> Vec<String> {
    let mut out = Vec::new();
    for element in elements {
        match element {
            RawArgumentElement::Literal(s) => out.push(s.clone()),
            RawArgumentElement::Conditional { rules, value } => {
                if crate::rule::RuleEngine::evaluate(rules, env) {
                    out.extend(value.clone().into_vec());
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, inherits: Option<&str>, main_class: Option<&str>, libs: Vec<&str>) -> RawVspec {
        RawVspec {
            id: Some(id.to_string()),
            inherits_from: inherits.map(String::from),
            main_class: main_class.map(String::from),
            jar: None,
            asset_index: None,
            assets: None,
            libraries: libs
                .into_iter()
                .map(|name| RawLibrary {
                    name: name.to_string(),
                    url: None,
                    rules: vec![],
                    natives: None,
                    downloads: None,
                    presence_only: false,
                })
                .collect(),
            downloads: None,
            minecraft_arguments: None,
            arguments: None,
        }
    }

    #[test]
    fn leaf_main_class_wins_regardless_of_parents() {
        let resolver = VspecResolver::new("/tmp/unused");
        let chain = vec![
            node("root", None, Some("root.Main"), vec!["a:a:1"]),
            node("leaf", Some("root"), Some("leaf.Main"), vec!["b:b:1"]),
        ];
        let merged = resolver.merge("leaf", chain);
        assert_eq!(merged.main_class, "leaf.Main");
    }

    #[test]
    fn libraries_concatenate_root_first_then_leaf() {
        let resolver = VspecResolver::new("/tmp/unused");
        let chain = vec![
            node("p2", None, None, vec!["p2:lib:1"]),
            node("p1", Some("p2"), None, vec!["p1:lib:1"]),
            node("l", Some("p1"), None, vec!["l:lib:1"]),
        ];
        let merged = resolver.merge("l", chain);
        let names: Vec<_> = merged.libraries.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["p2:lib:1", "p1:lib:1", "l:lib:1"]);
    }
}
