//! Wire shapes for a single vspec JSON document (the `RawVspec`).
//!
//! One node in an inheritance chain deserializes to `RawVspec` as-is; merging
//! across the chain into a [`crate::resolver::ResolvedVspec`] is a separate
//! step (`crate::resolver`) so this module stays a faithful mirror of the
//! upstream/loader JSON schema.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::rule::Rule;

#[derive(Debug, Clone, Deserialize)]
pub struct RawVspec {
    pub id: Option<String>,
    #[serde(rename = "inheritsFrom")]
    pub inherits_from: Option<String>,
    #[serde(rename = "mainClass")]
    pub main_class: Option<String>,
    pub jar: Option<String>,
    #[serde(rename = "assetIndex")]
    pub asset_index: Option<RawAssetIndexRef>,
    pub assets: Option<String>,
    #[serde(default)]
    pub libraries: Vec<RawLibrary>,
    pub downloads: Option<RawDownloads>,
    #[serde(rename = "minecraftArguments")]
    pub minecraft_arguments: Option<String>,
    pub arguments: Option<RawArguments>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAssetIndexRef {
    pub id: String,
    pub url: String,
    pub sha1: String,
    pub size: u64,
    #[serde(rename = "totalSize")]
    pub total_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDownloadEntry {
    pub url: String,
    pub sha1: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDownloads {
    pub client: Option<RawDownloadEntry>,
    pub server: Option<RawDownloadEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLibraryDownloads {
    pub artifact: Option<RawDownloadArtifact>,
    #[serde(default)]
    pub classifiers: Option<HashMap<String, RawDownloadArtifact>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDownloadArtifact {
    pub path: Option<String>,
    pub url: String,
    pub sha1: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLibrary {
    pub name: String,
    pub url: Option<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    pub natives: Option<HashMap<String, String>>,
    pub downloads: Option<RawLibraryDownloads>,
    #[serde(rename = "presenceOnly", default)]
    pub presence_only: bool,
}

/// One element of `arguments.game[]`/`arguments.jvm[]`: a bare literal or a
/// `{rules[], value}` conditional whose value is one string or several.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawArgumentElement {
    Literal(String),
    Conditional {
        #[serde(default)]
        rules: Vec<Rule>,
        value: RawArgumentValue,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawArgumentValue {
    Single(String),
    Multiple(Vec<String>),
}

impl RawArgumentValue {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            RawArgumentValue::Single(s) => vec![s],
            RawArgumentValue::Multiple(v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArguments {
    #[serde(default)]
    pub game: Vec<RawArgumentElement>,
    #[serde(default)]
    pub jvm: Vec<RawArgumentElement>,
}

/// Raw asset index document: logical-name keyed
/// object table plus the two presentation-mode flags.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAssetIndex {
    pub objects: HashMap<String, RawAssetObject>,
    #[serde(rename = "virtual", default)]
    pub virtual_: Option<bool>,
    #[serde(rename = "map_to_resources", default)]
    pub map_to_resources: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAssetObject {
    pub hash: String,
    pub size: u64,
}

/// Permissive fallback for fields this crate doesn't model explicitly but
/// still wants to round-trip (unused today; kept available for loader
/// profiles carrying extra top-level keys the merge policy ignores).
#[allow(dead_code)]
pub type RawExtra = HashMap<String, Value>;
