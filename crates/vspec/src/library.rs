//! Library coordinate parsing and resolution.

use std::path::PathBuf;

use picomc_core::{ArchTag, OsTag};

use crate::error::{VspecError, VspecResult};
use crate::raw::RawLibrary;
use crate::rule::{Environment, RuleEngine};

pub const DEFAULT_LIBRARY_HOST: &str = "https://libraries.minecraft.net/";

/// A Maven coordinate `group:artifact:version[:classifier][@ext]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
    pub ext: String,
}

impl Coordinate {
    pub fn parse(name: &str) -> VspecResult<Self> {
        let (name, ext) = match name.split_once('@') {
            Some((n, e)) => (n, e.to_string()),
            None => (name, "jar".to_string()),
        };
        let parts: Vec<&str> = name.split(':').collect();
        if parts.len() < 3 {
            return Err(VspecError::InvalidCoordinate(name.to_string()));
        }
        Ok(Self {
            group: parts[0].to_string(),
            artifact: parts[1].to_string(),
            version: parts[2].to_string(),
            classifier: parts.get(3).map(|s| s.to_string()),
            ext,
        })
    }

    /// `<group-with-slashes>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<ext>`
    pub fn relative_path(&self) -> PathBuf {
        let group_path = self.group.replace('.', "/");
        let filename = match &self.classifier {
            Some(c) => format!("{}-{}-{}.{}", self.artifact, self.version, c, self.ext),
            None => format!("{}-{}.{}", self.artifact, self.version, self.ext),
        };
        PathBuf::from(group_path)
            .join(&self.artifact)
            .join(&self.version)
            .join(filename)
    }

    pub fn filename(&self) -> String {
        self.relative_path()
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// A download target resolved from a library, native classifier, or
/// `downloads.client`/`downloads.server` entry.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub url: String,
    /// Path relative to the root it's materialized under (libraries root,
    /// versions root, ...).
    pub path: PathBuf,
    pub sha1: Option<String>,
    pub size: Option<u64>,
    pub filename: String,
}

/// A library entry after rule evaluation and coordinate/native resolution.
#[derive(Debug, Clone)]
pub struct ResolvedLibrary {
    pub coordinate: Coordinate,
    pub artifact: Artifact,
    pub is_native: bool,
    pub is_classpath: bool,
}

impl ResolvedLibrary {
    pub fn abspath(&self, libraries_root: &std::path::Path) -> PathBuf {
        libraries_root.join(&self.artifact.path)
    }
}

/// macOS natives-era naming: pre-LWJGL-3.3 profiles use `osx`, 1.19+ uses
/// `macos`; both map to the host's native classifier.
fn native_os_key(os: OsTag) -> &'static [&'static str] {
    match os {
        OsTag::Osx => &["osx", "macos"],
        OsTag::Linux => &["linux"],
        OsTag::Windows => &["windows"],
        OsTag::Unknown => &[],
    }
}

/// Turns the merged `libraries[]` list into concrete, platform-filtered
/// artifacts. Duplicates inherited from a parent chain node are left in.
pub struct LibraryResolver;

impl LibraryResolver {
    /// Resolves the merged library list for `env`, then, on Apple Silicon,
    /// retries under an x86_64 environment and folds in any coordinate
    /// (group:artifact:version) the native pass missed entirely — LWJGL's
    /// older natives only ship an x86_64 build, run under Rosetta, and
    /// either gate themselves out via an `os.arch` rule or simply have no
    /// `aarch64` entry in their `natives{}` map.
    pub fn resolve(raw: &[RawLibrary], env: &Environment) -> Vec<ResolvedLibrary> {
        let mut resolved = Self::resolve_pass(raw, env);

        if env.os == OsTag::Osx && env.arch == ArchTag::Aarch64 {
            let rosetta_env = Environment {
                os: env.os,
                arch: ArchTag::X64,
                os_version: env.os_version.clone(),
                features: (),
            };
            let have: std::collections::HashSet<(String, String, String)> = resolved
                .iter()
                .map(coordinate_key)
                .collect();
            for lib in Self::resolve_pass(raw, &rosetta_env) {
                if have.contains(&coordinate_key(&lib)) {
                    continue;
                }
                resolved.push(lib);
            }
        }

        resolved
    }

    fn resolve_pass(raw: &[RawLibrary], env: &Environment) -> Vec<ResolvedLibrary> {
        raw.iter()
            .filter(|lib| RuleEngine::evaluate(&lib.rules, env))
            .filter_map(|lib| Self::resolve_one(lib, env))
            .collect()
    }

    fn resolve_one(lib: &RawLibrary, env: &Environment) -> Option<ResolvedLibrary> {
        let coordinate = Coordinate::parse(&lib.name).ok()?;

        if let Some(natives_map) = &lib.natives {
            return Self::resolve_native(lib, &coordinate, natives_map, env);
        }

        let (url, artifact_path, sha1, size) = match lib
            .downloads
            .as_ref()
            .and_then(|d| d.artifact.as_ref())
        {
            Some(artifact) => {
                let path = artifact
                    .path
                    .as_ref()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| coordinate.relative_path());
                (artifact.url.clone(), path, artifact.sha1.clone(), artifact.size)
            }
            None => {
                let path = coordinate.relative_path();
                let url = match &lib.url {
                    Some(base) => join_url(base, &path),
                    None => join_url(DEFAULT_LIBRARY_HOST, &path),
                };
                (url, path, None, None)
            }
        };

        Some(ResolvedLibrary {
            is_classpath: !lib.presence_only,
            is_native: false,
            artifact: Artifact {
                url,
                filename: artifact_path
                    .file_name()
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_else(|| coordinate.filename()),
                path: artifact_path,
                sha1,
                size,
            },
            coordinate,
        })
    }

    fn resolve_native(
        lib: &RawLibrary,
        coordinate: &Coordinate,
        natives_map: &std::collections::HashMap<String, String>,
        env: &Environment,
    ) -> Option<ResolvedLibrary> {
        let arch_bits = env.arch.get_arch_bits().ok()?;
        for key in native_os_key(env.os) {
            if let Some(template) = natives_map.get(*key) {
                let classifier = template.replace("${arch}", arch_bits);
                let mut native_coord = coordinate.clone();
                native_coord.classifier = Some(classifier.clone());

                let (url, path, sha1, size) = lib
                    .downloads
                    .as_ref()
                    .and_then(|d| d.classifiers.as_ref())
                    .and_then(|c| c.get(&classifier))
                    .map(|artifact| {
                        let path = artifact
                            .path
                            .as_ref()
                            .map(PathBuf::from)
                            .unwrap_or_else(|| native_coord.relative_path());
                        (artifact.url.clone(), path, artifact.sha1.clone(), artifact.size)
                    })
                    .unwrap_or_else(|| {
                        let path = native_coord.relative_path();
                        let url = match &lib.url {
                            Some(base) => join_url(base, &path),
                            None => join_url(DEFAULT_LIBRARY_HOST, &path),
                        };
                        (url, path, None, None)
                    });

                return Some(ResolvedLibrary {
                    is_native: true,
                    is_classpath: false,
                    artifact: Artifact {
                        url,
                        filename: path
                            .file_name()
                            .map(|f| f.to_string_lossy().to_string())
                            .unwrap_or_default(),
                        path,
                        sha1,
                        size,
                    },
                    coordinate: native_coord,
                });
            }
        }
        // PlatformUnsupported: no classifier template for the host platform.
        None
    }
}

fn coordinate_key(lib: &ResolvedLibrary) -> (String, String, String) {
    (
        lib.coordinate.group.clone(),
        lib.coordinate.artifact.clone(),
        lib.coordinate.version.clone(),
    )
}

fn join_url(base: &str, rel: &std::path::Path) -> String {
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    format!("{base}{}", rel.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_coordinate() {
        let c = Coordinate::parse("com.google.code.gson:gson:2.8.9").unwrap();
        assert_eq!(c.group, "com.google.code.gson");
        assert_eq!(c.artifact, "gson");
        assert_eq!(c.version, "2.8.9");
        assert_eq!(c.ext, "jar");
        assert_eq!(
            c.relative_path(),
            PathBuf::from("com/google/code/gson/gson/2.8.9/gson-2.8.9.jar")
        );
    }

    #[test]
    fn parses_classifier_and_extension() {
        let c = Coordinate::parse("org.lwjgl:lwjgl:3.3.1:natives-linux@jar").unwrap();
        assert_eq!(c.classifier.as_deref(), Some("natives-linux"));
        assert_eq!(
            c.relative_path(),
            PathBuf::from("org/lwjgl/lwjgl/3.3.1/lwjgl-3.3.1-natives-linux.jar")
        );
    }

    #[test]
    fn default_url_joins_library_host() {
        let lib = RawLibrary {
            name: "com.google.code.gson:gson:2.8.9".into(),
            url: None,
            rules: vec![],
            natives: None,
            downloads: None,
            presence_only: false,
        };
        let env = Environment {
            os: OsTag::Linux,
            arch: ArchTag::X64,
            os_version: String::new(),
            features: (),
        };
        let resolved = LibraryResolver::resolve(&[lib], &env);
        assert_eq!(resolved.len(), 1);
        assert_eq!(
            resolved[0].artifact.url,
            "https://libraries.minecraft.net/com/google/code/gson/gson/2.8.9/gson-2.8.9.jar"
        );
    }

    #[test]
    fn rule_denied_library_is_dropped() {
        use crate::rule::{Rule, RuleAction, RuleOs};
        let lib = RawLibrary {
            name: "org.lwjgl:lwjgl:3.3.1".into(),
            url: None,
            rules: vec![Rule {
                action: RuleAction::Allow,
                os: Some(RuleOs {
                    name: Some("windows".into()),
                    arch: None,
                    version: None,
                }),
                features: None,
            }],
            natives: None,
            downloads: None,
            presence_only: false,
        };
        let env = Environment {
            os: OsTag::Linux,
            arch: ArchTag::X64,
            os_version: String::new(),
            features: (),
        };
        assert!(LibraryResolver::resolve(&[lib], &env).is_empty());
    }

    #[test]
    fn arm64_macos_falls_back_to_x64_classifier() {
        let mut natives = std::collections::HashMap::new();
        natives.insert("osx".to_string(), "natives-osx".to_string());
        let lib = RawLibrary {
            name: "org.lwjgl.lwjgl:lwjgl-platform:2.9.4".into(),
            url: None,
            rules: vec![],
            natives: Some(natives),
            downloads: None,
            presence_only: false,
        };
        let env = Environment {
            os: OsTag::Osx,
            arch: ArchTag::Aarch64,
            os_version: String::new(),
            features: (),
        };
        let resolved = LibraryResolver::resolve(&[lib], &env);
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].is_native);
        assert_eq!(resolved[0].coordinate.classifier.as_deref(), Some("natives-osx"));
    }
}
