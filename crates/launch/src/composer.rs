// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Classpath composition, native extraction, argument evaluation, and JVM
//! process supervision.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use picomc_auth::Account;
use picomc_core::{trace_debug, trace_info, trace_warn};
use picomc_vspec::library::ResolvedLibrary;
use picomc_vspec::{Environment, ResolvedVspec};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::arguments::{game_arguments, jvm_arguments, PlaceholderContext};
use crate::error::{LaunchError, LaunchResult};

/// Owns a launch-scoped natives scratch directory and removes it on drop, on
/// every exit path: normal completion, an early `?`-propagated error from a
/// later composer step, or a panic unwind.
pub struct NativesGuard {
    path: PathBuf,
}

impl NativesGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for NativesGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                trace_warn!("failed to remove natives dir {:?}: {}", self.path, e);
            }
        }
    }
}

/// Creates `<instance_root>/natives-<rand>/` and unzips every deduplicated
/// native library archive into it.
pub async fn extract_natives(
    instance_root: &Path,
    libraries_root: &Path,
    libraries: &[ResolvedLibrary],
) -> LaunchResult<NativesGuard> {
    let dir = instance_root.join(format!("natives-{:x}", fastrand::u64(..)));
    tokio::fs::create_dir_all(&dir).await?;

    let mut seen = std::collections::HashSet::new();
    for lib in libraries.iter().filter(|l| l.is_native) {
        let abspath = lib.abspath(libraries_root);
        if !seen.insert(abspath.clone()) {
            continue;
        }
        let file = tokio::fs::File::open(&abspath).await?;
        let reader = tokio::io::BufReader::new(file);
        picomc_core::extract::zip_extract(reader, &dir).await?;
    }

    Ok(NativesGuard { path: dir })
}

/// `is_classpath` libraries plus the game jar, joined with the host path
/// separator (boundary scenario S6).
pub fn build_classpath(
    libraries: &[ResolvedLibrary],
    libraries_root: &Path,
    game_jar: &Path,
) -> String {
    let sep = picomc_core::OS.path_separator();
    let mut parts: Vec<String> = libraries
        .iter()
        .filter(|l| l.is_classpath)
        .map(|l| l.abspath(libraries_root).to_string_lossy().into_owned())
        .collect();
    parts.push(game_jar.to_string_lossy().into_owned());
    parts.join(&sep.to_string())
}

/// OS/arch strings reported by the JVM itself, read once per `java.path` by
/// compiling and running a tiny probe program, then cached — the only way to
/// make native-library filtering agree with what the interpreter that will
/// actually run the game believes about itself (e.g. a 32-bit JVM on a
/// 64-bit host).
#[derive(Debug, Clone)]
pub struct JavaInfo {
    pub os_name: String,
    pub os_arch: String,
}

static JAVA_INFO_CACHE: Lazy<Mutex<HashMap<PathBuf, JavaInfo>>> = Lazy::new(|| Mutex::new(HashMap::new()));

const JAVA_INFO_PROBE_SOURCE: &str = r#"
public class PicomcJavaInfo {
    public static void main(String[] args) {
        System.out.println(System.getProperty("os.name"));
        System.out.println(System.getProperty("os.arch"));
    }
}
"#;

fn sibling_binary(java_path: &Path, name: &str) -> PathBuf {
    let binary_name = if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    };
    java_path
        .parent()
        .map(|dir| dir.join(&binary_name))
        .unwrap_or_else(|| PathBuf::from(&binary_name))
}

pub async fn probe_java_info(java_path: &Path) -> LaunchResult<JavaInfo> {
    if let Some(cached) = JAVA_INFO_CACHE.lock().unwrap().get(java_path) {
        return Ok(cached.clone());
    }

    let scratch = std::env::temp_dir().join(format!("picomc-javainfo-{:x}", fastrand::u64(..)));
    tokio::fs::create_dir_all(&scratch).await?;
    let source_path = scratch.join("PicomcJavaInfo.java");
    tokio::fs::write(&source_path, JAVA_INFO_PROBE_SOURCE).await?;

    let javac = sibling_binary(java_path, "javac");
    let compile = Command::new(&javac)
        .arg(&source_path)
        .current_dir(&scratch)
        .output()
        .await
        .map_err(|e| LaunchError::JavaProbeFailed(e.to_string()))?;
    if !compile.status.success() {
        let _ = tokio::fs::remove_dir_all(&scratch).await;
        return Err(LaunchError::JavaProbeFailed(
            String::from_utf8_lossy(&compile.stderr).into_owned(),
        ));
    }

    let run = Command::new(java_path)
        .arg("-cp")
        .arg(&scratch)
        .arg("PicomcJavaInfo")
        .output()
        .await
        .map_err(|e| LaunchError::JavaProbeFailed(e.to_string()))?;
    let _ = tokio::fs::remove_dir_all(&scratch).await;
    if !run.status.success() {
        return Err(LaunchError::JavaProbeFailed(
            String::from_utf8_lossy(&run.stderr).into_owned(),
        ));
    }

    let mut lines = String::from_utf8_lossy(&run.stdout).lines().map(String::from).collect::<Vec<_>>();
    if lines.len() < 2 {
        return Err(LaunchError::JavaProbeFailed("probe produced no output".to_string()));
    }
    let os_arch = lines.pop().unwrap();
    let os_name = lines.pop().unwrap();
    let info = JavaInfo { os_name, os_arch };
    JAVA_INFO_CACHE.lock().unwrap().insert(java_path.to_path_buf(), info.clone());
    Ok(info)
}

/// Everything [`compose_argv`] needs to build and order the final argv.
pub struct ComposeInputs<'a> {
    pub vspec: &'a ResolvedVspec,
    pub env: &'a Environment,
    pub libraries: &'a [ResolvedLibrary],
    pub libraries_root: &'a Path,
    pub game_jar: &'a Path,
    pub natives_dir: &'a Path,
    pub account: &'a Account,
    pub game_directory: &'a Path,
    pub assets_root: &'a Path,
    pub game_assets: Option<&'a Path>,
    pub memory_min: Option<&'a str>,
    pub memory_max: Option<&'a str>,
    pub extra_jvm_args: &'a [String],
}

/// Builds the `[...jvm_args, main_class, ...game_args]` tail (everything
/// after the `java` binary itself): the fixed legacy prologue when
/// `minecraftArguments` is present, otherwise the structured
/// `arguments.jvm[]`/`arguments.game[]` lists, in both cases prefixed with
/// `-Xms`/`-Xmx` and the user's extra JVM flags.
pub fn compose_argv(inputs: &ComposeInputs) -> LaunchResult<Vec<String>> {
    if inputs.vspec.main_class.is_empty() {
        return Err(LaunchError::MissingMainClass);
    }

    let classpath = build_classpath(inputs.libraries, inputs.libraries_root, inputs.game_jar);
    let ctx = PlaceholderContext {
        account: inputs.account,
        version_name: &inputs.vspec.id,
        game_directory: inputs.game_directory,
        assets_root: inputs.assets_root,
        assets_index_name: &inputs.vspec.assets,
        game_assets: inputs.game_assets,
        natives_directory: inputs.natives_dir,
        classpath: &classpath,
    };

    let mut jvm_args = Vec::new();
    if let Some(min) = inputs.memory_min {
        jvm_args.push(format!("-Xms{min}"));
    }
    if let Some(max) = inputs.memory_max {
        jvm_args.push(format!("-Xmx{max}"));
    }
    jvm_args.extend(inputs.extra_jvm_args.iter().cloned());

    if inputs.vspec.minecraft_arguments.is_some() {
        jvm_args.push(format!("-Djava.library.path={}", inputs.natives_dir.display()));
        jvm_args.push("-cp".to_string());
        jvm_args.push(classpath.clone());
    } else {
        jvm_args.extend(jvm_arguments(inputs.vspec, inputs.env, &ctx));
    }

    let game_args = game_arguments(inputs.vspec, inputs.env, &ctx);

    let mut argv = jvm_args;
    argv.push(inputs.vspec.main_class.clone());
    argv.extend(game_args);
    Ok(argv)
}

/// Spawns the JVM with the composed argv, working directory `game_directory`,
/// and piped stdio, draining stdout/stderr to this process's own concurrently
/// with the blocking wait so the child's pipes never fill and deadlock it.
pub async fn spawn_and_wait(java_path: &Path, argv: &[String], game_directory: &Path) -> LaunchResult<i32> {
    trace_info!("spawning {:?} with {} args", java_path, argv.len());
    let mut child: Child = Command::new(java_path)
        .args(argv)
        .current_dir(game_directory)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .map_err(LaunchError::Spawn)?;

    let mut stdout = child.stdout.take().expect("piped stdout");
    let mut stderr = child.stderr.take().expect("piped stderr");

    let stdout_task = tokio::spawn(async move {
        let mut buf = [0u8; 8192];
        let mut out = tokio::io::stdout();
        while let Ok(n) = stdout.read(&mut buf).await {
            if n == 0 {
                break;
            }
            let _ = out.write_all(&buf[..n]).await;
        }
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = [0u8; 8192];
        let mut err = tokio::io::stderr();
        while let Ok(n) = stderr.read(&mut buf).await {
            if n == 0 {
                break;
            }
            let _ = err.write_all(&buf[..n]).await;
        }
    });

    let status = child.wait().await?;
    let _ = tokio::join!(stdout_task, stderr_task);

    let code = status.code().unwrap_or(-1);
    trace_debug!("java process exited with code {}", code);
    Ok(code)
}

/// Maps the probe's reported `os.name`/`os.arch` onto this workspace's
/// [`OsTag`]/[`ArchTag`] vocabulary, falling back to the host's own tags for
/// a string the probe reports that isn't recognized.
fn environment_from_java_info(info: &JavaInfo) -> Environment {
    let name = info.os_name.to_lowercase();
    let os = if name.contains("win") {
        picomc_core::OsTag::Windows
    } else if name.contains("mac") || name.contains("darwin") {
        picomc_core::OsTag::Osx
    } else if name.contains("linux") {
        picomc_core::OsTag::Linux
    } else {
        picomc_core::OS
    };
    let arch = match info.os_arch.to_lowercase().as_str() {
        "x86" | "i386" | "i686" => picomc_core::ArchTag::X86,
        "amd64" | "x86_64" => picomc_core::ArchTag::X64,
        "aarch64" | "arm64" => picomc_core::ArchTag::Aarch64,
        "arm" => picomc_core::ArchTag::Arm,
        _ => picomc_core::ARCHITECTURE,
    };
    Environment {
        os,
        arch,
        os_version: picomc_core::system::os_version_string(),
        features: (),
    }
}

/// Root paths and roots the top-level orchestration needs; the facade that
/// ties VersionManager/VspecResolver/LibraryResolver/AssetResolver/Downloader
/// together into one launch (§5's ordering guarantees: manifest/vspec before
/// any enqueue, downloads before natives extraction, natives before argv,
/// assets materialized before spawn, dirty config flushed before spawn).
pub struct LaunchComposer {
    pub versions_root: PathBuf,
    pub libraries_root: PathBuf,
    pub assets_root: PathBuf,
}

impl LaunchComposer {
    pub fn new(versions_root: impl Into<PathBuf>, libraries_root: impl Into<PathBuf>, assets_root: impl Into<PathBuf>) -> Self {
        Self {
            versions_root: versions_root.into(),
            libraries_root: libraries_root.into(),
            assets_root: assets_root.into(),
        }
    }

    /// Runs one full launch: resolves the vspec chain, ensures every
    /// library/jar/asset referenced by it is present and hash-verified,
    /// extracts natives, flushes the instance's dirty config, builds the
    /// argv, and spawns/waits for the JVM. Returns the child's exit code.
    pub async fn launch(
        &self,
        version_id: &str,
        manifest: Option<&picomc_vspec::VersionManifest>,
        instance: &crate::instance::Instance,
        config: &mut crate::config::ConfigOverlay,
        account: &Account,
        java_path: &Path,
        verify: bool,
    ) -> LaunchResult<i32> {
        use picomc_vspec::{AssetResolver, LibraryResolver, VspecResolver};

        let resolver = VspecResolver::new(&self.versions_root);
        let vspec = resolver.resolve(version_id, manifest).await?;

        let java_info = probe_java_info(java_path).await.ok();
        let env = java_info.map(|i| environment_from_java_info(&i)).unwrap_or_else(Environment::host);

        let libraries = LibraryResolver::resolve(&vspec.libraries, &env);

        let mut pending = Vec::new();
        for lib in libraries.iter().filter(|l| l.is_classpath || l.is_native) {
            let dest = lib.abspath(&self.libraries_root);
            let present = if verify {
                match &lib.artifact.sha1 {
                    Some(sha1) => picomc_core::verify_file_sha1(&dest, sha1).await.unwrap_or(false),
                    None => tokio::fs::try_exists(&dest).await.unwrap_or(false),
                }
            } else {
                tokio::fs::try_exists(&dest).await.unwrap_or(false)
            };
            if present {
                continue;
            }
            let mut item = picomc_core::DownloadItem::new(lib.artifact.url.clone(), dest);
            if let Some(sha1) = &lib.artifact.sha1 {
                item = item.with_sha1(sha1.clone());
            }
            if let Some(size) = lib.artifact.size {
                item = item.with_size(size);
            }
            pending.push(item);
        }

        let jar_path = self.versions_root.join(&vspec.id).join(format!("{}.jar", vspec.jar));
        if let Some(client) = vspec.client_download() {
            let present = match &client.sha1 {
                Some(sha1) => picomc_core::verify_file_sha1(&jar_path, sha1).await.unwrap_or(false),
                None => tokio::fs::try_exists(&jar_path).await.unwrap_or(false),
            };
            if !present {
                let mut item = picomc_core::DownloadItem::new(client.url.clone(), jar_path.clone());
                if let Some(sha1) = &client.sha1 {
                    item = item.with_sha1(sha1.clone());
                }
                if let Some(size) = client.size {
                    item = item.with_size(size);
                }
                pending.push(item);
            }
        }

        if !pending.is_empty() {
            let downloader = picomc_core::Downloader::new(picomc_core::DownloaderConfig::default());
            downloader.run(pending).await;
        }

        if !tokio::fs::try_exists(&jar_path).await.unwrap_or(false) {
            return Err(LaunchError::MissingGameJar);
        }

        let asset_resolver = AssetResolver::new(&self.assets_root);
        let asset_index = asset_resolver.fetch_index(&vspec.asset_index).await?;
        asset_resolver.ensure_objects(&asset_index, verify).await?;
        let game_assets = asset_resolver.present(&asset_index, &instance.game_dir()).await?;

        let natives = extract_natives(&instance.root, &self.libraries_root, &libraries).await?;

        config.save(&instance.config_path()).await?;

        let memory_min = config.get_str(crate::config::KEY_JAVA_MEMORY_MIN).map(String::from);
        let memory_max = config.get_str(crate::config::KEY_JAVA_MEMORY_MAX).map(String::from);
        let extra_jvm_args: Vec<String> = config
            .get_str(crate::config::KEY_JAVA_JVMARGS)
            .map(|s| shell_split(s))
            .unwrap_or_default();

        let inputs = ComposeInputs {
            vspec: &vspec,
            env: &env,
            libraries: &libraries,
            libraries_root: &self.libraries_root,
            game_jar: &jar_path,
            natives_dir: natives.path(),
            account,
            game_directory: &instance.game_dir(),
            assets_root: &self.assets_root,
            game_assets: game_assets.as_deref(),
            memory_min: memory_min.as_deref(),
            memory_max: memory_max.as_deref(),
            extra_jvm_args: &extra_jvm_args,
        };
        let argv = compose_argv(&inputs)?;

        spawn_and_wait(java_path, &argv, &instance.game_dir()).await
    }
}

/// Minimal POSIX-style word split for the `java.jvmargs` config string: no
/// quoting/escaping support, matching how the vast majority of user-supplied
/// JVM flag strings (`-Xmx2G -XX:+UseG1GC`) are actually written.
fn shell_split(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use picomc_core::OsTag;
    use picomc_vspec::library::{Artifact, Coordinate};

    fn library(classpath: bool, native: bool, filename: &str) -> ResolvedLibrary {
        ResolvedLibrary {
            coordinate: Coordinate::parse("g:a:1").unwrap(),
            artifact: Artifact {
                url: String::new(),
                path: PathBuf::from(filename),
                sha1: None,
                size: None,
                filename: filename.to_string(),
            },
            is_native: native,
            is_classpath: classpath,
        }
    }

    #[test]
    fn classpath_joins_with_host_separator() {
        let libs = vec![library(true, false, "a.jar"), library(true, false, "b.jar")];
        let classpath = build_classpath(&libs, Path::new(""), Path::new("v.jar"));
        let expected = if OsTag::Windows == picomc_core::OS {
            "a.jar;b.jar;v.jar"
        } else {
            "a.jar:b.jar:v.jar"
        };
        assert_eq!(classpath, expected);
    }

    #[test]
    fn native_libraries_are_excluded_from_classpath() {
        let libs = vec![library(true, false, "a.jar"), library(false, true, "native.jar")];
        let classpath = build_classpath(&libs, Path::new(""), Path::new("v.jar"));
        assert!(!classpath.contains("native.jar"));
    }
}
