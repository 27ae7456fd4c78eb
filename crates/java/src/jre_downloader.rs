// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! JRE Download and Installation
//!
//! This module handles downloading and extracting Java Runtime Environments.
//! Implementation is based on standard Rust async patterns and public APIs.

use std::path::{Path, PathBuf};
use crate::errors::{JreError, JreResult};
use path_absolutize::Absolutize;
use tokio::fs;

use picomc_core::download::{DownloadItem, Downloader, DownloaderConfig};
use picomc_core::extract::{tar_gz_extract, zip_extract};
use picomc_core::system::OsTag;
use picomc_core::OS;

use super::JavaDistribution;

/// Locates an existing Java binary in the runtime directory
///
/// Searches for the java executable in the expected directory structure
/// based on the distribution and version.
///
/// # Arguments
/// * `runtimes_folder` - Base directory containing installed JREs
/// * `distribution` - The Java distribution to locate
/// * `version` - Java major version number
///
/// # Returns
/// Absolute path to the java binary, or error if not found
pub async fn find_java_binary(
    runtimes_folder: &Path,
    distribution: &JavaDistribution,
    version: &u8,
) -> JreResult<PathBuf> {
    let runtime_dir = build_runtime_path(runtimes_folder, distribution, version);

    let binary_path = locate_binary_in_directory(&runtime_dir).await?;

    // Ensure execution permissions on Unix systems
    #[cfg(unix)]
    ensure_executable_permissions(&binary_path).await?;

    Ok(binary_path.absolutize()?.to_path_buf())
}

/// Downloads and installs a JRE to the specified directory.
///
/// The archive is streamed straight to disk via [`Downloader`], the same
/// queue-based downloader the launch crate uses for game assets and
/// libraries, so progress is reported per completed file rather than per
/// byte chunk.
///
/// # Returns
/// Path to the installed java binary
pub async fn jre_download(
    runtimes_folder: &Path,
    distribution: &JavaDistribution,
    version: &u8,
) -> JreResult<PathBuf> {
    let runtime_dir = build_runtime_path(runtimes_folder, distribution, version);

    prepare_installation_directory(&runtime_dir).await?;

    let download_url = distribution
        .get_download_url(version)
        .await
        .map_err(|e| JreError::Download(format!("Failed to get download URL: {}", e)))?;

    let archive_path = runtime_dir.join(archive_file_name(distribution, version));
    let item = DownloadItem::new(download_url, archive_path.clone());
    let report = Downloader::new(DownloaderConfig::default())
        .run(vec![item])
        .await;
    if let Some(failed) = report.failed.into_iter().next() {
        return Err(JreError::Download(failed.error.to_string()));
    }

    extract_archive(&archive_path, &runtime_dir).await?;
    let _ = fs::remove_file(&archive_path).await;

    find_java_binary(runtimes_folder, distribution, version).await
}

fn archive_file_name(distribution: &JavaDistribution, version: &u8) -> String {
    let ext = match OS.get_archive_type() {
        Ok(ext) => ext,
        Err(_) => "tar.gz",
    };
    format!("{}-{}.{}", distribution.get_name(), version, ext)
}

// ============================================================================
// Private Helper Functions
// ============================================================================

/// Constructs the runtime installation path for a given distribution and version
fn build_runtime_path(
    runtimes_folder: &Path,
    distribution: &JavaDistribution,
    version: &u8,
) -> PathBuf {
    // Optimized: Build path directly without intermediate String allocation
    let mut path = runtimes_folder.to_path_buf();
    path.push(format!("{}_{}", distribution.get_name(), version));
    path
}

/// Prepares the installation directory by removing existing files
async fn prepare_installation_directory(runtime_dir: &Path) -> JreResult<()> {
    if runtime_dir.exists() {
        fs::remove_dir_all(runtime_dir).await?;
    }
    fs::create_dir_all(runtime_dir).await?;
    Ok(())
}

/// Extracts the JRE archive based on the operating system.
async fn extract_archive(archive_path: &Path, destination: &Path) -> JreResult<()> {
    let file = fs::File::open(archive_path).await?;
    let reader = tokio::io::BufReader::new(file);

    match OS {
        OsTag::Windows => {
            zip_extract(reader, destination)
                .await
                .map_err(|e| JreError::Extraction(format!("ZIP extraction failed: {}", e)))?;
        }
        OsTag::Linux | OsTag::Osx => {
            tar_gz_extract(reader, destination)
                .await
                .map_err(|e| JreError::Extraction(format!("TAR.GZ extraction failed: {}", e)))?;
        }
        OsTag::Unknown => {
            return Err(JreError::UnsupportedOS);
        }
    }

    Ok(())
}

/// Locates the java binary within the extracted JRE directory
///
/// The structure varies by OS and distribution:
/// - Windows: jre_root/bin/java.exe
/// - macOS (bundle): jre_root/Contents/Home/bin/java (Temurin, Zulu)
/// - macOS (flat): jre_root/bin/java (Liberica tar.gz)
/// - Linux: jre_root/bin/java
async fn locate_binary_in_directory(runtime_dir: &Path) -> JreResult<PathBuf> {
    // Find the first subdirectory (JRE root)
    let mut entries = fs::read_dir(runtime_dir).await?;

    let jre_root = entries
        .next_entry()
        .await?
        .ok_or_else(|| JreError::NotFound {
            path: runtime_dir.to_path_buf(),
        })?
        .path();

    // Build path to java binary based on OS
    let java_binary = match OS {
        OsTag::Windows => jre_root.join("bin").join("java.exe"),
        OsTag::Osx => {
            // macOS: Try bundle structure first (Temurin, Zulu), then flat structure (Liberica)
            let bundle_path = jre_root.join("Contents").join("Home").join("bin").join("java");
            if bundle_path.exists() {
                bundle_path
            } else {
                // Fallback to flat structure (like Linux)
                jre_root.join("bin").join("java")
            }
        }
        _ => jre_root.join("bin").join("java"),
    };

    // Verify the binary exists
    if !java_binary.exists() {
        return Err(JreError::NotFound {
            path: java_binary.clone(),
        });
    }

    Ok(java_binary)
}

/// Ensures the java binary has execution permissions on Unix systems
#[cfg(unix)]
async fn ensure_executable_permissions(binary_path: &Path) -> JreResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(binary_path).await?;
    let current_permissions = metadata.permissions();

    // Check if any execute bit is set (owner, group, or other)
    if current_permissions.mode() & 0o111 == 0 {
        // No execute permissions, set them (rwxr-xr-x)
        let mut new_permissions = current_permissions;
        new_permissions.set_mode(0o755);
        fs::set_permissions(binary_path, new_permissions).await?;
    }

    Ok(())
}
