// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! File hashing utilities
//!
//! Provides SHA1 hash verification for files with both sync and async implementations

use std::path::Path;
use sha1::{Sha1, Digest};
use std::io::Read;
use tokio::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SHA1 mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

pub type HashResult<T> = Result<T, HashError>;

/// Verifies the SHA1 hash of a file (async version)
///
/// Reads the entire file into memory and computes the SHA1 hash.
/// Suitable for small to medium files.
///
/// # Arguments
/// * `path` - Path to the file to verify
/// * `expected_sha1` - Expected SHA1 hash (case-insensitive)
///
/// # Returns
/// `true` if the hash matches, `false` otherwise
pub async fn verify_file_sha1(path: &Path, expected_sha1: &str) -> HashResult<bool> {
    let content = fs::read(path).await?;

    let mut hasher = Sha1::new();
    hasher.update(&content);
    let calculated_sha1 = hex::encode(hasher.finalize());

    Ok(calculated_sha1.eq_ignore_ascii_case(expected_sha1))
}

/// Verifies the SHA1 hash of a file with streaming (async version)
///
/// Reads the file in chunks to minimize memory usage.
/// Suitable for large files.
///
/// # Arguments
/// * `path` - Path to the file to verify
/// * `expected_sha1` - Expected SHA1 hash (case-insensitive)
///
/// # Returns
/// `true` if the hash matches, `false` otherwise
pub async fn verify_file_sha1_streaming(path: &Path, expected_sha1: &str) -> HashResult<bool> {
    use tokio::io::AsyncReadExt;

    let mut file = fs::File::open(path).await?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; 8192]; // 8KB buffer

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let calculated_sha1 = hex::encode(hasher.finalize());
    Ok(calculated_sha1.eq_ignore_ascii_case(expected_sha1))
}

/// Calculates the SHA1 hash of a file (sync version)
///
/// Reads the file in chunks using blocking I/O.
/// Suitable for use in non-async contexts (e.g., zip archive processing).
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// The SHA1 hash as a lowercase hex string
pub fn calculate_file_sha1_sync(path: &Path) -> HashResult<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verifies the SHA1 hash of a file (sync version)
///
/// # Arguments
/// * `path` - Path to the file to verify
/// * `expected_sha1` - Expected SHA1 hash (case-insensitive)
///
/// # Returns
/// `true` if the hash matches, `false` otherwise
pub fn verify_file_sha1_sync(path: &Path, expected_sha1: &str) -> HashResult<bool> {
    let calculated_sha1 = calculate_file_sha1_sync(path)?;
    Ok(calculated_sha1.eq_ignore_ascii_case(expected_sha1))
}

/// Calculates the SHA1 hash of arbitrary bytes
///
/// Useful for hashing strings, usernames, or any data in memory.
///
/// # Arguments
/// * `data` - The bytes to hash
///
/// # Returns
/// The SHA1 hash as a lowercase hex string
pub fn calculate_sha1_bytes(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Calculates the SHA1 hash of arbitrary bytes and returns raw hash bytes
///
/// Useful when you need the raw hash bytes instead of hex string.
///
/// # Arguments
/// * `data` - The bytes to hash
///
/// # Returns
/// The SHA1 hash as raw bytes (20 bytes)
pub fn calculate_sha1_bytes_raw(data: &[u8]) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}
