// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Content-addressed on-disk store keyed by SHA-1.
//!
//! Files are placed by streaming to a temp file in the same directory as the
//! final path, hashing as bytes pass through, then renaming into place on
//! success. The rename is atomic on a single filesystem, so no partial file
//! is ever observable at a final path and two concurrent writers for the
//! same key race harmlessly (last rename wins, both write bit-identical
//! content).

use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::errors::{StoreError, StoreResult};

/// A SHA-1 keyed directory tree, fanned out by the hash's first two hex
/// characters (`<root>/<h2>/<hash>`), matching the asset-object layout the
/// upstream server already uses.
#[derive(Debug, Clone)]
pub struct HashedStore {
    root: PathBuf,
}

impl HashedStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical path for a given SHA-1 hex digest.
    pub fn path_of(&self, sha1: &str) -> PathBuf {
        let sha1 = sha1.to_ascii_lowercase();
        let h2 = &sha1[..sha1.len().min(2)];
        self.root.join(h2).join(sha1)
    }

    pub async fn has(&self, sha1: &str) -> bool {
        fs::metadata(self.path_of(sha1)).await.is_ok()
    }

    /// Recompute the SHA-1 of the file at `path_of(sha1)` and compare.
    pub async fn verify(&self, sha1: &str) -> StoreResult<bool> {
        let path = self.path_of(sha1);
        let mut file = match fs::File::open(&path).await {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let mut hasher = Sha1::new();
        let mut buffer = [0u8; 8192];
        loop {
            let n = file.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        let actual = hex::encode(hasher.finalize());
        Ok(actual.eq_ignore_ascii_case(sha1))
    }

    /// Stream `src` into the store under `sha1_expected`, verifying the hash
    /// as bytes pass through. The temp file lives beside the final path so
    /// the closing rename stays on the same filesystem.
    pub async fn put_stream<R>(&self, sha1_expected: &str, mut src: R) -> StoreResult<PathBuf>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let final_path = self.path_of(sha1_expected);
        let dir = final_path.parent().expect("path_of always has a parent");
        fs::create_dir_all(dir).await?;

        let tmp_path = dir.join(format!(".{}.part-{:x}", sha1_expected, fastrand::u64(..)));
        let result = self.write_and_verify(&tmp_path, &mut src, sha1_expected).await;

        match result {
            Ok(()) => {
                fs::rename(&tmp_path, &final_path).await?;
                Ok(final_path)
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp_path).await;
                Err(e)
            }
        }
    }

    async fn write_and_verify<R>(
        &self,
        tmp_path: &Path,
        src: &mut R,
        sha1_expected: &str,
    ) -> StoreResult<()>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let mut file = fs::File::create(tmp_path).await?;
        let mut hasher = Sha1::new();
        let mut buffer = [0u8; 8192];
        loop {
            let n = src.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
            file.write_all(&buffer[..n]).await?;
        }
        file.flush().await?;

        let actual = hex::encode(hasher.finalize());
        if !actual.eq_ignore_ascii_case(sha1_expected) {
            return Err(StoreError::HashMismatch {
                sha1_expected: sha1_expected.to_string(),
                sha1_actual: actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sha1_hex(data: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    #[tokio::test]
    async fn put_stream_writes_content_addressed_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = HashedStore::open(dir.path());
        let data = b"hello minecraft";
        let sha1 = sha1_hex(data);

        let path = store.put_stream(&sha1, Cursor::new(data)).await.unwrap();
        assert_eq!(path, store.path_of(&sha1));
        assert!(store.has(&sha1).await);
        assert!(store.verify(&sha1).await.unwrap());
    }

    #[tokio::test]
    async fn put_stream_rejects_hash_mismatch_and_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = HashedStore::open(dir.path());
        let data = b"hello minecraft";
        let wrong_sha1 = sha1_hex(b"not the same bytes");

        let err = store
            .put_stream(&wrong_sha1, Cursor::new(data))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::HashMismatch { .. }));
        assert!(!store.has(&wrong_sha1).await);

        let mut entries = fs::read_dir(store.path_of(&wrong_sha1).parent().unwrap())
            .await
            .unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_put_stream_same_key_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = HashedStore::open(dir.path());
        let data = b"shared content";
        let sha1 = sha1_hex(data);

        let (r1, r2) = tokio::join!(
            store.put_stream(&sha1, Cursor::new(data)),
            store.put_stream(&sha1, Cursor::new(data)),
        );
        r1.unwrap();
        r2.unwrap();
        assert!(store.verify(&sha1).await.unwrap());
    }
}
