// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Parallel HTTP downloader with hash verification, cancellation and
//! per-item retry/backoff.
//!
//! A single [`Downloader::run`] call drains a fixed queue of [`DownloadItem`]
//! through a bounded worker pool (`tokio::sync::Semaphore`), each item
//! streamed to a temp file beside its destination and renamed into place on
//! success — the same atomic-rename discipline as [`crate::store::HashedStore`].
//! `run()` never fails outright; per-item failures are aggregated into the
//! returned [`DownloadReport`].

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::StreamExt;
use futures_util::future::join_all;
use sha1::{Digest, Sha1};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;

use crate::errors::{DownloadError, DownloadResult};
use crate::hosts::HTTP_CLIENT;

/// One queued download: a source URL, a destination path, and optionally the
/// content's expected SHA-1 and byte size (for aggregate progress totals).
#[derive(Debug, Clone)]
pub struct DownloadItem {
    pub url: String,
    pub destination: PathBuf,
    pub expected_sha1: Option<String>,
    pub size: Option<u64>,
}

impl DownloadItem {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            expected_sha1: None,
            size: None,
        }
    }

    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.expected_sha1 = Some(sha1.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DownloaderConfig {
    pub max_concurrent_downloads: usize,
    pub max_retries: u32,
    pub initial_delay_ms: u64,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: 16,
            max_retries: 3,
            initial_delay_ms: 20,
        }
    }
}

/// One item's terminal outcome, retained for [`DownloadReport::failed`].
#[derive(Debug)]
pub struct FailedDownload {
    pub item: DownloadItem,
    pub error: DownloadError,
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    pub succeeded: usize,
    pub failed: Vec<FailedDownload>,
}

impl DownloadReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Total bytes across all items that declare a `size`, or `None` if any item
/// omits it (in which case progress should be reported as files-completed).
pub fn total_size(items: &[DownloadItem]) -> Option<u64> {
    items
        .iter()
        .map(|i| i.size)
        .collect::<Option<Vec<_>>>()
        .map(|sizes| sizes.into_iter().sum())
}

fn retry_delay_ms(base_delay_ms: u64, attempt: u32) -> u64 {
    let exponential = base_delay_ms.saturating_mul(1u64 << attempt.saturating_sub(1));
    let jitter = fastrand::u64(0..=exponential.max(1) / 2);
    exponential + jitter
}

pub struct Downloader {
    config: DownloaderConfig,
    stop: Arc<AtomicBool>,
}

impl Downloader {
    pub fn new(config: DownloaderConfig) -> Self {
        Self {
            config,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A shared flag external callers can set to request cooperative
    /// cancellation; in-flight workers observe it at each buffer boundary.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    /// Run the queue to completion. The queue is never mutated after this
    /// starts — callers build the full `Vec<DownloadItem>` up front.
    pub async fn run(&self, items: Vec<DownloadItem>) -> DownloadReport {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_downloads));
        let config = self.config;
        let stop = self.stop.clone();

        let futures = items.into_iter().map(|item| {
            let semaphore = semaphore.clone();
            let stop = stop.clone();
            async move {
                let _permit = semaphore.acquire().await;
                let result = download_one_with_retry(&item, config, &stop).await;
                (item, result)
            }
        });

        let results = join_all(futures).await;
        let mut report = DownloadReport::default();
        for (item, result) in results {
            match result {
                Ok(()) => report.succeeded += 1,
                Err(error) => report.failed.push(FailedDownload { item, error }),
            }
        }
        report
    }
}

async fn download_one_with_retry(
    item: &DownloadItem,
    config: DownloaderConfig,
    stop: &AtomicBool,
) -> DownloadResult<()> {
    let attempts = config.max_retries.max(1);
    let mut last_error = None;
    for attempt in 1..=attempts {
        if stop.load(Ordering::Relaxed) {
            return Err(DownloadError::Cancelled);
        }
        match download_one(item, stop).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing_warn(&item.url, attempt, attempts, &e);
                if attempt < attempts {
                    let delay = retry_delay_ms(config.initial_delay_ms, attempt);
                    tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                }
                last_error = Some(e);
            }
        }
    }
    Err(last_error.expect("loop runs at least once"))
}

async fn download_one(item: &DownloadItem, stop: &AtomicBool) -> DownloadResult<()> {
    let parent = item
        .destination
        .parent()
        .ok_or_else(|| DownloadError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "destination has no parent directory",
        )))?;
    fs::create_dir_all(parent).await?;

    let response = HTTP_CLIENT.get(&item.url).send().await?;
    if !response.status().is_success() {
        return Err(DownloadError::HttpStatus(response.status().as_u16()));
    }

    let tmp_path = parent.join(format!(".part-{:x}", fastrand::u64(..)));
    let write_result = stream_to_temp(response, &tmp_path, item.expected_sha1.as_deref(), stop).await;

    match write_result {
        Ok(()) => {
            fs::rename(&tmp_path, &item.destination).await?;
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp_path).await;
            Err(e)
        }
    }
}

async fn stream_to_temp(
    response: reqwest::Response,
    tmp_path: &std::path::Path,
    expected_sha1: Option<&str>,
    stop: &AtomicBool,
) -> DownloadResult<()> {
    let mut file = fs::File::create(tmp_path).await?;
    let mut hasher = Sha1::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        if stop.load(Ordering::Relaxed) {
            return Err(DownloadError::Cancelled);
        }
        let chunk = chunk?;
        hasher.update(&chunk);
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    if let Some(expected) = expected_sha1 {
        let actual = hex::encode(hasher.finalize());
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(DownloadError::HashMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
    }
    Ok(())
}

fn tracing_warn(url: &str, attempt: u32, max: u32, error: &DownloadError) {
    crate::trace_warn!("[retry {}/{}] {} failed: {}", attempt, max, url, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_size_is_none_when_any_item_omits_size() {
        let items = vec![
            DownloadItem::new("http://x/a", "/tmp/a").with_size(10),
            DownloadItem::new("http://x/b", "/tmp/b"),
        ];
        assert_eq!(total_size(&items), None);
    }

    #[test]
    fn total_size_sums_when_all_items_declare_size() {
        let items = vec![
            DownloadItem::new("http://x/a", "/tmp/a").with_size(10),
            DownloadItem::new("http://x/b", "/tmp/b").with_size(32),
        ];
        assert_eq!(total_size(&items), Some(42));
    }

    #[test]
    fn retry_delay_grows_exponentially_with_jitter_bounded() {
        let d1 = retry_delay_ms(20, 1);
        let d2 = retry_delay_ms(20, 2);
        assert!(d1 >= 20 && d1 <= 30);
        assert!(d2 >= 40 && d2 <= 60);
    }
}
