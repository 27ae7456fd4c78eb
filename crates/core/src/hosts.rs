// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Shared HTTP client for every component that talks to an upstream host
//! (version manifest, vspec nodes, libraries, asset objects).

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;

/// Single pooled client reused across the workspace: connection reuse
/// matters when the asset resolver fans out thousands of small object
/// requests against the same host.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .pool_max_idle_per_host(100)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .http2_initial_stream_window_size(Some(2 * 1024 * 1024))
        .http2_initial_connection_window_size(Some(4 * 1024 * 1024))
        .http2_adaptive_window(true)
        .http2_max_frame_size(Some(16 * 1024))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(5))
        .zstd(true)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("static HTTP client configuration is always valid")
});
