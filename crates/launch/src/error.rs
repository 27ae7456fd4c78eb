// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("instance '{0}' not found")]
    InstanceNotFound(String),

    #[error("instance '{0}' already exists")]
    InstanceAlreadyExists(String),

    #[error("instance name '{0}' is invalid")]
    InvalidInstanceName(String),

    #[error("java binary not found at {0}")]
    JavaNotFound(String),

    #[error("java info probe failed: {0}")]
    JavaProbeFailed(String),

    #[error("vspec error: {0}")]
    Vspec(#[from] picomc_vspec::VspecError),

    #[error("store error: {0}")]
    Store(#[from] picomc_core::StoreError),

    #[error("extract error: {0}")]
    Extract(#[from] picomc_core::ExtractError),

    #[error("the resolved version has no main class")]
    MissingMainClass,

    #[error("the resolved version has no game jar")]
    MissingGameJar,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to spawn java process: {0}")]
    Spawn(std::io::Error),

    #[error("java process exited with non-zero code {0}")]
    NonZeroExit(i32),
}

pub type LaunchResult<T> = std::result::Result<T, LaunchError>;
