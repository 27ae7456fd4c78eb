use thiserror::Error;

/// Errors raised while resolving a version specification chain, evaluating
/// its libraries, or fetching/verifying its asset index.
#[derive(Debug, Error)]
pub enum VspecError {
    #[error("version '{0}' not found in manifest")]
    VersionNotFound(String),

    #[error("cyclic inheritance detected at '{0}'")]
    CyclicInheritance(String),

    #[error("missing required field '{field}' in vspec '{id}'")]
    MissingField { id: String, field: String },

    #[error("malformed vspec JSON for '{id}': {source}")]
    Malformed {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("vspec '{0}' is not present on disk and could not be fetched")]
    NotCached(String),

    #[error("invalid library coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("hash error: {0}")]
    Hash(#[from] picomc_core::HashError),

    #[error("store error: {0}")]
    Store(#[from] picomc_core::StoreError),
}

pub type VspecResult<T> = std::result::Result<T, VspecError>;
