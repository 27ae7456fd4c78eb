pub mod app_state;
pub mod download;
pub mod errors;
pub mod extract;
pub mod hash;
pub mod hosts;
pub mod macros;
pub mod store;
pub mod system;

pub use app_state::AppState;
pub use download::{DownloadItem, DownloadReport, Downloader, DownloaderConfig};
pub use errors::{
    AppStateError, AppStateResult, DownloadError, DownloadResult, ExtractError, ExtractResult,
    StoreError, StoreResult, SystemError, SystemResult,
};
pub use hash::{
    calculate_file_sha1_sync, calculate_sha1_bytes, calculate_sha1_bytes_raw, verify_file_sha1,
    verify_file_sha1_streaming, verify_file_sha1_sync, HashError, HashResult,
};
pub use hosts::HTTP_CLIENT;
pub use store::HashedStore;
pub use system::{ArchTag, OsTag, ARCHITECTURE, OS};

/// Constant launcher identifier substituted into the `launcher_name`
/// placeholder.
pub const LAUNCHER_NAME: &str = "picomc-core";
pub const LAUNCHER_VERSION: &str = env!("CARGO_PKG_VERSION");
