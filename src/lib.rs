// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! picomc - A modern Minecraft launcher core library
//!
//! This library provides the core subsystem needed to build a custom
//! Minecraft launcher:
//! - Authentication contract (`Account`) + trait-based extensibility
//! - Java runtime management (distribution download, process execution)
//! - Version specification resolution (inheritance-chain merging, platform
//!   rules, library/asset resolution, upstream manifest)
//! - Content-addressed storage and a bounded-concurrency downloader
//! - Launch composition: classpath/argument building, native extraction,
//!   per-instance directories, two-layer config overlays, JVM supervision
//!
//! ## Quick Start
//!
//! ```no_run
//! use picomc_core_launcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app_root = core::AppState::app_root();
//!
//!     let account = Account::offline("Player");
//!
//!     let store = InstanceStore::new(instances_root(&app_root));
//!     let instance = match store.get("my-instance").await {
//!         Ok(instance) => instance,
//!         Err(_) => store.create("my-instance", "1.21.1").await?,
//!     };
//!
//!     let composer = LaunchComposer::new(
//!         app_root.join("versions"),
//!         app_root.join("libraries"),
//!         app_root.join("assets"),
//!     );
//!     let global = ConfigOverlay::open_global(&app_root.join("config.json")).await?;
//!     let mut config = instance.load_config(&global).await?;
//!
//!     composer
//!         .launch("1.21.1", None, &instance, &mut config, &account, std::path::Path::new("java"), true)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// Authentication Module
// ============================================================================

pub mod auth {
    //! Authentication contract and the built-in offline provider.
    //!
    //! ## Built-in Providers
    //! - `OfflineAuth` - No network required
    //!
    //! Online providers (Microsoft device-code flow, third-party CMS login)
    //! are credential-acquisition concerns outside this crate's scope;
    //! implement [`Authenticator`] against whatever client you use and
    //! [`Account`] stays the contract either way.

    pub use picomc_auth::{
        generate_offline_uuid, offline::OfflineAuth, Account, AccountType, AuthError,
        AuthResult, Authenticator, UserProfile,
    };
}

// ============================================================================
// Java Module
// ============================================================================

pub mod java {
    //! Java runtime management
    //!
    //! Handles automatic download and installation of Java distributions:
    //! - Temurin (Eclipse Adoptium)
    //! - GraalVM
    //! - Zulu (Azul)
    //! - Liberica (BellSoft)

    pub use picomc_java::{
        jre_downloader, runtime::JavaRuntime, DistributionError, DistributionResult,
        DistributionSelection, JavaDistribution, JavaRuntimeError, JavaRuntimeResult, JreError,
        JreResult,
    };
}

// ============================================================================
// Vspec Module
// ============================================================================

pub mod vspec {
    //! Version specification resolution
    //!
    //! - Inheritance-chain merging of the raw version document tree
    //! - Platform rule evaluation (`RuleEngine`)
    //! - Maven coordinate parsing and native library classifier resolution
    //! - Asset index fetch/verify/materialize
    //! - Upstream version manifest with metaversion and type-mask filtering

    pub use picomc_vspec::{
        asset, library, manifest, raw, resolver, rule, AssetIndex, AssetObject, AssetResolver,
        Coordinate, LibraryResolver, RawVspec, ResolvedLibrary, ResolvedVspec, Environment,
        Rule, RuleEngine, TypeMask, VersionManager, VersionManifest, VspecError, VspecResolver,
        VspecResult,
    };
}

// ============================================================================
// Launch Module
// ============================================================================

pub mod launch {
    //! Launch composition: classpath/argument building, native extraction,
    //! JVM supervision, per-instance directories, and config overlays.

    pub use picomc_launch::{
        ComposeInputs, ConfigOverlay, Instance, InstanceStore, JavaInfo, LaunchComposer,
        LaunchError, LaunchResult, NativesGuard,
    };

    pub use picomc_launch::instance::{instances_root, sanitize};

    /// Placeholder substitution and game/JVM argument building.
    pub mod arguments {
        pub use picomc_launch::arguments::{
            game_arguments, jvm_arguments, substitute, PlaceholderContext,
        };
    }

    /// Config overlay keys shared between the global and per-instance layers.
    pub mod config {
        pub use picomc_launch::config::{
            default_java_path, KEY_JAVA_JVMARGS, KEY_JAVA_MEMORY_MAX, KEY_JAVA_MEMORY_MIN,
            KEY_JAVA_PATH, KEY_VERSION,
        };
    }
}

// ============================================================================
// Core Module
// ============================================================================

pub mod core {
    //! Core utilities and system operations
    //!
    //! Provides low-level functionality:
    //! - Application data-directory resolution
    //! - Content-addressed storage (`HashedStore`)
    //! - Bounded-concurrency downloader with retry/backoff
    //! - Archive extraction (ZIP, TAR.GZ)
    //! - SHA1 hashing and verification
    //! - Host OS/arch tags

    pub use picomc_core::{
        extract, hash, hosts, store, system, AppState, AppStateError, AppStateResult, ArchTag,
        DownloadError, DownloadItem, DownloadReport, DownloadResult, Downloader,
        DownloaderConfig, ExtractError, ExtractResult, HashError, HashResult, HashedStore,
        OsTag, StoreError, StoreResult, SystemError, SystemResult, ARCHITECTURE, LAUNCHER_NAME,
        LAUNCHER_VERSION, OS,
    };
}

// ============================================================================
// Macros Module
// ============================================================================

pub mod macros {
    //! Utility macros
    //!
    //! Provides conditional tracing macros that work with or without the
    //! `tracing` feature:
    //! - `trace_debug!()` / `trace_info!()` / `trace_warn!()` / `trace_error!()`
    //! - `time_it!()` - Performance timing (no-op without `tracing` feature)
    //!
    //! File system utilities:
    //! - `mkdir!()` - Async directory creation with error logging
    //! - `join_and_mkdir!()` / `join_and_mkdir_vec!()`
    //! - `mkdir_blocking!()` - Blocking directory creation

    pub use picomc_core::{
        join_and_mkdir, join_and_mkdir_vec, mkdir, mkdir_blocking, time_it, trace_debug,
        trace_error, trace_info, trace_warn,
    };
}

// ============================================================================
// Prelude - Commonly used imports
// ============================================================================

pub mod prelude {
    //! Convenient re-exports of most commonly used types
    //!
    //! ```
    //! use picomc_core_launcher::prelude::*;
    //! ```

    // Authentication
    pub use crate::auth::{Account, Authenticator, OfflineAuth, UserProfile};

    // Java
    pub use crate::java::JavaDistribution;

    // Vspec
    pub use crate::vspec::{ResolvedVspec, VersionManifest, VspecResolver};

    // Launch
    pub use crate::launch::{instances_root, ConfigOverlay, Instance, InstanceStore, LaunchComposer};

    pub use crate::core;
}

// ============================================================================
// Root re-exports for convenience
// ============================================================================

pub use auth::Account;
pub use java::JavaDistribution;
pub use launch::LaunchComposer;

// Re-export the crates themselves for advanced usage
#[doc(hidden)]
pub use picomc_auth as _auth;
#[doc(hidden)]
pub use picomc_core as _core;
#[doc(hidden)]
pub use picomc_java as _java;
#[doc(hidden)]
pub use picomc_launch as _launch;
#[doc(hidden)]
pub use picomc_vspec as _vspec;
