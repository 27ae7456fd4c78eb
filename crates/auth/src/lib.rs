// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Authentication module for picomc
//!
//! Provides multiple authentication providers and a trait-based system for custom implementations.
//!
//! ## Built-in Providers
//!
//! - **Offline**: no network authentication, generates a deterministic UUID
//!   from the username.
//!
//! Online providers (Microsoft device-code flow, third-party CMS login) are
//! credential-acquisition concerns and live outside this crate; implement
//! [`Authenticator`] against whatever client you use and this crate's
//! [`Account`] contract stays the same either way.
//!
//! ## Helpers
//!
//! Use the `generate_offline_uuid()` function to create deterministic UUIDs:
//!
//! ```rust
//! use picomc_auth::generate_offline_uuid;
//!
//! let uuid = generate_offline_uuid("PlayerName");
//! println!("UUID: {}", uuid); // Always the same for this username
//! ```

mod account;
mod auth;
mod errors;

pub mod offline;

// Re-export core types
pub use account::{Account, AccountType};
pub use auth::{AuthResult, Authenticator, UserProfile, generate_offline_uuid};
pub use errors::AuthError;
