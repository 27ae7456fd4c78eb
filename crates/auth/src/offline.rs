// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Offline authentication - no network required
//!
//! Generates a deterministic UUID (RFC 4122 v3, MD5-based) from the
//! username. No token validation or verification.

use crate::{Authenticator, AuthError, AuthResult, UserProfile, generate_offline_uuid};

/// Offline authenticator
///
/// Generates a deterministic UUID from the username without any network calls.
/// Suitable for offline play or testing.
///
/// # Example
/// ```no_run
/// use picomc_auth::offline::OfflineAuth;
/// use picomc_auth::Authenticator;
///
/// #[tokio::main]
/// async fn main() {
///     let mut auth = OfflineAuth::new("Player123");
///     let profile = auth.authenticate().await.unwrap();
///     println!("UUID: {}", profile.uuid);
/// }
/// ```
pub struct OfflineAuth {
    username: String,
}

impl OfflineAuth {
    /// Create a new offline authenticator
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Get the username
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Authenticator for OfflineAuth {
    async fn authenticate(&mut self) -> AuthResult<UserProfile> {
        if self.username.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        if self.username.len() < 3 || self.username.len() > 16 {
            return Err(AuthError::Custom(
                "Username must be between 3 and 16 characters".to_string(),
            ));
        }

        if !self.username.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(AuthError::Custom(
                "Username can only contain letters, numbers, and underscores".to_string(),
            ));
        }

        let uuid = generate_offline_uuid(&self.username);

        Ok(UserProfile {
            username: self.username.clone(),
            uuid,
            access_token: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn authenticates_with_deterministic_uuid() {
        let mut auth = OfflineAuth::new("Notch");
        let profile = auth.authenticate().await.unwrap();
        assert_eq!(profile.uuid, "069a79f444e94726a5befca90e38aaf5");
        assert!(profile.access_token.is_none());
    }

    #[tokio::test]
    async fn rejects_invalid_characters() {
        let mut auth = OfflineAuth::new("bad name!");
        assert!(auth.authenticate().await.is_err());
    }

    #[tokio::test]
    async fn rejects_too_short_username() {
        let mut auth = OfflineAuth::new("ab");
        assert!(auth.authenticate().await.is_err());
    }
}
