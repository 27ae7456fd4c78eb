use std::future::Future;
use serde::{Deserialize, Serialize};
use crate::AuthError;

pub type AuthResult<T> = Result<T, AuthError>;

/// User profile returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Username
    pub username: String,

    /// Minecraft UUID (with dashes)
    pub uuid: String,

    /// Access token for session validation
    pub access_token: Option<String>,
}

/// Core authentication trait
///
/// All authentication providers must implement this trait
pub trait Authenticator {
    /// Authenticate a user and return their profile.
    fn authenticate(&mut self) -> impl Future<Output = AuthResult<UserProfile>> + Send;

    /// Verify if a token is still valid
    ///
    /// # Arguments
    /// - `token`: The access token to verify
    ///
    /// # Returns
    /// - `Ok(UserProfile)` if token is valid
    /// - `Err(AuthError)` if token is invalid or expired
    fn verify(&self, token: &str) -> impl Future<Output = AuthResult<UserProfile>> + Send {
        async move {
            let _ = token;
            Err(AuthError::Custom("Verification not supported for this provider".into()))
        }
    }

    /// Logout and invalidate the token
    ///
    /// # Arguments
    /// - `token`: The access token to invalidate
    fn logout(&self, token: &str) -> impl Future<Output = AuthResult<()>> + Send {
        async move {
            let _ = token;
            Ok(())
        }
    }
}

/// Derives a deterministic offline-mode UUID from a username.
///
/// RFC 4122 version 3 (MD5-based) over a zero (nil) namespace and the ASCII
/// string `OfflinePlayer:<name>` — the same derivation Mojang's authlib uses
/// for offline/LAN sessions, so the UUID a server sees matches the one the
/// client launched with. Returned as a plain 32-character hex string (no
/// dashes), matching the `Account.uuid` contract.
pub fn generate_offline_uuid(username: &str) -> String {
    let name = format!("OfflinePlayer:{username}");
    let uuid = uuid::Uuid::new_v3(&uuid::Uuid::nil(), name.as_bytes());
    uuid.simple().to_string()
}

#[cfg(test)]
mod offline_uuid_tests {
    use super::generate_offline_uuid;

    #[test]
    fn matches_known_test_vector() {
        assert_eq!(
            generate_offline_uuid("Notch"),
            "069a79f444e94726a5befca90e38aaf5"
        );
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(generate_offline_uuid("Player"), generate_offline_uuid("Player"));
    }
}
