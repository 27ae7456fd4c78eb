use thiserror::Error;

/// Authentication errors.
///
/// Online providers (implemented outside this crate against
/// [`crate::Authenticator`]) report their own network/protocol failures
/// through [`AuthError::Custom`] rather than this crate growing a variant
/// per backend.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired or invalid")]
    InvalidToken,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}
