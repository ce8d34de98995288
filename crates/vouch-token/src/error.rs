//! Error types for the token crate.

use thiserror::Error;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing backend could not be initialized.
    #[error("token signing unavailable: {0}")]
    Configuration(String),

    /// The token's validity window has passed.
    #[error("token has expired")]
    Expired,

    /// Malformed structure, bad signature, or wrong algorithm.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Signing a claim set failed after construction.
    #[error("failed to sign claims: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// Classify a decode failure, keeping expiry distinct from everything else.
    pub(crate) fn from_decode(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(err),
        }
    }
}
