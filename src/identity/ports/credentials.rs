//! Credential service port: password hashing and access token handling.

use crate::identity::domain::{AccessToken, PasswordDigest, TokenClaims};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Password hashing and token issuance contract.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Hashes a plaintext password.
    async fn hash(&self, password: &str) -> CredentialResult<PasswordDigest>;

    /// Checks a plaintext password against a stored digest.
    async fn verify(&self, password: &str, digest: &PasswordDigest) -> CredentialResult<bool>;

    /// Issues an access token carrying `claims` that expires after `ttl`.
    async fn issue_token(
        &self,
        claims: TokenClaims,
        ttl: chrono::Duration,
    ) -> CredentialResult<AccessToken>;

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidToken`] for unknown or malformed
    /// tokens and [`CredentialError::ExpiredToken`] once the token's lifetime
    /// has elapsed.
    async fn verify_token(&self, token: &str) -> CredentialResult<TokenClaims>;
}

/// Errors returned by credential service implementations.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    /// The token is unknown or malformed.
    #[error("token is invalid")]
    InvalidToken,

    /// The token has expired.
    #[error("token has expired")]
    ExpiredToken,

    /// The stored digest is not in a recognised format.
    #[error("malformed password digest")]
    MalformedDigest,

    /// Backend failure.
    #[error("credential backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl CredentialError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
