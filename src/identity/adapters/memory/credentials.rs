//! In-memory credential service.
//!
//! Passwords are stored as salted SHA-256 digests in the form
//! `sha256$<salt>$<hex>`. Tokens are random opaque strings whose claims are
//! kept in process memory until they expire; they do not survive a restart.
//! Expired entries are dropped whenever a new token is issued.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::identity::{
    domain::{AccessToken, PasswordDigest, TokenClaims},
    ports::{CredentialError, CredentialResult, CredentialService},
};

const DIGEST_SCHEME: &str = "sha256";

/// Credential service holding issued tokens in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCredentialService<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    tokens: Arc<RwLock<HashMap<String, IssuedToken>>>,
}

#[derive(Debug, Clone)]
struct IssuedToken {
    claims: TokenClaims,
    expires_at: DateTime<Utc>,
}

impl<C> InMemoryCredentialService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a credential service that reads time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of tokens currently held, expired or not.
    #[cfg(test)]
    pub(crate) fn held_tokens(&self) -> usize {
        self.tokens.read().map_or(0, |tokens| tokens.len())
    }
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
            == 0
}

fn lock_error(err: impl std::fmt::Display) -> CredentialError {
    CredentialError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> CredentialService for InMemoryCredentialService<C>
where
    C: Clock + Send + Sync,
{
    async fn hash(&self, password: &str) -> CredentialResult<PasswordDigest> {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = salted_digest(&salt, password);
        Ok(PasswordDigest::new(format!("{DIGEST_SCHEME}${salt}${digest}")))
    }

    async fn verify(&self, password: &str, digest: &PasswordDigest) -> CredentialResult<bool> {
        let mut parts = digest.as_str().split('$');
        let (Some(DIGEST_SCHEME), Some(salt), Some(expected), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CredentialError::MalformedDigest);
        };
        let actual = salted_digest(salt, password);
        Ok(constant_time_eq(actual.as_bytes(), expected.as_bytes()))
    }

    async fn issue_token(
        &self,
        claims: TokenClaims,
        ttl: chrono::Duration,
    ) -> CredentialResult<AccessToken> {
        let token = format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );
        let now = self.clock.utc();
        let expires_at = now + ttl;
        let mut tokens = self.tokens.write().map_err(lock_error)?;
        tokens.retain(|_, issued| issued.expires_at > now);
        tokens.insert(token.clone(), IssuedToken { claims, expires_at });
        Ok(AccessToken::new(token, expires_at))
    }

    async fn verify_token(&self, token: &str) -> CredentialResult<TokenClaims> {
        let mut tokens = self.tokens.write().map_err(lock_error)?;
        let issued = tokens
            .get(token)
            .cloned()
            .ok_or(CredentialError::InvalidToken)?;
        if self.clock.utc() >= issued.expires_at {
            tokens.remove(token);
            return Err(CredentialError::ExpiredToken);
        }
        Ok(issued.claims)
    }
}
