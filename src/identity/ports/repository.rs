//! Repository port for owner persistence and lookup.

use crate::identity::domain::{EmailAddress, Owner, OwnerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for owner repository operations.
pub type OwnerRepositoryResult<T> = Result<T, OwnerRepositoryError>;

/// Owner persistence contract.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Stores a new owner.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerRepositoryError::DuplicateEmail`] when another owner
    /// already uses the email address.
    async fn store(&self, owner: &Owner) -> OwnerRepositoryResult<()>;

    /// Persists changes to an existing owner.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerRepositoryError::NotFound`] when the owner does not
    /// exist or [`OwnerRepositoryError::DuplicateEmail`] when the new email
    /// belongs to someone else.
    async fn update(&self, owner: &Owner) -> OwnerRepositoryResult<()>;

    /// Finds an owner by identifier.
    async fn find_by_id(&self, id: OwnerId) -> OwnerRepositoryResult<Option<Owner>>;

    /// Finds an owner by normalized email address.
    async fn find_by_email(&self, email: &EmailAddress) -> OwnerRepositoryResult<Option<Owner>>;

    /// Returns every owner ordered by registration time.
    async fn list_all(&self) -> OwnerRepositoryResult<Vec<Owner>>;
}

/// Errors returned by owner repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OwnerRepositoryError {
    /// The email address is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// The owner was not found.
    #[error("owner not found: {0}")]
    NotFound(OwnerId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OwnerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
