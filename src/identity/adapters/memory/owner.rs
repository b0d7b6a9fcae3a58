//! In-memory repository for owner accounts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, Owner, OwnerId},
    ports::{OwnerRepository, OwnerRepositoryError, OwnerRepositoryResult},
};

/// Thread-safe in-memory owner repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOwnerRepository {
    state: Arc<RwLock<InMemoryOwnerState>>,
}

#[derive(Debug, Default)]
struct InMemoryOwnerState {
    owners: HashMap<OwnerId, Owner>,
    email_index: HashMap<EmailAddress, OwnerId>,
}

impl InMemoryOwnerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> OwnerRepositoryError {
    OwnerRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl OwnerRepository for InMemoryOwnerRepository {
    async fn store(&self, owner: &Owner) -> OwnerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.email_index.contains_key(owner.email()) {
            return Err(OwnerRepositoryError::DuplicateEmail(owner.email().clone()));
        }
        state.email_index.insert(owner.email().clone(), owner.id());
        state.owners.insert(owner.id(), owner.clone());
        Ok(())
    }

    async fn update(&self, owner: &Owner) -> OwnerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous_email = state
            .owners
            .get(&owner.id())
            .ok_or(OwnerRepositoryError::NotFound(owner.id()))?
            .email()
            .clone();

        if let Some(holder) = state.email_index.get(owner.email())
            && *holder != owner.id()
        {
            return Err(OwnerRepositoryError::DuplicateEmail(owner.email().clone()));
        }

        state.email_index.remove(&previous_email);
        state.email_index.insert(owner.email().clone(), owner.id());
        state.owners.insert(owner.id(), owner.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OwnerId) -> OwnerRepositoryResult<Option<Owner>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.owners.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> OwnerRepositoryResult<Option<Owner>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.owners.get(id))
            .cloned())
    }

    async fn list_all(&self) -> OwnerRepositoryResult<Vec<Owner>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut owners: Vec<Owner> = state.owners.values().cloned().collect();
        owners.sort_by_key(|owner| (owner.created_at(), owner.id().into_inner()));
        Ok(owners)
    }
}
