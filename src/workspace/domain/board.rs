//! Board aggregate root.

use super::{BoardId, EntityKind, Title, WorkspaceDomainError};
use crate::identity::domain::OwnerId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Top-level container of lanes, owned by exactly one owner for its whole
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    title: Title,
    description: Option<String>,
    owner_id: OwnerId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Owning account.
    pub owner_id: OwnerId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        owner_id: OwnerId,
        clock: &impl Clock,
    ) -> Result<Self, WorkspaceDomainError> {
        Ok(Self {
            id: BoardId::new(),
            title: Title::new(EntityKind::Board, title)?,
            description,
            owner_id,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            owner_id: data.owner_id,
            created_at: data.created_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether `owner_id` owns this board.
    #[must_use]
    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }
}
