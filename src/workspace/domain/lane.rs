//! Lanes: ordered columns within a board.

use super::{BoardId, EntityKind, LaneId, Position, Positioned, Title, WorkspaceDomainError};
use serde::{Deserialize, Serialize};

/// Titles of the lanes created with every new board, in display order.
pub const DEFAULT_LANE_TITLES: [&str; 3] = ["Todo", "In Progress", "Done"];

/// Ordered column within a board. The parent board never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    id: LaneId,
    title: Title,
    position: Position,
    board_id: BoardId,
}

/// Partial update for a lane. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanePatch {
    /// New title.
    pub title: Option<String>,
    /// New position.
    pub position: Option<Position>,
}

/// Validated lane changes. Storage writes only the fields that are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneChanges {
    /// New title.
    pub title: Option<Title>,
    /// New position.
    pub position: Option<Position>,
}

impl LanePatch {
    /// Validates the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when a blank title is
    /// supplied.
    pub fn validate(self) -> Result<LaneChanges, WorkspaceDomainError> {
        Ok(LaneChanges {
            title: self
                .title
                .map(|title| Title::new(EntityKind::Lane, title))
                .transpose()?,
            position: self.position,
        })
    }
}

impl LaneChanges {
    /// Returns whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.position.is_none()
    }
}

impl Lane {
    /// Creates a lane on `board_id` at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        position: Position,
        board_id: BoardId,
    ) -> Result<Self, WorkspaceDomainError> {
        Ok(Self {
            id: LaneId::new(),
            title: Title::new(EntityKind::Lane, title)?,
            position,
            board_id,
        })
    }

    /// Reconstructs a lane from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: LaneId,
        title: Title,
        position: Position,
        board_id: BoardId,
    ) -> Self {
        Self {
            id,
            title,
            position,
            board_id,
        }
    }

    /// Returns the lane identifier.
    #[must_use]
    pub const fn id(&self) -> LaneId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the position among siblings.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the parent board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Applies the supplied fields of `patch`.
    ///
    /// Validation happens before any field changes, so a rejected patch
    /// leaves the lane untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when a blank title is
    /// supplied.
    pub fn apply(&mut self, patch: LanePatch) -> Result<(), WorkspaceDomainError> {
        self.apply_changes(patch.validate()?);
        Ok(())
    }

    /// Writes the set fields of already validated `changes`.
    pub fn apply_changes(&mut self, changes: LaneChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
    }
}

impl Positioned for Lane {
    fn position(&self) -> Position {
        self.position
    }
}
