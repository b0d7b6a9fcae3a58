//! Task aggregate: a unit of work placed in a lane.

use super::{
    EntityKind, LaneId, Position, Positioned, Priority, TaskId, Title, WorkspaceDomainError,
};
use crate::identity::domain::OwnerId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Unit of work. Access is anchored on the creating owner, not on whichever
/// board currently contains the task's lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: Title,
    description: Option<String>,
    priority: Priority,
    position: Position,
    lane_id: Option<LaneId>,
    owner_id: OwnerId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fields needed to create a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority.
    pub priority: Priority,
    /// Position within the lane.
    pub position: Position,
    /// Containing lane.
    pub lane_id: LaneId,
    /// Creating owner.
    pub owner_id: OwnerId,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted position.
    pub position: Position,
    /// Containing lane; `None` only for orphaned rows.
    pub lane_id: Option<LaneId>,
    /// Creating owner.
    pub owner_id: OwnerId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a task. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New priority.
    pub priority: Option<Priority>,
    /// Destination lane.
    pub lane_id: Option<LaneId>,
    /// New position.
    pub position: Option<Position>,
}

impl TaskPatch {
    /// Returns a patch that moves a task to `lane_id` at `position`.
    #[must_use]
    pub const fn relocate(lane_id: LaneId, position: Position) -> Self {
        Self {
            title: None,
            description: None,
            priority: None,
            lane_id: Some(lane_id),
            position: Some(position),
        }
    }

    /// Validates the supplied fields and stamps the modification time.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when a blank title is
    /// supplied.
    pub fn validate(self, clock: &impl Clock) -> Result<TaskChanges, WorkspaceDomainError> {
        Ok(TaskChanges {
            title: self
                .title
                .map(|title| Title::new(EntityKind::Task, title))
                .transpose()?,
            description: self.description,
            priority: self.priority,
            lane_id: self.lane_id,
            position: self.position,
            updated_at: clock.utc(),
        })
    }
}

/// Validated task changes. Storage writes only the fields that are set,
/// plus `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<Title>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New priority.
    pub priority: Option<Priority>,
    /// Destination lane.
    pub lane_id: Option<LaneId>,
    /// New position.
    pub position: Option<Position>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskChanges {
    /// Returns whether the task's lane or position changes.
    #[must_use]
    pub const fn repositions(&self) -> bool {
        self.lane_id.is_some() || self.position.is_some()
    }
}

impl Task {
    /// Creates a task in `draft.lane_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when the title is blank.
    pub fn new(draft: NewTask, clock: &impl Clock) -> Result<Self, WorkspaceDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: Title::new(EntityKind::Task, draft.title)?,
            description: draft.description,
            priority: draft.priority,
            position: draft.position,
            lane_id: Some(draft.lane_id),
            owner_id: draft.owner_id,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            position: data.position,
            lane_id: data.lane_id,
            owner_id: data.owner_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
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

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the position among siblings.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the containing lane, if any.
    #[must_use]
    pub const fn lane_id(&self) -> Option<LaneId> {
        self.lane_id
    }

    /// Returns the creating owner.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether `owner_id` created this task.
    #[must_use]
    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }

    /// Applies the supplied fields of `patch` and refreshes `updated_at`.
    ///
    /// Validation happens before any field changes, so a rejected patch
    /// leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when a blank title is
    /// supplied.
    pub fn apply(
        &mut self,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), WorkspaceDomainError> {
        self.apply_changes(patch.validate(clock)?);
        Ok(())
    }

    /// Writes the set fields of already validated `changes`.
    pub fn apply_changes(&mut self, changes: TaskChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(lane_id) = changes.lane_id {
            self.lane_id = Some(lane_id);
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        self.updated_at = changes.updated_at;
    }
}

impl Positioned for Task {
    fn position(&self) -> Position {
        self.position
    }
}
