//! Repository port for the board → lane → task hierarchy.
//!
//! Every method is one storage transaction. Multi-row mutations (a board with
//! its default lanes, cascading deletes) either persist completely or not at
//! all.

use crate::identity::domain::OwnerId;
use crate::workspace::domain::{
    Board, BoardId, EntityRef, Lane, LaneChanges, LaneId, Task, TaskChanges, TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for hierarchy repository operations.
pub type HierarchyRepositoryResult<T> = Result<T, HierarchyRepositoryError>;

/// Persistence contract for boards, lanes, and tasks.
#[async_trait]
pub trait HierarchyRepository: Send + Sync {
    /// Stores a board together with its initial lanes atomically.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::Duplicate`] when any identifier
    /// already exists; nothing is stored in that case.
    async fn insert_board(&self, board: &Board, lanes: &[Lane]) -> HierarchyRepositoryResult<()>;

    /// Finds a board by identifier.
    async fn find_board(&self, id: BoardId) -> HierarchyRepositoryResult<Option<Board>>;

    /// Lists the boards owned by `owner_id`, oldest first.
    async fn list_boards_by_owner(&self, owner_id: OwnerId)
    -> HierarchyRepositoryResult<Vec<Board>>;

    /// Deletes a board, its lanes, and their tasks atomically.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::NotFound`] when the board does not
    /// exist.
    async fn delete_board(&self, id: BoardId) -> HierarchyRepositoryResult<()>;

    /// Stores a new lane.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::NotFound`] when the parent board
    /// does not exist.
    async fn insert_lane(&self, lane: &Lane) -> HierarchyRepositoryResult<()>;

    /// Finds a lane by identifier.
    async fn find_lane(&self, id: LaneId) -> HierarchyRepositoryResult<Option<Lane>>;

    /// Finds a lane whose parent board is owned by `owner_id`, returning the
    /// lane together with that board.
    async fn find_lane_for_owner(
        &self,
        id: LaneId,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Option<(Lane, Board)>>;

    /// Lists a board's lanes in ascending position.
    async fn list_lanes_by_board(&self, board_id: BoardId) -> HierarchyRepositoryResult<Vec<Lane>>;

    /// Writes the set fields of `changes` to a lane and returns the stored
    /// result. Fields left unset keep whatever value is stored, including
    /// values written concurrently by other callers.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::NotFound`] when the lane does not
    /// exist.
    async fn update_lane(
        &self,
        id: LaneId,
        changes: &LaneChanges,
    ) -> HierarchyRepositoryResult<Lane>;

    /// Deletes a lane and its tasks atomically.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::NotFound`] when the lane does not
    /// exist.
    async fn delete_lane(&self, id: LaneId) -> HierarchyRepositoryResult<()>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::NotFound`] when the task's lane
    /// does not exist.
    async fn insert_task(&self, task: &Task) -> HierarchyRepositoryResult<()>;

    /// Finds a task created by `owner_id`.
    ///
    /// Returns `None` both when the task is absent and when another owner
    /// created it.
    async fn find_task_for_owner(
        &self,
        id: TaskId,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Option<Task>>;

    /// Lists a lane's tasks in ascending position.
    async fn list_tasks_by_lane(&self, lane_id: LaneId) -> HierarchyRepositoryResult<Vec<Task>>;

    /// Writes the set fields of `changes` to a task and returns the stored
    /// result. Fields left unset keep whatever value is stored.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::NotFound`] when the task or its
    /// new lane does not exist.
    async fn update_task(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> HierarchyRepositoryResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> HierarchyRepositoryResult<()>;
}

/// Errors returned by hierarchy repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HierarchyRepositoryError {
    /// An entity with the same identifier already exists.
    #[error("duplicate identifier for {0}")]
    Duplicate(EntityRef),

    /// The entity, or the parent it refers to, was not found.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HierarchyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
