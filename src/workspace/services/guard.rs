//! Ownership checks for boards, lanes, and tasks.
//!
//! Boards and lanes are authorized through the owning board; tasks through
//! their creator, whichever board currently holds their lane. The two paths
//! are kept separate so an owner can reassign a task between their own
//! boards.

use super::error::{WorkspaceServiceError, WorkspaceServiceResult};
use crate::identity::domain::Principal;
use crate::workspace::{
    domain::{Board, BoardId, EntityRef, Lane, LaneId, Task, TaskId},
    ports::HierarchyRepository,
};
use std::sync::Arc;

/// Returns whether the principal owns `board`.
#[must_use]
pub fn owns_board(principal: &Principal, board: &Board) -> bool {
    board.is_owned_by(principal.id())
}

/// Returns whether the principal created `task`.
#[must_use]
pub fn owns_task(principal: &Principal, task: &Task) -> bool {
    task.is_owned_by(principal.id())
}

/// Resolves entities on behalf of a principal, failing when the principal may
/// not act on them.
#[derive(Debug)]
pub struct OwnershipGuard<R>
where
    R: HierarchyRepository,
{
    hierarchy: Arc<R>,
}

impl<R> Clone for OwnershipGuard<R>
where
    R: HierarchyRepository,
{
    fn clone(&self) -> Self {
        Self {
            hierarchy: Arc::clone(&self.hierarchy),
        }
    }
}

impl<R> OwnershipGuard<R>
where
    R: HierarchyRepository,
{
    /// Creates a guard backed by `hierarchy`.
    #[must_use]
    pub const fn new(hierarchy: Arc<R>) -> Self {
        Self { hierarchy }
    }

    /// Returns the board if the principal owns it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`] when the board is absent
    /// or owned by someone else.
    pub async fn authorize_board(
        &self,
        principal: &Principal,
        board_id: BoardId,
    ) -> WorkspaceServiceResult<Board> {
        let board = self
            .hierarchy
            .find_board(board_id)
            .await?
            .ok_or(WorkspaceServiceError::NotFound(board_id.into()))?;
        if !owns_board(principal, &board) {
            tracing::debug!(
                principal = %principal.id(),
                board = %board_id,
                "board access denied"
            );
            return Err(WorkspaceServiceError::NotFound(board_id.into()));
        }
        Ok(board)
    }

    /// Returns the lane and its board if the principal owns the board.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`] when the lane is absent
    /// and [`WorkspaceServiceError::Forbidden`] when its board belongs to
    /// someone else.
    pub async fn authorize_lane_via_board(
        &self,
        principal: &Principal,
        lane_id: LaneId,
    ) -> WorkspaceServiceResult<(Lane, Board)> {
        let lane = self
            .hierarchy
            .find_lane(lane_id)
            .await?
            .ok_or(WorkspaceServiceError::NotFound(lane_id.into()))?;
        let board = self
            .hierarchy
            .find_board(lane.board_id())
            .await?
            .ok_or(WorkspaceServiceError::NotFound(lane_id.into()))?;
        if !owns_board(principal, &board) {
            tracing::debug!(
                principal = %principal.id(),
                lane = %lane_id,
                "lane access denied"
            );
            return Err(WorkspaceServiceError::Forbidden(EntityRef::Lane(lane_id)));
        }
        Ok((lane, board))
    }

    /// Returns the task if the principal created it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`] when the task is absent
    /// or was created by someone else.
    pub async fn authorize_task_ownership(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> WorkspaceServiceResult<Task> {
        self.hierarchy
            .find_task_for_owner(task_id, principal.id())
            .await?
            .ok_or(WorkspaceServiceError::NotFound(task_id.into()))
    }

    /// Returns the lane if it can receive the principal's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::InvalidLane`] when the lane is absent
    /// or its board belongs to someone else.
    pub async fn authorize_lane_for_task_assignment(
        &self,
        principal: &Principal,
        lane_id: LaneId,
    ) -> WorkspaceServiceResult<Lane> {
        let found = self
            .hierarchy
            .find_lane_for_owner(lane_id, principal.id())
            .await?;
        let Some((lane, _board)) = found else {
            tracing::debug!(
                principal = %principal.id(),
                lane = %lane_id,
                "lane rejected for task assignment"
            );
            return Err(WorkspaceServiceError::InvalidLane(lane_id));
        };
        Ok(lane)
    }
}
