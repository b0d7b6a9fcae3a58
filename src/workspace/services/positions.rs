//! Position assignment for lanes and tasks.
//!
//! Positions are supplied by callers and stored as given; siblings are never
//! shifted to make room. The allocator only produces the default lane layout,
//! suggests the next free slot on request, and reports collisions so they
//! show up in logs.

use super::error::WorkspaceServiceResult;
use crate::workspace::{
    domain::{
        BoardId, DEFAULT_LANE_TITLES, Lane, LaneId, Position, Positioned, WorkspaceDomainError,
    },
    ports::HierarchyRepository,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A position shared by more than one sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicatePosition {
    /// The shared position.
    pub position: Position,
    /// Number of siblings holding it.
    pub count: usize,
}

/// Computes positions for new lanes and tasks.
#[derive(Debug)]
pub struct PositionAllocator<R>
where
    R: HierarchyRepository,
{
    hierarchy: Arc<R>,
}

impl<R> Clone for PositionAllocator<R>
where
    R: HierarchyRepository,
{
    fn clone(&self) -> Self {
        Self {
            hierarchy: Arc::clone(&self.hierarchy),
        }
    }
}

impl<R> PositionAllocator<R>
where
    R: HierarchyRepository,
{
    /// Creates an allocator backed by `hierarchy`.
    #[must_use]
    pub const fn new(hierarchy: Arc<R>) -> Self {
        Self { hierarchy }
    }

    /// Builds the lanes every new board starts with, at positions 0, 1, 2.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError`] if a default title fails validation.
    pub fn default_lanes(board_id: BoardId) -> Result<Vec<Lane>, WorkspaceDomainError> {
        DEFAULT_LANE_TITLES
            .iter()
            .zip(0_u32..)
            .map(|(title, value)| {
                Position::new(value).and_then(|position| Lane::new(*title, position, board_id))
            })
            .collect()
    }

    /// Returns one past the highest lane position on the board, or zero for a
    /// board without lanes.
    ///
    /// # Errors
    ///
    /// Returns an error when the repository lookup fails, or
    /// [`WorkspaceDomainError::PositionOutOfRange`] when a lane already sits
    /// at [`Position::MAX`].
    pub async fn next_lane_position(&self, board_id: BoardId) -> WorkspaceServiceResult<Position> {
        let lanes = self.hierarchy.list_lanes_by_board(board_id).await?;
        next_after(&lanes).map_err(Into::into)
    }

    /// Returns one past the highest task position in the lane, or zero for an
    /// empty lane.
    ///
    /// # Errors
    ///
    /// Returns an error when the repository lookup fails, or
    /// [`WorkspaceDomainError::PositionOutOfRange`] when a task already sits
    /// at [`Position::MAX`].
    pub async fn next_task_position(&self, lane_id: LaneId) -> WorkspaceServiceResult<Position> {
        let tasks = self.hierarchy.list_tasks_by_lane(lane_id).await?;
        next_after(&tasks).map_err(Into::into)
    }

    /// Returns every position held by more than one item, in ascending
    /// order.
    #[must_use]
    pub fn duplicate_positions<T: Positioned>(items: &[T]) -> Vec<DuplicatePosition> {
        let mut counts: BTreeMap<Position, usize> = BTreeMap::new();
        for item in items {
            *counts.entry(item.position()).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(position, count)| DuplicatePosition { position, count })
            .collect()
    }

    /// Logs a warning when lanes on the board share a position.
    pub(crate) async fn report_lane_collisions(&self, board_id: BoardId) {
        let lanes = self
            .hierarchy
            .list_lanes_by_board(board_id)
            .await
            .inspect_err(|error| {
                tracing::warn!(board = %board_id, %error, "lane position check failed");
            })
            .unwrap_or_default();
        for duplicate in Self::duplicate_positions(&lanes) {
            tracing::warn!(
                board = %board_id,
                position = %duplicate.position,
                count = duplicate.count,
                "lanes share a position"
            );
        }
    }

    /// Logs a warning when tasks in the lane share a position.
    pub(crate) async fn report_task_collisions(&self, lane_id: LaneId) {
        let tasks = self
            .hierarchy
            .list_tasks_by_lane(lane_id)
            .await
            .inspect_err(|error| {
                tracing::warn!(lane = %lane_id, %error, "task position check failed");
            })
            .unwrap_or_default();
        for duplicate in Self::duplicate_positions(&tasks) {
            tracing::warn!(
                lane = %lane_id,
                position = %duplicate.position,
                count = duplicate.count,
                "tasks share a position"
            );
        }
    }
}

fn next_after<T: Positioned>(items: &[T]) -> Result<Position, WorkspaceDomainError> {
    items
        .iter()
        .map(Positioned::position)
        .max()
        .map_or(Ok(Position::ZERO), Position::next)
}
