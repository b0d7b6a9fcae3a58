//! Service layer for boards and their lanes.

use super::error::WorkspaceServiceResult;
use super::guard::OwnershipGuard;
use super::positions::PositionAllocator;
use crate::identity::domain::Principal;
use crate::workspace::{
    domain::{Board, BoardId, BoardView, Lane, LaneId, LanePatch, LaneView, Position},
    ports::HierarchyRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoardRequest {
    title: String,
    description: Option<String>,
}

impl CreateBoardRequest {
    /// Creates a request for a board with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for creating a lane on an existing board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLaneRequest {
    title: String,
    position: Position,
}

impl CreateLaneRequest {
    /// Creates a request for a lane at position zero.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            position: Position::default(),
        }
    }

    /// Sets the lane position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Board and lane orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: HierarchyRepository,
    C: Clock + Send + Sync,
{
    hierarchy: Arc<R>,
    guard: OwnershipGuard<R>,
    positions: PositionAllocator<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: HierarchyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub fn new(hierarchy: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            guard: OwnershipGuard::new(Arc::clone(&hierarchy)),
            positions: PositionAllocator::new(Arc::clone(&hierarchy)),
            hierarchy,
            clock,
        }
    }

    /// Creates a board owned by the principal together with its default
    /// lanes.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::Domain`](super::WorkspaceServiceError::Domain)
    /// when the title is blank, or a repository error if the insert fails;
    /// in that case neither the board nor any lane is stored.
    pub async fn create_board(
        &self,
        principal: &Principal,
        request: CreateBoardRequest,
    ) -> WorkspaceServiceResult<BoardView> {
        let board = Board::new(
            request.title,
            request.description,
            principal.id(),
            &*self.clock,
        )?;
        let lanes = PositionAllocator::<R>::default_lanes(board.id())?;
        self.hierarchy.insert_board(&board, &lanes).await?;
        tracing::info!(
            board = %board.id(),
            owner = %principal.id(),
            lanes = lanes.len(),
            "board created"
        );

        let views = lanes
            .into_iter()
            .map(|lane| LaneView::new(lane, Vec::new()))
            .collect();
        Ok(BoardView::new(board, views))
    }

    /// Lists the principal's boards, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the repository lookup fails.
    pub async fn list_boards(&self, principal: &Principal) -> WorkspaceServiceResult<Vec<Board>> {
        Ok(self.hierarchy.list_boards_by_owner(principal.id()).await?)
    }

    /// Returns a board with its lanes and tasks in display order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the board is absent or owned by someone else.
    pub async fn get_board(
        &self,
        principal: &Principal,
        board_id: BoardId,
    ) -> WorkspaceServiceResult<BoardView> {
        let board = self.guard.authorize_board(principal, board_id).await?;
        let lanes = self.hierarchy.list_lanes_by_board(board_id).await?;
        let mut views = Vec::with_capacity(lanes.len());
        for lane in lanes {
            let tasks = self.hierarchy.list_tasks_by_lane(lane.id()).await?;
            views.push(LaneView::new(lane, tasks));
        }
        Ok(BoardView::new(board, views))
    }

    /// Deletes a board, its lanes, and their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the board is absent or owned by someone else.
    pub async fn delete_board(
        &self,
        principal: &Principal,
        board_id: BoardId,
    ) -> WorkspaceServiceResult<()> {
        self.guard.authorize_board(principal, board_id).await?;
        self.hierarchy.delete_board(board_id).await?;
        tracing::info!(board = %board_id, owner = %principal.id(), "board deleted");
        Ok(())
    }

    /// Adds a lane to one of the principal's boards at the requested
    /// position. Existing lanes are not renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the board is absent or owned by someone else and
    /// [`WorkspaceServiceError::Domain`](super::WorkspaceServiceError::Domain)
    /// when the title is blank.
    pub async fn create_lane(
        &self,
        principal: &Principal,
        board_id: BoardId,
        request: CreateLaneRequest,
    ) -> WorkspaceServiceResult<Lane> {
        self.guard.authorize_board(principal, board_id).await?;
        let lane = Lane::new(request.title, request.position, board_id)?;
        self.hierarchy.insert_lane(&lane).await?;
        tracing::info!(
            lane = %lane.id(),
            board = %board_id,
            position = %lane.position(),
            "lane created"
        );
        self.positions.report_lane_collisions(board_id).await;
        Ok(lane)
    }

    /// Applies a partial update to a lane on one of the principal's boards.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the lane is absent,
    /// [`WorkspaceServiceError::Forbidden`](super::WorkspaceServiceError::Forbidden)
    /// when its board belongs to someone else, and
    /// [`WorkspaceServiceError::Domain`](super::WorkspaceServiceError::Domain)
    /// for a blank title.
    pub async fn update_lane(
        &self,
        principal: &Principal,
        lane_id: LaneId,
        patch: LanePatch,
    ) -> WorkspaceServiceResult<Lane> {
        let (_current, board) = self.guard.authorize_lane_via_board(principal, lane_id).await?;
        let changes = patch.validate()?;
        let repositioned = changes.position.is_some();
        let lane = self.hierarchy.update_lane(lane_id, &changes).await?;
        tracing::info!(lane = %lane_id, board = %board.id(), "lane updated");
        if repositioned {
            self.positions.report_lane_collisions(board.id()).await;
        }
        Ok(lane)
    }

    /// Deletes a lane and its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the lane is absent and
    /// [`WorkspaceServiceError::Forbidden`](super::WorkspaceServiceError::Forbidden)
    /// when its board belongs to someone else.
    pub async fn delete_lane(
        &self,
        principal: &Principal,
        lane_id: LaneId,
    ) -> WorkspaceServiceResult<()> {
        let (_lane, board) = self.guard.authorize_lane_via_board(principal, lane_id).await?;
        self.hierarchy.delete_lane(lane_id).await?;
        tracing::info!(lane = %lane_id, board = %board.id(), "lane deleted");
        Ok(())
    }

    /// Returns the ownership guard used by this service.
    #[must_use]
    pub const fn guard(&self) -> &OwnershipGuard<R> {
        &self.guard
    }

    /// Returns the position allocator used by this service.
    #[must_use]
    pub const fn positions(&self) -> &PositionAllocator<R> {
        &self.positions
    }
}
