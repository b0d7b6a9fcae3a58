//! In-memory hierarchy repository for tests and local tooling.
//!
//! All three tables sit behind one lock, so cascades and multi-row inserts
//! are atomic with respect to concurrent callers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::OwnerId;
use crate::workspace::{
    domain::{Board, BoardId, EntityRef, Lane, LaneChanges, LaneId, Task, TaskChanges, TaskId},
    ports::{HierarchyRepository, HierarchyRepositoryError, HierarchyRepositoryResult},
};

/// Thread-safe in-memory hierarchy repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHierarchyRepository {
    state: Arc<RwLock<InMemoryHierarchyState>>,
}

#[derive(Debug, Default)]
struct InMemoryHierarchyState {
    boards: HashMap<BoardId, Board>,
    lanes: HashMap<LaneId, Lane>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryHierarchyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryHierarchyState {
    fn require_lane(&self, lane_id: Option<LaneId>) -> HierarchyRepositoryResult<()> {
        if let Some(id) = lane_id
            && !self.lanes.contains_key(&id)
        {
            return Err(HierarchyRepositoryError::NotFound(EntityRef::Lane(id)));
        }
        Ok(())
    }

    fn remove_lane_cascade(&mut self, lane_id: LaneId) {
        self.tasks
            .retain(|_, task| task.lane_id() != Some(lane_id));
        self.lanes.remove(&lane_id);
    }
}

fn lock_error(err: impl std::fmt::Display) -> HierarchyRepositoryError {
    HierarchyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl HierarchyRepository for InMemoryHierarchyRepository {
    async fn insert_board(&self, board: &Board, lanes: &[Lane]) -> HierarchyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.boards.contains_key(&board.id()) {
            return Err(HierarchyRepositoryError::Duplicate(board.id().into()));
        }
        // Validate every row before writing any of them.
        for lane in lanes {
            if state.lanes.contains_key(&lane.id()) {
                return Err(HierarchyRepositoryError::Duplicate(lane.id().into()));
            }
            if lane.board_id() != board.id() {
                return Err(HierarchyRepositoryError::NotFound(lane.board_id().into()));
            }
        }

        state.boards.insert(board.id(), board.clone());
        for lane in lanes {
            state.lanes.insert(lane.id(), lane.clone());
        }
        Ok(())
    }

    async fn find_board(&self, id: BoardId) -> HierarchyRepositoryResult<Option<Board>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.boards.get(&id).cloned())
    }

    async fn list_boards_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Vec<Board>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut boards: Vec<Board> = state
            .boards
            .values()
            .filter(|board| board.is_owned_by(owner_id))
            .cloned()
            .collect();
        boards.sort_by_key(|board| (board.created_at(), board.id().into_inner()));
        Ok(boards)
    }

    async fn delete_board(&self, id: BoardId) -> HierarchyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.boards.contains_key(&id) {
            return Err(HierarchyRepositoryError::NotFound(id.into()));
        }
        let lane_ids: Vec<LaneId> = state
            .lanes
            .values()
            .filter(|lane| lane.board_id() == id)
            .map(Lane::id)
            .collect();
        for lane_id in lane_ids {
            state.remove_lane_cascade(lane_id);
        }
        state.boards.remove(&id);
        Ok(())
    }

    async fn insert_lane(&self, lane: &Lane) -> HierarchyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.lanes.contains_key(&lane.id()) {
            return Err(HierarchyRepositoryError::Duplicate(lane.id().into()));
        }
        if !state.boards.contains_key(&lane.board_id()) {
            return Err(HierarchyRepositoryError::NotFound(lane.board_id().into()));
        }
        state.lanes.insert(lane.id(), lane.clone());
        Ok(())
    }

    async fn find_lane(&self, id: LaneId) -> HierarchyRepositoryResult<Option<Lane>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.lanes.get(&id).cloned())
    }

    async fn find_lane_for_owner(
        &self,
        id: LaneId,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Option<(Lane, Board)>> {
        let state = self.state.read().map_err(lock_error)?;
        let found = state.lanes.get(&id).and_then(|lane| {
            state
                .boards
                .get(&lane.board_id())
                .filter(|board| board.is_owned_by(owner_id))
                .map(|board| (lane.clone(), board.clone()))
        });
        Ok(found)
    }

    async fn list_lanes_by_board(
        &self,
        board_id: BoardId,
    ) -> HierarchyRepositoryResult<Vec<Lane>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut lanes: Vec<Lane> = state
            .lanes
            .values()
            .filter(|lane| lane.board_id() == board_id)
            .cloned()
            .collect();
        lanes.sort_by_key(|lane| (lane.position(), lane.id().into_inner()));
        Ok(lanes)
    }

    async fn update_lane(
        &self,
        id: LaneId,
        changes: &LaneChanges,
    ) -> HierarchyRepositoryResult<Lane> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(stored) = state.lanes.get_mut(&id) else {
            return Err(HierarchyRepositoryError::NotFound(id.into()));
        };
        stored.apply_changes(changes.clone());
        Ok(stored.clone())
    }

    async fn delete_lane(&self, id: LaneId) -> HierarchyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.lanes.contains_key(&id) {
            return Err(HierarchyRepositoryError::NotFound(id.into()));
        }
        state.remove_lane_cascade(id);
        Ok(())
    }

    async fn insert_task(&self, task: &Task) -> HierarchyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(HierarchyRepositoryError::Duplicate(task.id().into()));
        }
        state.require_lane(task.lane_id())?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_task_for_owner(
        &self,
        id: TaskId,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| task.is_owned_by(owner_id))
            .cloned())
    }

    async fn list_tasks_by_lane(&self, lane_id: LaneId) -> HierarchyRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.lane_id() == Some(lane_id))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.position(), task.created_at(), task.id().into_inner()));
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> HierarchyRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.tasks.contains_key(&id) {
            return Err(HierarchyRepositoryError::NotFound(id.into()));
        }
        state.require_lane(changes.lane_id)?;
        let Some(stored) = state.tasks.get_mut(&id) else {
            return Err(HierarchyRepositoryError::NotFound(id.into()));
        };
        stored.apply_changes(changes.clone());
        Ok(stored.clone())
    }

    async fn delete_task(&self, id: TaskId) -> HierarchyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(HierarchyRepositoryError::NotFound(id.into()))
    }
}
