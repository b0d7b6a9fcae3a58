//! Service layer for tasks, including drag-and-drop moves.

use super::error::{WorkspaceServiceError, WorkspaceServiceResult};
use super::guard::OwnershipGuard;
use super::positions::PositionAllocator;
use crate::identity::domain::Principal;
use crate::workspace::{
    domain::{LaneId, NewTask, Position, Priority, Task, TaskId, TaskPatch},
    ports::HierarchyRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    lane_id: LaneId,
    description: Option<String>,
    priority: Priority,
    position: Position,
}

impl CreateTaskRequest {
    /// Creates a request for a task in `lane_id` with default priority at
    /// position zero.
    #[must_use]
    pub fn new(title: impl Into<String>, lane_id: LaneId) -> Self {
        Self {
            title: title.into(),
            lane_id,
            description: None,
            priority: Priority::default(),
            position: Position::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the position within the lane.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: HierarchyRepository,
    C: Clock + Send + Sync,
{
    hierarchy: Arc<R>,
    guard: OwnershipGuard<R>,
    positions: PositionAllocator<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: HierarchyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub fn new(hierarchy: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            guard: OwnershipGuard::new(Arc::clone(&hierarchy)),
            positions: PositionAllocator::new(Arc::clone(&hierarchy)),
            hierarchy,
            clock,
        }
    }

    /// Creates a task owned by the principal in one of their lanes.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::InvalidLane`](super::WorkspaceServiceError::InvalidLane)
    /// when the lane is absent or on another owner's board and
    /// [`WorkspaceServiceError::Domain`](super::WorkspaceServiceError::Domain)
    /// when the title is blank.
    pub async fn create_task(
        &self,
        principal: &Principal,
        request: CreateTaskRequest,
    ) -> WorkspaceServiceResult<Task> {
        let lane = self
            .guard
            .authorize_lane_for_task_assignment(principal, request.lane_id)
            .await?;
        let task = Task::new(
            NewTask {
                title: request.title,
                description: request.description,
                priority: request.priority,
                position: request.position,
                lane_id: lane.id(),
                owner_id: principal.id(),
            },
            &*self.clock,
        )?;
        self.hierarchy
            .insert_task(&task)
            .await
            .map_err(WorkspaceServiceError::from_lane_assignment)?;
        tracing::info!(
            task = %task.id(),
            lane = %lane.id(),
            position = %task.position(),
            "task created"
        );
        self.positions.report_task_collisions(lane.id()).await;
        Ok(task)
    }

    /// Returns one of the principal's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the task is absent or created by someone else.
    pub async fn get_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> WorkspaceServiceResult<Task> {
        self.guard.authorize_task_ownership(principal, task_id).await
    }

    /// Applies a partial update to one of the principal's tasks.
    ///
    /// A supplied lane must be on one of the principal's boards.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the task is absent or created by someone else,
    /// [`WorkspaceServiceError::InvalidLane`](super::WorkspaceServiceError::InvalidLane)
    /// when the supplied lane is unusable, and
    /// [`WorkspaceServiceError::Domain`](super::WorkspaceServiceError::Domain)
    /// for a blank title. The task is unchanged on error.
    pub async fn update_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> WorkspaceServiceResult<Task> {
        self.guard.authorize_task_ownership(principal, task_id).await?;
        if let Some(lane_id) = patch.lane_id {
            self.guard
                .authorize_lane_for_task_assignment(principal, lane_id)
                .await?;
        }
        let changes = patch.validate(&*self.clock)?;
        let task = self
            .hierarchy
            .update_task(task_id, &changes)
            .await
            .map_err(WorkspaceServiceError::from_lane_assignment)?;
        tracing::info!(task = %task_id, "task updated");
        if changes.repositions()
            && let Some(lane_id) = task.lane_id()
        {
            self.positions.report_task_collisions(lane_id).await;
        }
        Ok(task)
    }

    /// Moves one of the principal's tasks to `lane_id` at `position`.
    ///
    /// Other tasks in the destination lane keep their positions; a collision
    /// is logged but not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the task is absent or created by someone else and
    /// [`WorkspaceServiceError::InvalidLane`](super::WorkspaceServiceError::InvalidLane)
    /// when the destination lane is unusable. The task is unchanged on
    /// error.
    pub async fn move_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
        lane_id: LaneId,
        position: Position,
    ) -> WorkspaceServiceResult<Task> {
        let source = self
            .guard
            .authorize_task_ownership(principal, task_id)
            .await?
            .lane_id();
        if source != Some(lane_id) {
            self.guard
                .authorize_lane_for_task_assignment(principal, lane_id)
                .await?;
        }
        let changes = TaskPatch::relocate(lane_id, position).validate(&*self.clock)?;
        let task = self
            .hierarchy
            .update_task(task_id, &changes)
            .await
            .map_err(WorkspaceServiceError::from_lane_assignment)?;
        tracing::info!(
            task = %task_id,
            from = ?source,
            to = %lane_id,
            position = %position,
            "task moved"
        );
        self.positions.report_task_collisions(lane_id).await;
        Ok(task)
    }

    /// Deletes one of the principal's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`](super::WorkspaceServiceError::NotFound)
    /// when the task is absent or created by someone else.
    pub async fn delete_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> WorkspaceServiceResult<()> {
        self.guard.authorize_task_ownership(principal, task_id).await?;
        self.hierarchy.delete_task(task_id).await?;
        tracing::info!(task = %task_id, "task deleted");
        Ok(())
    }
}
