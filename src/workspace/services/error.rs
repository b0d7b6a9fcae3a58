//! Service-level errors for workspace operations.

use crate::fault::{Fault, FaultKind};
use crate::workspace::{
    domain::{EntityRef, LaneId, WorkspaceDomainError},
    ports::HierarchyRepositoryError,
};
use thiserror::Error;

/// Errors returned by [`BoardService`](super::BoardService) and
/// [`TaskService`](super::TaskService).
///
/// `NotFound` covers both absent entities and entities owned by someone else,
/// and its message is identical in both cases.
#[derive(Debug, Error)]
pub enum WorkspaceServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkspaceDomainError),

    /// The entity does not exist or is not visible to the caller.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// The entity exists but the caller may not act on it.
    #[error("not authorized to act on {0}")]
    Forbidden(EntityRef),

    /// A lane supplied as a task's destination is absent or not owned by the
    /// caller.
    #[error("invalid lane {0} or no access to its board")]
    InvalidLane(LaneId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(HierarchyRepositoryError),
}

impl From<HierarchyRepositoryError> for WorkspaceServiceError {
    fn from(err: HierarchyRepositoryError) -> Self {
        match err {
            HierarchyRepositoryError::NotFound(entity) => Self::NotFound(entity),
            other => Self::Repository(other),
        }
    }
}

impl WorkspaceServiceError {
    /// Converts a repository failure from a write that assigns a task to a
    /// lane. A lane that vanished after authorization is still an unusable
    /// input, not a missing target.
    pub(crate) fn from_lane_assignment(err: HierarchyRepositoryError) -> Self {
        match err {
            HierarchyRepositoryError::NotFound(EntityRef::Lane(lane_id)) => {
                Self::InvalidLane(lane_id)
            }
            other => Self::from(other),
        }
    }
}

impl Fault for WorkspaceServiceError {
    fn kind(&self) -> FaultKind {
        match self {
            Self::Domain(_) | Self::InvalidLane(_) => FaultKind::BadRequest,
            Self::NotFound(_) => FaultKind::NotFound,
            Self::Forbidden(_) => FaultKind::Forbidden,
            Self::Repository(_) => FaultKind::Internal,
        }
    }
}

/// Result type for workspace service operations.
pub type WorkspaceServiceResult<T> = Result<T, WorkspaceServiceError>;
