//! Domain model for boards, lanes, and tasks.
//!
//! Entities carry no storage concerns. Ownership is recorded as plain
//! [`OwnerId`](crate::identity::domain::OwnerId) values and checked by the
//! services layer.

mod board;
mod error;
mod ids;
mod lane;
mod position;
mod task;
mod title;
mod view;

pub use board::{Board, PersistedBoardData};
pub use error::WorkspaceDomainError;
pub use ids::{BoardId, EntityKind, EntityRef, LaneId, TaskId};
pub use lane::{DEFAULT_LANE_TITLES, Lane, LaneChanges, LanePatch};
pub use position::{Position, Positioned, Priority};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskPatch};
pub use title::Title;
pub use view::{BoardView, LaneView};
