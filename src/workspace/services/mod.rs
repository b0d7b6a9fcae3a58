//! Application services for boards, lanes, and tasks.
//!
//! Every operation authorizes the principal through [`OwnershipGuard`] before
//! touching storage, then performs a single repository call.

mod boards;
mod error;
mod guard;
mod positions;
mod tasks;

pub use boards::{BoardService, CreateBoardRequest, CreateLaneRequest};
pub use error::{WorkspaceServiceError, WorkspaceServiceResult};
pub use guard::{OwnershipGuard, owns_board, owns_task};
pub use positions::{DuplicatePosition, PositionAllocator};
pub use tasks::{CreateTaskRequest, TaskService};
