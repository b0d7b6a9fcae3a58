//! Read models combining a board with its lanes and tasks.

use super::{Board, Lane, Task};
use serde::Serialize;

/// A lane with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneView {
    /// The lane.
    pub lane: Lane,
    /// Tasks in ascending position.
    pub tasks: Vec<Task>,
}

/// A board with its lanes and their tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// The board.
    pub board: Board,
    /// Lanes in ascending position.
    pub lanes: Vec<LaneView>,
}

impl LaneView {
    /// Builds a lane view, sorting tasks by position.
    #[must_use]
    pub fn new(lane: Lane, mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(|task| (task.position(), task.created_at()));
        Self { lane, tasks }
    }
}

impl BoardView {
    /// Builds a board view, sorting lanes by position.
    #[must_use]
    pub fn new(board: Board, mut lanes: Vec<LaneView>) -> Self {
        lanes.sort_by_key(|view| view.lane.position());
        Self { board, lanes }
    }

    /// Returns the lanes without their tasks.
    pub fn lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.iter().map(|view| &view.lane)
    }
}
