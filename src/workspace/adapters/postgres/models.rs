//! Diesel row models for workspace persistence.

use super::schema::{boards, lanes, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Board row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning account.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Lane row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = lanes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LaneRow {
    /// Lane identifier.
    pub id: uuid::Uuid,
    /// Lane title.
    pub title: String,
    /// Position among the board's lanes.
    pub position: i32,
    /// Parent board.
    pub board_id: uuid::Uuid,
}

/// Task row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority.
    pub priority: i32,
    /// Position among the lane's tasks.
    pub position: i32,
    /// Containing lane.
    pub lane_id: Option<uuid::Uuid>,
    /// Creating owner.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Column updates for a lane; `None` fields are left out of the `UPDATE`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lanes)]
pub struct LaneChangeset {
    /// New title.
    pub title: Option<String>,
    /// New position.
    pub position: Option<i32>,
}

impl LaneChangeset {
    /// Returns whether no column would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.position.is_none()
    }
}

/// Column updates for a task; `None` fields are left out of the `UPDATE`
/// and `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New priority.
    pub priority: Option<i32>,
    /// New position.
    pub position: Option<i32>,
    /// Destination lane.
    pub lane_id: Option<Option<uuid::Uuid>>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}
