//! `PostgreSQL` repository implementation for the workspace hierarchy.

use super::{
    models::{BoardRow, LaneChangeset, LaneRow, TaskChangeset, TaskRow},
    schema::{boards, lanes, tasks},
};
use crate::identity::domain::OwnerId;
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::workspace::{
    domain::{
        Board, BoardId, EntityKind, EntityRef, Lane, LaneChanges, LaneId, PersistedBoardData,
        PersistedTaskData, Position, Priority, Task, TaskChanges, TaskId, Title,
    },
    ports::{HierarchyRepository, HierarchyRepositoryError, HierarchyRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed hierarchy repository.
///
/// Multi-row writes run inside one database transaction each.
#[derive(Debug, Clone)]
pub struct PostgresHierarchyRepository {
    pool: PgPool,
}

impl PostgresHierarchyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> HierarchyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> HierarchyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, HierarchyRepositoryError::persistence)?;
                f(&mut connection)
            },
            HierarchyRepositoryError::persistence,
        )
        .await
    }
}

impl From<diesel::result::Error> for HierarchyRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl HierarchyRepository for PostgresHierarchyRepository {
    async fn insert_board(&self, board: &Board, initial: &[Lane]) -> HierarchyRepositoryResult<()> {
        let board_row = board_to_row(board);
        let lane_rows = initial
            .iter()
            .map(lane_to_row)
            .collect::<HierarchyRepositoryResult<Vec<_>>>()?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, HierarchyRepositoryError, _>(|tx| {
                if board_exists(tx, board_row.id)? {
                    return Err(HierarchyRepositoryError::Duplicate(EntityRef::Board(
                        BoardId::from_uuid(board_row.id),
                    )));
                }
                diesel::insert_into(boards::table)
                    .values(&board_row)
                    .execute(tx)?;
                for row in &lane_rows {
                    if lane_exists(tx, row.id)? {
                        return Err(HierarchyRepositoryError::Duplicate(EntityRef::Lane(
                            LaneId::from_uuid(row.id),
                        )));
                    }
                }
                if !lane_rows.is_empty() {
                    diesel::insert_into(lanes::table)
                        .values(&lane_rows)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_board(&self, id: BoardId) -> HierarchyRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn list_boards_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            boards::table
                .filter(boards::owner_id.eq(owner_id.into_inner()))
                .order((boards::created_at.asc(), boards::id.asc()))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)?
                .into_iter()
                .map(row_to_board)
                .collect()
        })
        .await
    }

    async fn delete_board(&self, id: BoardId) -> HierarchyRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, HierarchyRepositoryError, _>(|tx| {
                let board_lanes = lanes::table
                    .filter(lanes::board_id.eq(id.into_inner()))
                    .select(lanes::id.nullable());
                diesel::delete(tasks::table.filter(tasks::lane_id.eq_any(board_lanes)))
                    .execute(tx)?;
                diesel::delete(lanes::table.filter(lanes::board_id.eq(id.into_inner())))
                    .execute(tx)?;
                let affected = diesel::delete(boards::table.filter(boards::id.eq(id.into_inner())))
                    .execute(tx)?;
                if affected == 0 {
                    return Err(HierarchyRepositoryError::NotFound(id.into()));
                }
                Ok(())
            })
        })
        .await
    }

    async fn insert_lane(&self, lane: &Lane) -> HierarchyRepositoryResult<()> {
        let row = lane_to_row(lane)?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, HierarchyRepositoryError, _>(|tx| {
                if !board_exists(tx, row.board_id)? {
                    return Err(HierarchyRepositoryError::NotFound(EntityRef::Board(
                        BoardId::from_uuid(row.board_id),
                    )));
                }
                if lane_exists(tx, row.id)? {
                    return Err(HierarchyRepositoryError::Duplicate(EntityRef::Lane(
                        LaneId::from_uuid(row.id),
                    )));
                }
                diesel::insert_into(lanes::table).values(&row).execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_lane(&self, id: LaneId) -> HierarchyRepositoryResult<Option<Lane>> {
        self.run_blocking(move |connection| {
            let row = lanes::table
                .filter(lanes::id.eq(id.into_inner()))
                .select(LaneRow::as_select())
                .first::<LaneRow>(connection)
                .optional()?;
            row.map(row_to_lane).transpose()
        })
        .await
    }

    async fn find_lane_for_owner(
        &self,
        id: LaneId,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Option<(Lane, Board)>> {
        self.run_blocking(move |connection| {
            let found = lanes::table
                .inner_join(boards::table)
                .filter(lanes::id.eq(id.into_inner()))
                .filter(boards::owner_id.eq(owner_id.into_inner()))
                .select((LaneRow::as_select(), BoardRow::as_select()))
                .first::<(LaneRow, BoardRow)>(connection)
                .optional()?;
            found
                .map(|(lane, board)| Ok((row_to_lane(lane)?, row_to_board(board)?)))
                .transpose()
        })
        .await
    }

    async fn list_lanes_by_board(
        &self,
        board_id: BoardId,
    ) -> HierarchyRepositoryResult<Vec<Lane>> {
        self.run_blocking(move |connection| {
            lanes::table
                .filter(lanes::board_id.eq(board_id.into_inner()))
                .order((lanes::position.asc(), lanes::id.asc()))
                .select(LaneRow::as_select())
                .load::<LaneRow>(connection)?
                .into_iter()
                .map(row_to_lane)
                .collect()
        })
        .await
    }

    async fn update_lane(
        &self,
        id: LaneId,
        changes: &LaneChanges,
    ) -> HierarchyRepositoryResult<Lane> {
        let changeset = lane_changeset(changes)?;
        self.run_blocking(move |connection| {
            let target = lanes::table.filter(lanes::id.eq(id.into_inner()));
            let row = if changeset.is_empty() {
                target
                    .select(LaneRow::as_select())
                    .first::<LaneRow>(connection)
                    .optional()?
            } else {
                diesel::update(target)
                    .set(&changeset)
                    .returning(LaneRow::as_returning())
                    .get_result::<LaneRow>(connection)
                    .optional()?
            };
            row.map(row_to_lane)
                .transpose()?
                .ok_or_else(|| HierarchyRepositoryError::NotFound(id.into()))
        })
        .await
    }

    async fn delete_lane(&self, id: LaneId) -> HierarchyRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, HierarchyRepositoryError, _>(|tx| {
                diesel::delete(tasks::table.filter(tasks::lane_id.eq(id.into_inner())))
                    .execute(tx)?;
                let affected = diesel::delete(lanes::table.filter(lanes::id.eq(id.into_inner())))
                    .execute(tx)?;
                if affected == 0 {
                    return Err(HierarchyRepositoryError::NotFound(id.into()));
                }
                Ok(())
            })
        })
        .await
    }

    async fn insert_task(&self, task: &Task) -> HierarchyRepositoryResult<()> {
        let row = task_to_row(task)?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, HierarchyRepositoryError, _>(|tx| {
                require_lane(tx, row.lane_id)?;
                let duplicate: bool =
                    diesel::select(exists(tasks::table.filter(tasks::id.eq(row.id))))
                        .get_result(tx)?;
                if duplicate {
                    return Err(HierarchyRepositoryError::Duplicate(EntityRef::Task(
                        TaskId::from_uuid(row.id),
                    )));
                }
                diesel::insert_into(tasks::table).values(&row).execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_task_for_owner(
        &self,
        id: TaskId,
        owner_id: OwnerId,
    ) -> HierarchyRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::owner_id.eq(owner_id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks_by_lane(&self, lane_id: LaneId) -> HierarchyRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::lane_id.eq(lane_id.into_inner()))
                .order((
                    tasks::position.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn update_task(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> HierarchyRepositoryResult<Task> {
        let changeset = task_changeset(changes)?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, HierarchyRepositoryError, _>(|tx| {
                let present: bool = diesel::select(exists(
                    tasks::table.filter(tasks::id.eq(id.into_inner())),
                ))
                .get_result(tx)?;
                if !present {
                    return Err(HierarchyRepositoryError::NotFound(id.into()));
                }
                require_lane(tx, changeset.lane_id.flatten())?;
                let row = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .set(&changeset)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .optional()?;
                row.map(row_to_task)
                    .transpose()?
                    .ok_or_else(|| HierarchyRepositoryError::NotFound(id.into()))
            })
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> HierarchyRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)?;
            if affected == 0 {
                return Err(HierarchyRepositoryError::NotFound(id.into()));
            }
            Ok(())
        })
        .await
    }
}

fn board_exists(connection: &mut PgConnection, id: uuid::Uuid) -> HierarchyRepositoryResult<bool> {
    Ok(diesel::select(exists(boards::table.filter(boards::id.eq(id)))).get_result(connection)?)
}

fn lane_exists(connection: &mut PgConnection, id: uuid::Uuid) -> HierarchyRepositoryResult<bool> {
    Ok(diesel::select(exists(lanes::table.filter(lanes::id.eq(id)))).get_result(connection)?)
}

/// Checks that the lane exists and holds a share lock on it until the
/// transaction ends, so a concurrent lane delete cannot orphan the task.
fn require_lane(
    connection: &mut PgConnection,
    lane_id: Option<uuid::Uuid>,
) -> HierarchyRepositoryResult<()> {
    let Some(id) = lane_id else {
        return Ok(());
    };
    let locked = lanes::table
        .filter(lanes::id.eq(id))
        .select(lanes::id)
        .for_share()
        .first::<uuid::Uuid>(connection)
        .optional()?;
    if locked.is_none() {
        return Err(HierarchyRepositoryError::NotFound(EntityRef::Lane(
            LaneId::from_uuid(id),
        )));
    }
    Ok(())
}

fn position_to_column(position: Position) -> HierarchyRepositoryResult<i32> {
    i32::try_from(position.value()).map_err(HierarchyRepositoryError::persistence)
}

fn position_from_column(value: i32) -> HierarchyRepositoryResult<Position> {
    Position::try_from(i64::from(value)).map_err(HierarchyRepositoryError::persistence)
}

fn lane_changeset(changes: &LaneChanges) -> HierarchyRepositoryResult<LaneChangeset> {
    Ok(LaneChangeset {
        title: changes.title.as_ref().map(|title| title.as_str().to_owned()),
        position: changes.position.map(position_to_column).transpose()?,
    })
}

fn task_changeset(changes: &TaskChanges) -> HierarchyRepositoryResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: changes.title.as_ref().map(|title| title.as_str().to_owned()),
        description: changes.description.clone(),
        priority: changes.priority.map(Priority::value),
        position: changes.position.map(position_to_column).transpose()?,
        lane_id: changes.lane_id.map(|lane_id| Some(lane_id.into_inner())),
        updated_at: changes.updated_at,
    })
}

fn title_from_column(kind: EntityKind, value: String) -> HierarchyRepositoryResult<Title> {
    Title::new(kind, value).map_err(HierarchyRepositoryError::persistence)
}

fn board_to_row(board: &Board) -> BoardRow {
    BoardRow {
        id: board.id().into_inner(),
        title: board.title().as_str().to_owned(),
        description: board.description().map(str::to_owned),
        owner_id: board.owner_id().into_inner(),
        created_at: board.created_at(),
    }
}

fn row_to_board(row: BoardRow) -> HierarchyRepositoryResult<Board> {
    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        title: title_from_column(EntityKind::Board, row.title)?,
        description: row.description,
        owner_id: OwnerId::from_uuid(row.owner_id),
        created_at: row.created_at,
    }))
}

fn lane_to_row(lane: &Lane) -> HierarchyRepositoryResult<LaneRow> {
    Ok(LaneRow {
        id: lane.id().into_inner(),
        title: lane.title().as_str().to_owned(),
        position: position_to_column(lane.position())?,
        board_id: lane.board_id().into_inner(),
    })
}

fn row_to_lane(row: LaneRow) -> HierarchyRepositoryResult<Lane> {
    Ok(Lane::from_persisted(
        LaneId::from_uuid(row.id),
        title_from_column(EntityKind::Lane, row.title)?,
        position_from_column(row.position)?,
        BoardId::from_uuid(row.board_id),
    ))
}

fn task_to_row(task: &Task) -> HierarchyRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().value(),
        position: position_to_column(task.position())?,
        lane_id: task.lane_id().map(LaneId::into_inner),
        owner_id: task.owner_id().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> HierarchyRepositoryResult<Task> {
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: title_from_column(EntityKind::Task, row.title)?,
        description: row.description,
        priority: Priority::new(row.priority),
        position: position_from_column(row.position)?,
        lane_id: row.lane_id.map(LaneId::from_uuid),
        owner_id: OwnerId::from_uuid(row.owner_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
