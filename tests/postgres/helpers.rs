//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use rstest::fixture;
use taskmaster::identity::{
    adapters::postgres::PostgresOwnerRepository,
    domain::{EmailAddress, Owner, OwnerId, PasswordDigest},
    ports::OwnerRepository,
};
use taskmaster::postgres::PgPool;
use taskmaster::workspace::{
    adapters::postgres::PostgresHierarchyRepository,
    domain::{Board, Lane, LaneId, NewTask, Position, Priority, Task},
    ports::HierarchyRepository,
    services::PositionAllocator,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Boxed error type for test setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Names the server the suite runs against.
pub const DATABASE_URL_VAR: &str = "TASKMASTER_TEST_DATABASE_URL";

/// SQL creating the owner, board, lane, and task tables.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_workspace_tables/up.sql");

/// A database created for one test and dropped when it goes out of scope.
pub struct TemporaryDatabase {
    admin_url: String,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Creates an empty database on the server behind `admin_url` and applies
    /// the migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or the SQL fails.
    pub fn create(admin_url: &str) -> Result<Self, BoxError> {
        let name = format!("taskmaster_test_{}", Uuid::new_v4().simple());
        let url = database_url(admin_url, &name)?;
        let mut admin = PgConnection::establish(admin_url)?;
        admin.batch_execute(&format!("CREATE DATABASE {}", quote_identifier(&name)))?;
        let database = Self {
            admin_url: admin_url.to_owned(),
            name,
            url,
        };
        PgConnection::establish(&database.url)?.batch_execute(CREATE_TABLES_SQL)?;
        Ok(database)
    }

    /// Builds a connection pool for the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot open its connections.
    pub fn pool(&self) -> Result<PgPool, BoxError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.url);
        Ok(Pool::builder().max_size(2).build(manager)?)
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(&self.name)
        );
        let dropped = PgConnection::establish(&self.admin_url)
            .map_err(BoxError::from)
            .and_then(|mut admin| admin.batch_execute(&sql).map_err(BoxError::from));
        if let Err(err) = dropped {
            tracing::warn!(database = %self.name, error = %err, "temporary database left behind");
        }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Replaces the database named in `admin_url` with `name`.
fn database_url(admin_url: &str, name: &str) -> Result<String, BoxError> {
    let (base, query) = admin_url
        .split_once('?')
        .map_or((admin_url, None), |(base, query)| (base, Some(query)));
    let server = base
        .rsplit_once('/')
        .map(|(server, _)| server)
        .filter(|server| !server.ends_with('/'))
        .ok_or_else(|| BoxError::from(format!("{DATABASE_URL_VAR} must name a database")))?;
    Ok(query.map_or_else(
        || format!("{server}/{name}"),
        |query| format!("{server}/{name}?{query}"),
    ))
}

/// Repositories over one temporary database.
///
/// Fields drop in order, so the pools close before the database is dropped.
pub struct PostgresContext {
    /// Owner repository.
    pub owners: PostgresOwnerRepository,
    /// Hierarchy repository.
    pub hierarchy: PostgresHierarchyRepository,
    /// Runtime driving the async repository calls.
    pub rt: Runtime,
    _database: TemporaryDatabase,
}

/// Provides repositories over a fresh database, or `None` when no server is
/// configured.
///
/// # Panics
///
/// Panics if the configured server cannot be prepared.
#[fixture]
pub fn postgres_context() -> Option<PostgresContext> {
    let Ok(admin_url) = std::env::var(DATABASE_URL_VAR) else {
        tracing::warn!("{DATABASE_URL_VAR} is unset; skipping PostgreSQL test");
        return None;
    };
    let database = TemporaryDatabase::create(&admin_url).expect("temporary database");
    let pool = database.pool().expect("connection pool");
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    Some(PostgresContext {
        owners: PostgresOwnerRepository::new(pool.clone()),
        hierarchy: PostgresHierarchyRepository::new(pool),
        rt,
        _database: database,
    })
}

impl PostgresContext {
    /// Stores an owner with `email`, satisfying the board and task foreign
    /// keys.
    ///
    /// # Panics
    ///
    /// Panics if the owner cannot be stored.
    pub fn owner(&self, email: &str) -> Owner {
        let owner = registered(email);
        self.rt
            .block_on(self.owners.store(&owner))
            .expect("owner stored");
        owner
    }

    /// Stores a board for `owner_id` with the default lanes.
    ///
    /// # Panics
    ///
    /// Panics if the board cannot be stored.
    pub fn board(&self, owner_id: OwnerId, title: &str) -> (Board, Vec<Lane>) {
        let board = Board::new(title, None, owner_id, &DefaultClock).expect("valid board");
        let lanes = PositionAllocator::<PostgresHierarchyRepository>::default_lanes(board.id())
            .expect("default lanes");
        self.rt
            .block_on(self.hierarchy.insert_board(&board, &lanes))
            .expect("board stored");
        (board, lanes)
    }

    /// Stores a task for `owner_id` in `lane_id`.
    ///
    /// # Panics
    ///
    /// Panics if the task cannot be stored.
    pub fn task(&self, owner_id: OwnerId, lane_id: LaneId, title: &str) -> Task {
        let task = Task::new(
            NewTask {
                title: title.to_owned(),
                description: Some("from the integration suite".to_owned()),
                priority: Priority::default(),
                position: Position::ZERO,
                lane_id,
                owner_id,
            },
            &DefaultClock,
        )
        .expect("valid task");
        self.rt
            .block_on(self.hierarchy.insert_task(&task))
            .expect("task stored");
        task
    }
}

/// Builds an unsaved owner with `email`.
///
/// # Panics
///
/// Panics if `email` is invalid.
#[must_use]
pub fn registered(email: &str) -> Owner {
    Owner::register(
        EmailAddress::new(email).expect("valid email"),
        PasswordDigest::new("sha256$c2FsdA$ZGlnZXN0"),
        "Integration Owner",
        &DefaultClock,
    )
    .expect("valid owner")
}
