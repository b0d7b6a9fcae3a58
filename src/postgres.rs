//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Diesel is synchronous, so adapters hop onto the blocking thread pool for
//! each repository call and borrow one pooled connection for its duration.

use crate::config::AppConfig;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type.
pub type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds a connection pool from application configuration.
///
/// The pool is created lazily: no connection is opened until first use.
#[must_use]
pub fn build_pool(config: &AppConfig) -> PgPool {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    Pool::builder()
        .max_size(config.database_pool_size)
        .build_unchecked(manager)
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &PgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
