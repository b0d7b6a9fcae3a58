//! `PostgreSQL` adapters for owner persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresOwnerRepository;
