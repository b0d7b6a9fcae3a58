//! `PostgreSQL` adapter for the board → lane → task hierarchy.

mod models;
mod repository;
mod schema;

pub use repository::PostgresHierarchyRepository;
