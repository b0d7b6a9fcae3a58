//! In-memory adapter for the hierarchy repository.

mod hierarchy;

pub use hierarchy::InMemoryHierarchyRepository;
