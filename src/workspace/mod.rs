//! Boards, lanes, and tasks for each owner's isolated workspace.
//!
//! This module holds the authorization chain and position ordering that keep
//! owners apart and tasks arranged. Lane and board access is decided by the
//! owning board, task access by the task's creator; positions are supplied by
//! callers and stored as given. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
