//! Owner accounts, authenticated principals, and role policy.
//!
//! Owners register with an email and password, log in to obtain an access
//! token, and every later request resolves that token to a [`domain::Principal`]
//! consumed by the workspace authorization checks. The module follows
//! hexagonal architecture:
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
