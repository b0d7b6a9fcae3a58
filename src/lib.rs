//! TaskMaster: multi-owner Kanban boards with isolated workspaces.
//!
//! Owners register and authenticate through the [`identity`] context, which
//! turns an access token into a [`identity::domain::Principal`]. Every
//! operation in the [`workspace`] context takes that principal and checks
//! ownership before reading or writing boards, lanes, or tasks.
//!
//! # Architecture
//!
//! TaskMaster follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, etc.)
//!
//! # Modules
//!
//! - [`identity`]: Owner accounts, credentials, and role policy
//! - [`workspace`]: Boards, lanes, tasks, ownership checks, and ordering
//! - [`config`]: Layered application settings
//! - [`fault`]: Transport-neutral failure classification
//! - [`postgres`]: Connection pooling shared by the `PostgreSQL` adapters
//! - [`telemetry`]: `tracing` subscriber setup

pub mod config;
pub mod fault;
pub mod identity;
pub mod postgres;
pub mod telemetry;
pub mod workspace;
