//! Error types for workspace domain validation.

use super::EntityKind;
use thiserror::Error;

/// Errors returned while constructing workspace domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// A board, lane, or task title is empty after trimming.
    #[error("{0} title must not be empty")]
    EmptyTitle(EntityKind),

    /// A position was negative.
    #[error("position must be non-negative, got {0}")]
    NegativePosition(i64),

    /// A position does not fit the storage range.
    #[error("position {0} exceeds the supported range")]
    PositionOutOfRange(i64),
}
