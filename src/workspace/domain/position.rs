//! Ordering and priority scalars.

use super::WorkspaceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display order of a lane within its board or a task within its lane.
///
/// Ascending positions give display order. Values are supplied by callers and
/// are not renumbered, so siblings may share a position or leave gaps. Every
/// position lies in `0..=Position::MAX`, the range of the `INTEGER` storage
/// column.
///
/// # Examples
///
/// ```
/// use taskmaster::workspace::domain::Position;
///
/// let first = Position::new(0)?;
/// assert_eq!(first.next()?.value(), 1);
/// assert!(Position::MAX.next().is_err());
/// assert!(Position::try_from(-1_i64).is_err());
/// # Ok::<(), taskmaster::workspace::domain::WorkspaceDomainError>(())
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Position(u32);

impl Position {
    /// The first position.
    pub const ZERO: Self = Self(0);

    /// The highest storable position.
    pub const MAX: Self = Self(i32::MAX.unsigned_abs());

    /// Creates a position from a value.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::PositionOutOfRange`] when `value`
    /// exceeds [`Position::MAX`].
    pub fn new(value: u32) -> Result<Self, WorkspaceDomainError> {
        if value > Self::MAX.0 {
            return Err(WorkspaceDomainError::PositionOutOfRange(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the position immediately after this one.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::PositionOutOfRange`] at
    /// [`Position::MAX`].
    pub fn next(self) -> Result<Self, WorkspaceDomainError> {
        Self::new(self.0.saturating_add(1))
    }
}

impl TryFrom<u32> for Position {
    type Error = WorkspaceDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Position {
    type Error = WorkspaceDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(WorkspaceDomainError::NegativePosition(value));
        }
        u32::try_from(value)
            .map_err(|_| WorkspaceDomainError::PositionOutOfRange(value))
            .and_then(Self::new)
    }
}

impl From<Position> for i64 {
    fn from(position: Position) -> Self {
        Self::from(position.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entities ordered by a [`Position`] among their siblings.
pub trait Positioned {
    /// Returns the entity's position.
    fn position(&self) -> Position;
}

/// Task priority. Higher values are more urgent; the default is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i32);

impl Priority {
    /// Creates a priority from a value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
