//! Validated display titles.

use super::{EntityKind, WorkspaceDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-empty title of a board, lane, or task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a validated title for an entity of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyTitle`] when the value is blank.
    pub fn new(kind: EntityKind, value: impl Into<String>) -> Result<Self, WorkspaceDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WorkspaceDomainError::EmptyTitle(kind));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
