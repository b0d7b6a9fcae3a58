//! Role policy for global operations.
//!
//! Roles gate operations that span every owner (listing accounts, assigning
//! roles). Per-resource access is decided separately by ownership checks, and
//! the two compose with plain boolean logic at each entry point.

use crate::identity::domain::{OwnerId, Principal, Role};
use std::fmt;
use thiserror::Error;

/// Global operation guarded by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminAction {
    /// List every registered owner.
    ListOwners,
    /// Change an owner's role.
    AssignRole,
}

impl AdminAction {
    /// Returns a stable name for logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListOwners => "list_owners",
            Self::AssignRole => "assign_role",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a principal's role does not permit an action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("role '{role}' is not permitted to {action}")]
pub struct AccessDenied {
    /// Role held by the caller.
    pub role: Role,
    /// Action that was attempted.
    pub action: AdminAction,
}

/// Static role → action table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl RolePolicy {
    /// Returns the roles allowed to perform `action`.
    #[must_use]
    pub const fn allowed_roles(action: AdminAction) -> &'static [Role] {
        match action {
            AdminAction::ListOwners | AdminAction::AssignRole => &[Role::Admin],
        }
    }

    /// Returns whether `role` may perform `action`.
    #[must_use]
    pub fn permits(role: Role, action: AdminAction) -> bool {
        Self::allowed_roles(action).contains(&role)
    }

    /// Fails unless the principal's role permits `action`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the role is not in the allowed set.
    pub fn require_action(
        principal: &Principal,
        action: AdminAction,
    ) -> Result<(), AccessDenied> {
        if Self::permits(principal.role(), action) {
            return Ok(());
        }
        tracing::debug!(
            principal = %principal.id(),
            role = %principal.role(),
            %action,
            "role policy denied action"
        );
        Err(AccessDenied {
            role: principal.role(),
            action,
        })
    }
}

/// Returns whether the principal is acting on its own account.
#[must_use]
pub fn acts_on_self(principal: &Principal, owner_id: OwnerId) -> bool {
    principal.id() == owner_id
}
