//! Authenticated request identity.

use super::{EmailAddress, OwnerId, Role, TokenClaims};
use serde::{Deserialize, Serialize};

/// Identity and role of the caller, rebuilt from a verified token on every
/// request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: OwnerId,
    email: EmailAddress,
    role: Role,
}

impl Principal {
    /// Creates a principal from its parts.
    #[must_use]
    pub const fn new(id: OwnerId, email: EmailAddress, role: Role) -> Self {
        Self { id, email, role }
    }

    /// Returns the owner identifier.
    #[must_use]
    pub const fn id(&self) -> OwnerId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl From<TokenClaims> for Principal {
    fn from(claims: TokenClaims) -> Self {
        Self::new(claims.owner_id, claims.email, claims.role)
    }
}
