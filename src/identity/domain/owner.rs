//! Owner aggregate root.

use super::{EmailAddress, IdentityDomainError, OwnerId, PasswordDigest, Principal, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Registered account that can own boards and create tasks.
/// Serialization omits the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    id: OwnerId,
    email: EmailAddress,
    #[serde(skip_serializing)]
    password_digest: PasswordDigest,
    full_name: String,
    is_active: bool,
    role: Role,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOwnerData {
    /// Persisted owner identifier.
    pub id: OwnerId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted password digest.
    pub password_digest: PasswordDigest,
    /// Persisted display name.
    pub full_name: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Persisted role.
    pub role: Role,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Owner {
    /// Registers a new active owner with the [`Role::User`] role.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyFullName`] when the name is blank.
    pub fn register(
        email: EmailAddress,
        password_digest: PasswordDigest,
        full_name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        Ok(Self {
            id: OwnerId::new(),
            email,
            password_digest,
            full_name: normalize_full_name(full_name)?,
            is_active: true,
            role: Role::User,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an owner from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOwnerData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            password_digest: data.password_digest,
            full_name: data.full_name,
            is_active: data.is_active,
            role: data.role,
            created_at: data.created_at,
        }
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

    /// Returns the stored password digest.
    #[must_use]
    pub const fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns whether the account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the principal this owner acts as.
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.email.clone(), self.role)
    }

    /// Replaces the email address.
    pub fn change_email(&mut self, email: EmailAddress) {
        self.email = email;
    }

    /// Replaces the display name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyFullName`] when the name is blank.
    pub fn rename(&mut self, full_name: impl Into<String>) -> Result<(), IdentityDomainError> {
        self.full_name = normalize_full_name(full_name)?;
        Ok(())
    }

    /// Replaces the role.
    pub const fn assign_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Replaces the password digest.
    pub fn replace_password_digest(&mut self, digest: PasswordDigest) {
        self.password_digest = digest;
    }

    /// Marks the account inactive. Boards and tasks are kept.
    pub const fn deactivate(&mut self) {
        self.is_active = false;
    }
}

fn normalize_full_name(full_name: impl Into<String>) -> Result<String, IdentityDomainError> {
    let raw = full_name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentityDomainError::EmptyFullName);
    }
    Ok(trimmed.to_owned())
}
