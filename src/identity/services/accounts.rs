//! Service layer for owner registration, login, and self-service account
//! management.

use super::policy::{AccessDenied, AdminAction, RolePolicy, acts_on_self};
use crate::fault::{Fault, FaultKind};
use crate::identity::{
    domain::{
        AccessToken, EmailAddress, IdentityDomainError, Owner, OwnerId, Principal, Role,
        TokenClaims,
    },
    ports::{
        CredentialError, CredentialService, OwnerRepository, OwnerRepositoryError,
        WelcomeNotifier,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default access token lifetime in minutes.
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Request payload for registering a new owner.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterOwnerRequest {
    email: String,
    password: String,
    full_name: String,
}

impl RegisterOwnerRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: full_name.into(),
        }
    }
}

impl std::fmt::Debug for RegisterOwnerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterOwnerRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Partial update for an owner profile. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOwnerRequest {
    email: Option<String>,
    full_name: Option<String>,
    role: Option<Role>,
}

impl UpdateOwnerRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets a new display name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets a new role. Requires [`AdminAction::AssignRole`].
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(EmailAddress),

    /// Email and password did not match an active owner.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The access token could not be validated.
    #[error("could not validate access token")]
    InvalidToken,

    /// The owner does not exist.
    #[error("owner not found: {0}")]
    OwnerNotFound(OwnerId),

    /// The caller attempted to act on another owner's account.
    #[error("not authorized to act on owner {0}")]
    NotSelf(OwnerId),

    /// The caller's role does not permit the operation.
    #[error(transparent)]
    Denied(#[from] AccessDenied),

    /// The current password supplied for a password change was wrong.
    #[error("current password is incorrect")]
    IncorrectPassword,

    /// Credential backend failure.
    #[error(transparent)]
    Credentials(CredentialError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(OwnerRepositoryError),
}

impl From<OwnerRepositoryError> for AccountServiceError {
    fn from(err: OwnerRepositoryError) -> Self {
        match err {
            OwnerRepositoryError::DuplicateEmail(email) => Self::EmailTaken(email),
            OwnerRepositoryError::NotFound(owner_id) => Self::OwnerNotFound(owner_id),
            other @ OwnerRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

impl Fault for AccountServiceError {
    fn kind(&self) -> FaultKind {
        match self {
            Self::Domain(_) | Self::IncorrectPassword => FaultKind::BadRequest,
            Self::EmailTaken(_) => FaultKind::Conflict,
            Self::InvalidCredentials | Self::InvalidToken => FaultKind::Unauthorized,
            Self::OwnerNotFound(_) => FaultKind::NotFound,
            Self::NotSelf(_) | Self::Denied(_) => FaultKind::Forbidden,
            Self::Credentials(_) | Self::Repository(_) => FaultKind::Internal,
        }
    }
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Owner account orchestration service.
#[derive(Clone)]
pub struct AccountService<R, H, N, C>
where
    R: OwnerRepository,
    H: CredentialService,
    N: WelcomeNotifier,
    C: Clock + Send + Sync,
{
    owners: Arc<R>,
    credentials: Arc<H>,
    notifier: Arc<N>,
    clock: Arc<C>,
    token_ttl: chrono::Duration,
}

impl<R, H, N, C> AccountService<R, H, N, C>
where
    R: OwnerRepository,
    H: CredentialService,
    N: WelcomeNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new account service with a 30 minute token lifetime.
    #[must_use]
    pub fn new(owners: Arc<R>, credentials: Arc<H>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            owners,
            credentials,
            notifier,
            clock,
            token_ttl: chrono::Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    /// Overrides the access token lifetime.
    #[must_use]
    pub const fn with_token_ttl(mut self, token_ttl: chrono::Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Registers a new owner and sends the welcome notification.
    ///
    /// Notification failures are logged and do not fail registration.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] for invalid input and
    /// [`AccountServiceError::EmailTaken`] when the email is registered.
    pub async fn register(&self, request: RegisterOwnerRequest) -> AccountServiceResult<Owner> {
        let RegisterOwnerRequest {
            email,
            password,
            full_name,
        } = request;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(IdentityDomainError::EmptyPassword.into());
        }
        if self.owners.find_by_email(&email).await?.is_some() {
            return Err(AccountServiceError::EmailTaken(email));
        }

        let digest = self
            .credentials
            .hash(&password)
            .await
            .map_err(AccountServiceError::Credentials)?;
        let owner = Owner::register(email, digest, full_name, &*self.clock)?;
        self.owners.store(&owner).await?;
        tracing::info!(owner = %owner.id(), "owner registered");

        if let Err(error) = self.notifier.notify_welcome(&owner).await {
            tracing::warn!(owner = %owner.id(), %error, "welcome notification failed");
        }
        Ok(owner)
    }

    /// Authenticates by email and password and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidCredentials`] when the email is
    /// unknown, the password does not match, or the account is deactivated.
    pub async fn login(&self, email: &str, password: &str) -> AccountServiceResult<AccessToken> {
        let Ok(email) = EmailAddress::new(email) else {
            return Err(AccountServiceError::InvalidCredentials);
        };
        let Some(owner) = self.owners.find_by_email(&email).await? else {
            return Err(AccountServiceError::InvalidCredentials);
        };
        let matches = self
            .credentials
            .verify(password, owner.password_digest())
            .await
            .map_err(AccountServiceError::Credentials)?;
        if !matches || !owner.is_active() {
            tracing::debug!(owner = %owner.id(), "login rejected");
            return Err(AccountServiceError::InvalidCredentials);
        }

        let claims = TokenClaims {
            owner_id: owner.id(),
            email: owner.email().clone(),
            role: owner.role(),
        };
        self.credentials
            .issue_token(claims, self.token_ttl)
            .await
            .map_err(AccountServiceError::Credentials)
    }

    /// Resolves an access token into the calling principal.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidToken`] when the token is
    /// unknown, malformed, or expired.
    pub async fn authenticate(&self, token: &str) -> AccountServiceResult<Principal> {
        let claims = self
            .credentials
            .verify_token(token)
            .await
            .map_err(|error| match error {
                CredentialError::InvalidToken | CredentialError::ExpiredToken => {
                    AccountServiceError::InvalidToken
                }
                other => AccountServiceError::Credentials(other),
            })?;
        Ok(Principal::from(claims))
    }

    /// Returns the account of the calling principal.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::OwnerNotFound`] when the account no
    /// longer exists.
    pub async fn current_owner(&self, principal: &Principal) -> AccountServiceResult<Owner> {
        self.find_owner(principal.id()).await
    }

    /// Returns an owner by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::OwnerNotFound`] when absent.
    pub async fn find_owner(&self, owner_id: OwnerId) -> AccountServiceResult<Owner> {
        self.owners
            .find_by_id(owner_id)
            .await?
            .ok_or(AccountServiceError::OwnerNotFound(owner_id))
    }

    /// Lists every owner. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Denied`] unless the role policy permits
    /// [`AdminAction::ListOwners`].
    pub async fn list_owners(&self, principal: &Principal) -> AccountServiceResult<Vec<Owner>> {
        RolePolicy::require_action(principal, AdminAction::ListOwners)?;
        Ok(self.owners.list_all().await?)
    }

    /// Applies a partial profile update to the caller's own account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotSelf`] when `owner_id` is not the
    /// caller, [`AccountServiceError::Denied`] when a role change is not
    /// permitted, [`AccountServiceError::EmailTaken`] on an email clash, and
    /// [`AccountServiceError::Domain`] for invalid values.
    pub async fn update_owner(
        &self,
        principal: &Principal,
        owner_id: OwnerId,
        request: UpdateOwnerRequest,
    ) -> AccountServiceResult<Owner> {
        Self::require_self(principal, owner_id)?;
        if request.role.is_some() {
            RolePolicy::require_action(principal, AdminAction::AssignRole)?;
        }

        let mut owner = self.find_owner(owner_id).await?;
        if let Some(email) = request.email {
            owner.change_email(EmailAddress::new(email)?);
        }
        if let Some(full_name) = request.full_name {
            owner.rename(full_name)?;
        }
        if let Some(role) = request.role {
            owner.assign_role(role);
        }

        self.owners.update(&owner).await?;
        tracing::info!(owner = %owner.id(), "owner profile updated");
        Ok(owner)
    }

    /// Deactivates the caller's own account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotSelf`] when `owner_id` is not the
    /// caller and [`AccountServiceError::OwnerNotFound`] when absent.
    pub async fn deactivate_owner(
        &self,
        principal: &Principal,
        owner_id: OwnerId,
    ) -> AccountServiceResult<Owner> {
        Self::require_self(principal, owner_id)?;
        let mut owner = self.find_owner(owner_id).await?;
        owner.deactivate();
        self.owners.update(&owner).await?;
        tracing::info!(owner = %owner.id(), "owner deactivated");
        Ok(owner)
    }

    /// Replaces the caller's password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::IncorrectPassword`] when
    /// `old_password` does not match and [`AccountServiceError::Domain`] when
    /// `new_password` is empty.
    pub async fn change_password(
        &self,
        principal: &Principal,
        old_password: &str,
        new_password: &str,
    ) -> AccountServiceResult<()> {
        let mut owner = self.current_owner(principal).await?;
        let matches = self
            .credentials
            .verify(old_password, owner.password_digest())
            .await
            .map_err(AccountServiceError::Credentials)?;
        if !matches {
            return Err(AccountServiceError::IncorrectPassword);
        }
        if new_password.is_empty() {
            return Err(IdentityDomainError::EmptyPassword.into());
        }

        let digest = self
            .credentials
            .hash(new_password)
            .await
            .map_err(AccountServiceError::Credentials)?;
        owner.replace_password_digest(digest);
        self.owners.update(&owner).await?;
        tracing::info!(owner = %owner.id(), "password changed");
        Ok(())
    }

    fn require_self(principal: &Principal, owner_id: OwnerId) -> AccountServiceResult<()> {
        if acts_on_self(principal, owner_id) {
            return Ok(());
        }
        tracing::debug!(
            principal = %principal.id(),
            owner = %owner_id,
            "cross-account access denied"
        );
        Err(AccountServiceError::NotSelf(owner_id))
    }
}
