//! Domain model for owner identity.
//!
//! Credential hashing and token signing live behind the
//! [`CredentialService`](crate::identity::ports::CredentialService) port; the
//! domain only carries their opaque outputs.

mod credentials;
mod error;
mod ids;
mod owner;
mod principal;
mod role;

pub use credentials::{AccessToken, PasswordDigest, TokenClaims};
pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::{EmailAddress, OwnerId};
pub use owner::{Owner, PersistedOwnerData};
pub use principal::Principal;
pub use role::Role;
