//! Port contracts for owner identity.
//!
//! Ports define infrastructure-agnostic interfaces used by identity services.

pub mod credentials;
pub mod notifier;
pub mod repository;

pub use credentials::{CredentialError, CredentialResult, CredentialService};
pub use notifier::{NotifierError, NotifierResult, WelcomeNotifier};
pub use repository::{OwnerRepository, OwnerRepositoryError, OwnerRepositoryResult};
