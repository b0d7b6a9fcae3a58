//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The full name is empty after trimming.
    #[error("full name must not be empty")]
    EmptyFullName,

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Error returned while parsing roles from persistence or token claims.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
