//! Transport-neutral failure taxonomy shared by every service error.
//!
//! Services raise their own `thiserror` enums; a transport adapter only needs
//! [`Fault::kind`] to pick a stable status code for each failure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// The resource being acted upon is absent or not visible to the caller.
    NotFound,
    /// The resource is visible but the caller may not act on it.
    Forbidden,
    /// A supplied input or foreign reference failed validation.
    BadRequest,
    /// The request collides with existing state (for example a taken email).
    Conflict,
    /// The caller could not be authenticated.
    Unauthorized,
    /// Infrastructure failure unrelated to the caller's input.
    Internal,
}

impl FaultKind {
    /// Returns the HTTP status code conventionally used for this kind.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::BadRequest => 400,
            Self::Conflict => 409,
            Self::Unauthorized => 401,
            Self::Internal => 500,
        }
    }

    /// Returns the canonical machine-readable code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::BadRequest => "bad_request",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can be classified into a [`FaultKind`].
pub trait Fault: std::error::Error {
    /// Returns the classification of this failure.
    fn kind(&self) -> FaultKind;
}
