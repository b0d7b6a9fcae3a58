//! Outbound welcome notification port.

use crate::identity::domain::Owner;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Sends a welcome message to newly registered owners.
///
/// Delivery is best effort: callers log failures and carry on.
#[async_trait]
pub trait WelcomeNotifier: Send + Sync {
    /// Sends the welcome message for `owner`.
    async fn notify_welcome(&self, owner: &Owner) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The message body could not be rendered.
    #[error("failed to render welcome message: {0}")]
    Render(String),

    /// The message could not be delivered.
    #[error("failed to deliver welcome message: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
