//! Welcome notifier that renders the message and records it as a `tracing`
//! event instead of delivering mail.

use async_trait::async_trait;
use minijinja::{Environment, context};

use crate::identity::{
    domain::Owner,
    ports::{NotifierError, NotifierResult, WelcomeNotifier},
};

const WELCOME_SUBJECT: &str = "Welcome to {{ app_name }}!";

const WELCOME_BODY: &str = "<html>
  <body>
    <h1>Welcome to {{ app_name }}, {{ full_name }}!</h1>
    <p>We are excited to have you on board.</p>
    <p>Get started by creating your first project board.</p>
    <p>Best regards,<br>The {{ app_name }} Team</p>
  </body>
</html>";

/// Rendered welcome message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeMessage {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub body: String,
}

/// [`WelcomeNotifier`] that emits the rendered message through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingWelcomeNotifier {
    app_name: String,
    mail_from: String,
}

impl TracingWelcomeNotifier {
    /// Creates a notifier for the given application name and sender.
    #[must_use]
    pub fn new(app_name: impl Into<String>, mail_from: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            mail_from: mail_from.into(),
        }
    }

    /// Renders the welcome message for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Render`] when a template fails to render.
    pub fn render(&self, owner: &Owner) -> NotifierResult<WelcomeMessage> {
        let environment = Environment::new();
        let ctx = context! {
            app_name => self.app_name.as_str(),
            full_name => owner.full_name(),
        };
        let subject = environment
            .render_str(WELCOME_SUBJECT, &ctx)
            .map_err(|error| NotifierError::Render(error.to_string()))?;
        let body = environment
            .render_str(WELCOME_BODY, &ctx)
            .map_err(|error| NotifierError::Render(error.to_string()))?;

        Ok(WelcomeMessage {
            from: self.mail_from.clone(),
            to: owner.email().to_string(),
            subject,
            body,
        })
    }
}

#[async_trait]
impl WelcomeNotifier for TracingWelcomeNotifier {
    async fn notify_welcome(&self, owner: &Owner) -> NotifierResult<()> {
        let message = self.render(owner)?;
        tracing::info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "welcome message dispatched"
        );
        tracing::debug!(body = %message.body, "welcome message body");
        Ok(())
    }
}
