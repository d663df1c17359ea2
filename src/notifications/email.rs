use sendgrid::{Destination, Mail, SGClient};
use tracing::{error, info, warn};

use super::NotificationError;
use crate::config::Config;

/// Outbound email. Without an API key every message is logged instead of sent,
/// which keeps local development and tests off the network.
#[derive(Clone)]
pub struct EmailSender {
    client: Option<SGClient>,
    email_from: String,
}

impl EmailSender {
    pub fn new(config: &Config) -> Self {
        let client = config.sendgrid_api_key.clone().map(SGClient::new);
        if client.is_none() {
            warn!("SendGrid API key not found. Email will be mocked.");
        }
        Self {
            client,
            email_from: config.email_from.clone(),
        }
    }

    pub fn mock(email_from: impl Into<String>) -> Self {
        Self {
            client: None,
            email_from: email_from.into(),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.client.is_none()
    }

    pub async fn send_email(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), NotificationError> {
        let Some(client) = &self.client else {
            info!("(Mock) Would send email to: {}", to_email);
            info!("(Mock) Subject: {}", subject);
            info!("(Mock) Body length: {} chars", html_body.len());
            crate::metrics::increment_notifications_sent("email");
            return Ok(());
        };

        // The SendGrid client is blocking reqwest, which must stay off the runtime workers.
        let client = client.clone();
        let to_email = to_email.to_string();
        let to_name = to_name.to_string();
        let subject = subject.to_string();
        let html_body = html_body.to_string();
        let email_from = self.email_from.clone();
        let to_email_log = to_email.clone();

        let result = run_blocking(move || {
            let mail = Mail::new()
                .add_to(Destination {
                    address: &to_email,
                    name: &to_name,
                })
                .add_from(&email_from)
                .add_subject(&subject)
                .add_html(&html_body);
            client.send(mail).map(|_| ()).map_err(|e| e.to_string())
        })
        .await;

        match result {
            Ok(()) => {
                info!("Email sent successfully to {}", to_email_log);
                crate::metrics::increment_notifications_sent("email");
                Ok(())
            }
            Err(e) => {
                error!("Failed to send email: {}", e);
                crate::metrics::increment_notifications_failed("email");
                Err(e)
            }
        }
    }
}

async fn run_blocking<F>(send: F) -> Result<(), NotificationError>
where
    F: FnOnce() -> Result<(), String> + Send + 'static,
{
    match tokio::task::spawn_blocking(send).await {
        Ok(result) => result.map_err(NotificationError::Send),
        Err(e) => Err(NotificationError::Send(format!("email task failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_mode_accepts_everything() {
        let sender = EmailSender::mock("noreply@gardenhub.app");
        assert!(sender.is_mock());
        sender
            .send_email("someone@example.com", "Someone", "Hello", "<p>Hi</p>")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn blocking_sends_run_off_the_async_workers() {
        // A nested runtime panics on an async worker but is fine on the blocking pool.
        let sent = run_blocking(|| {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .map_err(|e| e.to_string())?;
            rt.block_on(async {});
            Ok(())
        })
        .await;
        assert!(sent.is_ok());
    }

    #[tokio::test]
    async fn provider_failures_surface_as_send_errors() {
        let sent = run_blocking(|| Err("401 Unauthorized".to_string())).await;
        match sent {
            Err(NotificationError::Send(message)) => assert_eq!(message, "401 Unauthorized"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
