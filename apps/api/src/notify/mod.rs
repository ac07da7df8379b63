//! Outbound email: the single point of entry for all Resend API calls.
//!
//! Delivery is fire-and-forget: callers spawn the send and log a failure.
//! A failed send is never retried or surfaced to the request that caused it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivery backend seam. `AppState` carries an `Arc<dyn Notifier>`, swapped
/// at startup depending on whether email is configured.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError>;
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Sends through the Resend transactional email API.
#[derive(Clone)]
pub struct ResendNotifier {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendNotifier {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        let body = ResendRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(to = %message.to, "confirmation email accepted by Resend");
        Ok(())
    }
}

/// Stand-in used when `RESEND_API_KEY` or `EMAIL_FROM` is absent.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        debug!(to = %message.to, "email delivery not configured; skipping send");
        Ok(())
    }
}
