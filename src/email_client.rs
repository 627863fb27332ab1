use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::domain::EmailAddress;

/// Client for the transactional-email provider's REST API.
///
/// Constructed once at startup and injected into handlers. The API key is
/// optional: its absence is a configuration error surfaced on every send,
/// never a reason to refuse to boot.
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    sender: String,
    recipient: EmailAddress,
    api_key: Option<Secret<String>>,
}

#[derive(thiserror::Error, Debug)]
pub enum EmailClientError {
    #[error("email provider API key is not configured")]
    MissingApiKey,
    #[error("email delivery request failed")]
    Delivery(#[from] reqwest::Error),
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        recipient: EmailAddress,
        api_key: Option<Secret<String>>,
        timeout: std::time::Duration,
    ) -> Self {
        let base_url = Url::parse(&base_url).expect("Failed to parse email provider base url");
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build http client");
        Self {
            http_client,
            base_url,
            sender,
            recipient,
            api_key,
        }
    }

    /// Requests delivery of one message to the fixed recipient. Exactly one
    /// attempt: failures are returned to the caller, never retried or queued.
    pub async fn send_email(
        &self,
        subject: &str,
        reply_to: &EmailAddress,
        html_body: &str,
    ) -> Result<(), EmailClientError> {
        // Checked before any network activity.
        let api_key = self.api_key.as_ref().ok_or(EmailClientError::MissingApiKey)?;
        let url = self
            .base_url
            .join("/emails")
            .expect("Failed to join /emails with base url");
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: self.recipient.as_ref(),
            subject,
            reply_to: reply_to.as_ref(),
            html: html_body,
        };
        self.http_client
            .post(url)
            .bearer_auth(api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?
            // `send` does not fail on status codes; map non-2xx manually.
            .error_for_status()?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    reply_to: &'a str,
    html: &'a str,
}
