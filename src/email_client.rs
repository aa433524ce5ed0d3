//! src/email_client.rs
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for the transactional-email provider's REST API.
///
/// Sender identity and the destination inbox are fixed at construction from
/// configuration; each call submits one message with the caller's reply-to,
/// subject and HTML body.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    from: String,
    recipient: String,
    api_key: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender_name: String,
        sender_email: String,
        recipient_email: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the HTTP client.");
        Self {
            http_client,
            base_url,
            from: format!("{} <{}>", sender_name, sender_email),
            recipient: recipient_email,
            api_key,
        }
    }

    /// Submit one message to the provider. Exactly one network call; any
    /// non-success status or undecodable response is surfaced as an error.
    /// Returns the provider-assigned message id when the provider reports
    /// one.
    pub async fn send_email(
        &self,
        reply_to: &str,
        subject: &str,
        html_content: &str,
    ) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: &self.from,
            to: [&self.recipient],
            reply_to,
            subject,
            html: html_content,
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json::<SendEmailResponse>()
            .await?;
        Ok(response.id)
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    #[serde(default)]
    id: Option<String>,
}
