use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use super::traits::BaseEmailService;

/// Transactional Mail API Client
/// Hands emails to the provider's HTTP API; the provider renders the
/// named template server-side.
pub struct MailerClient {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Debug, Serialize)]
struct MailRequest {
    from: String,
    to: String,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl MailerClient {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            from,
        }
    }

    /// Hand the request off to a background send. The dispatch consumer
    /// must not wait on provider latency; delivery failures are logged
    /// here at the sender boundary and never surfaced.
    fn send_detached(&self, request: MailRequest) {
        let client = self.client.clone();
        let api_url = self.api_url.clone();
        let api_key = self.api_key.clone();

        tokio::spawn(async move {
            let to = request.to.clone();
            let response = client
                .post(&api_url)
                .bearer_auth(&api_key)
                .json(&request)
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => {
                    info!("Email sent to {} | template: {:?}", to, request.template);
                }
                Ok(response) => {
                    error!(
                        "Failed to send email to {} | status: {}",
                        to,
                        response.status()
                    );
                }
                Err(e) => {
                    error!("Failed to send email to {} | reason: {}", to, e);
                }
            }
        });
    }
}

#[async_trait]
impl BaseEmailService for MailerClient {
    async fn send_templated(
        &self,
        to: &str,
        subject: &str,
        template: &str,
        variables: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        self.send_detached(MailRequest {
            from: self.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            template: Some(template.to_string()),
            variables: Some(variables),
            text: None,
        });
        Ok(())
    }

    async fn send_simple(&self, to: &str, subject: &str, text: &str) -> Result<()> {
        self.send_detached(MailRequest {
            from: self.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            template: None,
            variables: None,
            text: Some(text.to_string()),
        });
        Ok(())
    }
}
