use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use super::traits::BasePushNotificationService;

/// FCM Push Notification Client
/// Sends push notifications to registered device tokens.
pub struct FcmPushClient {
    client: Client,
    api_url: String,
    access_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct PushMessage {
    to: String,
    title: String,
    body: String,
    data: serde_json::Value,
}

impl FcmPushClient {
    pub fn new(api_url: String, access_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url,
            access_token,
        }
    }
}

#[async_trait]
impl BasePushNotificationService for FcmPushClient {
    async fn send_notification(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()> {
        let message = PushMessage {
            to: device_token.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data,
        };

        let mut request = self.client.post(&self.api_url).json(&message);
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        // Hand off and return; delivery failures are logged at this
        // boundary and never reach the dispatch consumer.
        tokio::spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    info!("Push sent to device: {}", message.to);
                }
                Ok(response) => {
                    error!(
                        "Failed to send push to {} | status: {}",
                        message.to,
                        response.status()
                    );
                }
                Err(e) => {
                    error!("Failed to send push to {} | reason: {}", message.to, e);
                }
            }
        });

        Ok(())
    }
}
