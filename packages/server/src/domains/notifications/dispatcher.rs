//! Consumer for `upply.notifications.dispatch.*`.
//!
//! Routes each resolved payload to its channel sender. The senders hand
//! off delivery and return immediately; a failure here is reported to the
//! driver loop, which logs it without touching any other payload.

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::kernel::traits::{BaseEmailService, BasePushNotificationService};

use super::payload::DispatchPayload;

pub struct DispatchConsumer {
    email_service: Arc<dyn BaseEmailService>,
    push_service: Arc<dyn BasePushNotificationService>,
}

impl DispatchConsumer {
    pub fn new(
        email_service: Arc<dyn BaseEmailService>,
        push_service: Arc<dyn BasePushNotificationService>,
    ) -> Self {
        Self {
            email_service,
            push_service,
        }
    }

    pub async fn handle(&self, payload: DispatchPayload) -> Result<()> {
        match payload {
            DispatchPayload::Email {
                to,
                subject,
                template,
                template_variables,
            } => {
                info!("Sending EMAIL to {}", to);
                self.email_service
                    .send_templated(&to, &subject, template.name(), template_variables)
                    .await?;
            }
            DispatchPayload::Push {
                to,
                title,
                body,
                redirect_to,
                event_type,
            } => {
                info!("Sending PUSH to device: {}", to);
                self.push_service
                    .send_notification(
                        &to,
                        &title,
                        &body,
                        json!({
                            "redirectTo": redirect_to,
                            "eventType": event_type,
                        }),
                    )
                    .await?;
            }
        }

        Ok(())
    }
}
