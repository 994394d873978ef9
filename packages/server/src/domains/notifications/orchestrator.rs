//! Consumer for `upply.notifications.events`.
//!
//! Expands each domain notification event into channel-ready dispatch
//! payloads and republishes them, one subject per user so the bus keeps
//! per-user ordering.

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domains::users::UserRepository;
use crate::kernel::consumer::subjects;
use crate::kernel::nats::NatsPublisher;

use super::events::{Channel, NotificationEvent};
use super::templates::TemplateRegistry;

pub struct NotificationOrchestrator {
    users: Arc<dyn UserRepository>,
    publisher: Arc<dyn NatsPublisher>,
    templates: TemplateRegistry,
}

impl NotificationOrchestrator {
    pub fn new(users: Arc<dyn UserRepository>, publisher: Arc<dyn NatsPublisher>) -> Self {
        Self::with_templates(users, publisher, TemplateRegistry::with_defaults())
    }

    pub fn with_templates(
        users: Arc<dyn UserRepository>,
        publisher: Arc<dyn NatsPublisher>,
        templates: TemplateRegistry,
    ) -> Self {
        Self {
            users,
            publisher,
            templates,
        }
    }

    /// Fan an event out to its requested channels.
    ///
    /// A missing user aborts the whole event; everything after that is
    /// per-channel. A channel with no resolvable template, or PUSH for a
    /// user with no device token, is a logged skip. Publish failures are
    /// logged and not retried here: redelivery is the bus's business.
    pub async fn handle(&self, event: NotificationEvent) -> Result<()> {
        let user = self
            .users
            .find_by_id(event.user_id)
            .await?
            .ok_or_else(|| anyhow!("User not found: {}", event.user_id))?;

        if event.channels.is_empty() {
            warn!(
                "Notification event {} requested no channels",
                event.event_id
            );
            return Ok(());
        }

        // `channels` is a set in spirit; a producer that repeats a channel
        // must not cause duplicate dispatches
        let mut seen: Vec<Channel> = Vec::new();
        for channel in &event.channels {
            if seen.contains(channel) {
                continue;
            }
            seen.push(*channel);

            let Some(payload) = self.templates.resolve(&event, *channel, &user) else {
                warn!(
                    "No template resolved for eventType: {} channel: {:?}",
                    event.event_type, channel
                );
                continue;
            };

            if *channel == Channel::Push && user.device_token.is_none() {
                info!(
                    "Skipping PUSH for userId: {} — no device token",
                    event.user_id
                );
                continue;
            }

            let body = serde_json::to_vec(&payload).context("serialize dispatch payload")?;
            let subject = subjects::notification_dispatch(event.user_id);

            match self.publisher.publish(subject, Bytes::from(body)).await {
                Ok(()) => {
                    info!(
                        "Dispatched {:?} notification for userId: {}",
                        channel, event.user_id
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to publish {:?} dispatch for userId: {} | reason: {:#}",
                        channel, event.user_id, e
                    );
                }
            }
        }

        Ok(())
    }
}
