//! Template resolution table for the orchestrator.
//!
//! Maps `(event_type, channel)` to a pure builder function. Builders only
//! read the event payload and the target user, so resolving the same event
//! twice yields identical payloads. Unregistered combinations resolve to
//! `None`, which the orchestrator treats as a logged no-op for that channel.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domains::users::User;

use super::events::{event_types, Channel, EmailTemplate, NotificationEvent};
use super::payload::DispatchPayload;

type PayloadBuilder = Box<dyn Fn(&NotificationEvent, &User) -> DispatchPayload + Send + Sync>;

pub struct TemplateRegistry {
    builders: HashMap<(String, Channel), PayloadBuilder>,
}

impl TemplateRegistry {
    /// An empty registry. Most callers want [`TemplateRegistry::with_defaults`].
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Register a builder for an `(event_type, channel)` combination,
    /// replacing any previous registration.
    pub fn register<F>(&mut self, event_type: &str, channel: Channel, builder: F)
    where
        F: Fn(&NotificationEvent, &User) -> DispatchPayload + Send + Sync + 'static,
    {
        self.builders
            .insert((event_type.to_string(), channel), Box::new(builder));
    }

    /// Resolve a dispatch payload, or `None` when the combination is unknown.
    pub fn resolve(
        &self,
        event: &NotificationEvent,
        channel: Channel,
        user: &User,
    ) -> Option<DispatchPayload> {
        self.builders
            .get(&(event.event_type.clone(), channel))
            .map(|builder| builder(event, user))
    }

    /// The registry with the platform's built-in notification templates.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            event_types::JOB_APPLICATION_SUBMITTED,
            Channel::Email,
            |event, user| DispatchPayload::Email {
                to: user.email.clone(),
                subject: format!(
                    "Your application to {} has been submitted!",
                    text(&event.payload, "company")
                ),
                template: EmailTemplate::JobApplicationSubmitted,
                template_variables: variables(vec![
                    ("firstName", Value::String(user.first_name.clone())),
                    ("jobTitle", raw(&event.payload, "jobTitle")),
                    ("company", raw(&event.payload, "company")),
                    ("status", raw(&event.payload, "status")),
                ]),
            },
        );

        registry.register(
            event_types::JOB_APPLICATION_SUBMITTED,
            Channel::Push,
            |event, user| DispatchPayload::Push {
                to: user.device_token.clone().unwrap_or_default(),
                title: "Application Submitted ✅".to_string(),
                body: format!(
                    "Your application for {} at {} has been submitted!",
                    text(&event.payload, "jobTitle"),
                    text(&event.payload, "company")
                ),
                redirect_to: "/my-applications".to_string(),
                event_type: event.event_type.clone(),
            },
        );

        registry.register(
            event_types::JOB_APPLICATION_UPDATED,
            Channel::Email,
            |event, user| DispatchPayload::Email {
                to: user.email.clone(),
                subject: format!(
                    "Update on your application at {}",
                    text(&event.payload, "company")
                ),
                template: EmailTemplate::JobApplicationUpdated,
                template_variables: variables(vec![
                    ("firstName", Value::String(user.first_name.clone())),
                    ("jobTitle", raw(&event.payload, "jobTitle")),
                    ("company", raw(&event.payload, "company")),
                    ("status", raw(&event.payload, "status")),
                    (
                        "applicationUrl",
                        Value::String("https://upply.com/my-applications".to_string()),
                    ),
                ]),
            },
        );

        registry.register(
            event_types::JOB_APPLICATION_UPDATED,
            Channel::Push,
            |event, user| DispatchPayload::Push {
                to: user.device_token.clone().unwrap_or_default(),
                title: "Application Update 🎉".to_string(),
                body: format!(
                    "{} updated your application to '{}'",
                    text(&event.payload, "company"),
                    text(&event.payload, "status")
                ),
                redirect_to: "/my-applications".to_string(),
                event_type: event.event_type.clone(),
            },
        );

        registry.register(
            event_types::NEW_MATCHED_JOBS,
            Channel::Email,
            |event, user| DispatchPayload::Email {
                to: user.email.clone(),
                subject: format!(
                    "We found {} new jobs for you!",
                    text(&event.payload, "matchedCount")
                ),
                template: EmailTemplate::NewMatchedJobs,
                template_variables: variables(vec![
                    ("firstName", Value::String(user.first_name.clone())),
                    ("matchedCount", raw(&event.payload, "matchedCount")),
                    ("matchedJobs", raw(&event.payload, "matchedJobs")),
                    (
                        "jobsUrl",
                        Value::String("https://upply.com/jobs/matched".to_string()),
                    ),
                ]),
            },
        );

        registry.register(
            event_types::NEW_MATCHED_JOBS,
            Channel::Push,
            |event, user| DispatchPayload::Push {
                to: user.device_token.clone().unwrap_or_default(),
                title: "New Job Matches 🎯".to_string(),
                body: format!(
                    "We found {} new jobs matching your profile!",
                    text(&event.payload, "matchedCount")
                ),
                redirect_to: "/jobs/matched".to_string(),
                event_type: event.event_type.clone(),
            },
        );

        registry
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a payload value as display text, blank when absent.
fn text(payload: &Map<String, Value>, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// The payload value itself, blank string when absent.
fn raw(payload: &Map<String, Value>, key: &str) -> Value {
    payload
        .get(key)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

fn variables(entries: Vec<(&str, Value)>) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
