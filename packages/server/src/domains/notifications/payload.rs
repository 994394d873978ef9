use serde::{Deserialize, Serialize};

use super::events::{Channel, EmailTemplate};

/// A channel-ready, fully-resolved notification message.
///
/// One instance is produced per (event, channel) pair by the orchestrator
/// and consumed exactly once by the dispatch consumer. The tagged-union
/// shape guarantees no variant ever carries the other channel's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchPayload {
    Email {
        to: String,
        subject: String,
        template: EmailTemplate,
        template_variables: serde_json::Map<String, serde_json::Value>,
    },
    Push {
        to: String,
        title: String,
        body: String,
        redirect_to: String,
        event_type: String,
    },
}

impl DispatchPayload {
    pub fn channel(&self) -> Channel {
        match self {
            DispatchPayload::Email { .. } => Channel::Email,
            DispatchPayload::Push { .. } => Channel::Push,
        }
    }
}
