//! Notification pipeline: domain event → orchestration → channel dispatch.

pub mod dispatcher;
pub mod events;
pub mod orchestrator;
pub mod payload;
pub mod templates;

pub use dispatcher::DispatchConsumer;
pub use events::{Channel, EmailTemplate, NotificationEvent};
pub use orchestrator::NotificationOrchestrator;
pub use payload::DispatchPayload;
pub use templates::TemplateRegistry;
