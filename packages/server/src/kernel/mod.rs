pub mod consumer;
pub mod deps;
pub mod email;
pub mod nats;
pub mod push;
pub mod test_dependencies;
pub mod traits;

pub use consumer::{groups, run_consumer, subjects};
pub use deps::ServerDeps;
pub use nats::{NatsClientPublisher, NatsPublisher, PublishedMessage, TestNats};
pub use traits::{
    BaseEmailService, BaseMatchScorer, BasePushNotificationService, BaseReportRenderer,
};
