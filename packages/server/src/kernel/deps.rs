//! Server dependencies for the event pipeline (using traits for testability)
//!
//! This module provides the central dependency container used by the event
//! consumers. All external services use trait abstractions to enable testing.

use std::sync::Arc;

use crate::domains::applications::ApplicationRepository;
use crate::domains::jobs::JobRepository;
use crate::domains::users::UserRepository;
use crate::kernel::nats::NatsPublisher;
use crate::kernel::traits::{
    BaseEmailService, BaseMatchScorer, BasePushNotificationService, BaseReportRenderer,
};

/// Dependencies accessible to consumers and the export manager
/// (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub match_scorer: Arc<dyn BaseMatchScorer>,
    pub email_service: Arc<dyn BaseEmailService>,
    pub push_service: Arc<dyn BasePushNotificationService>,
    pub report_renderer: Arc<dyn BaseReportRenderer>,
    /// Publisher for the outbound bus subjects
    pub publisher: Arc<dyn NatsPublisher>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        match_scorer: Arc<dyn BaseMatchScorer>,
        email_service: Arc<dyn BaseEmailService>,
        push_service: Arc<dyn BasePushNotificationService>,
        report_renderer: Arc<dyn BaseReportRenderer>,
        publisher: Arc<dyn NatsPublisher>,
    ) -> Self {
        Self {
            users,
            jobs,
            applications,
            match_scorer,
            email_service,
            push_service,
            report_renderer,
            publisher,
        }
    }
}
