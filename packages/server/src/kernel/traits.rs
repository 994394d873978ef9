// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "fan out a notification event") lives in domain
// code that uses these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEmailService)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::applications::Application;
use crate::domains::jobs::Job;
use crate::domains::users::User;

// =============================================================================
// Email Service Trait (Infrastructure - transactional mail)
// =============================================================================

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Send a templated email. `template` is the template file name known to
    /// the mail provider; `variables` fill its placeholders.
    ///
    /// Best-effort: implementations hand off delivery and report only the
    /// hand-off result, never the delivery outcome.
    async fn send_templated(
        &self,
        to: &str,
        subject: &str,
        template: &str,
        variables: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()>;

    /// Send a plain-text email without a template.
    async fn send_simple(&self, to: &str, subject: &str, text: &str) -> Result<()>;
}

// =============================================================================
// Push Notification Trait (Infrastructure - device push)
// =============================================================================

#[async_trait]
pub trait BasePushNotificationService: Send + Sync {
    /// Send a push notification to a device token.
    ///
    /// Best-effort, same hand-off contract as `BaseEmailService`.
    async fn send_notification(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()>;
}

// =============================================================================
// Match Scorer Trait (Infrastructure - opaque semantic scoring engine)
// =============================================================================

#[async_trait]
pub trait BaseMatchScorer: Send + Sync {
    /// Score how well a user's profile matches a job, in percent (0..=100).
    async fn score(&self, user: &User, job: &Job) -> Result<f64>;
}

// =============================================================================
// Report Renderer Trait (Infrastructure - opaque spreadsheet rendering)
// =============================================================================

#[async_trait]
pub trait BaseReportRenderer: Send + Sync {
    /// Render the given application rows into a downloadable report.
    async fn render(&self, rows: &[Application]) -> Result<Vec<u8>>;
}
