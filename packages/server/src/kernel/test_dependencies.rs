// TestDependencies - mock implementations for testing
//
// Provides mock services and in-memory repositories that can be injected
// into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::domains::applications::{Application, ApplicationRepository};
use crate::domains::jobs::{Job, JobRepository};
use crate::domains::users::{User, UserRepository};

use super::traits::{
    BaseEmailService, BaseMatchScorer, BasePushNotificationService, BaseReportRenderer,
};

// =============================================================================
// In-memory repositories
// =============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, job: Job) {
        self.jobs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(job.id, job);
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>> {
        Ok(self
            .jobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<HashMap<Uuid, Application>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, application: Application) {
        self.applications
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(application.id, application);
    }

    /// The ratio currently stored for an application, if any.
    pub fn stored_ratio(&self, application_id: Uuid) -> Option<f64> {
        self.applications
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&application_id)
            .and_then(|a| a.matching_ratio)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        Ok(self
            .applications
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }

    async fn find_all_by_job(&self, job_id: Uuid) -> Result<Vec<Application>> {
        Ok(self
            .applications
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn save_matching_ratio(&self, application_id: Uuid, ratio: f64) -> Result<()> {
        let mut applications = self.applications.write().unwrap_or_else(|e| e.into_inner());
        let application = applications
            .get_mut(&application_id)
            .ok_or_else(|| anyhow!("Application not found: {}", application_id))?;
        application.matching_ratio = Some(ratio);
        Ok(())
    }
}

// =============================================================================
// Mock Email Service
// =============================================================================

/// Arguments captured from a templated send.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub template: String,
    pub variables: serde_json::Map<String, serde_json::Value>,
}

#[derive(Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail: AtomicBool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send return an error.
    pub fn failing() -> Self {
        let service = Self::default();
        service.fail.store(true, Ordering::SeqCst);
        service
    }

    /// Get all emails that were sent.
    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Check if an email was sent to the given address.
    pub fn was_sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == to)
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send_templated(
        &self,
        to: &str,
        subject: &str,
        template: &str,
        variables: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("mail provider unavailable"));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            template: template.to_string(),
            variables,
        });
        Ok(())
    }

    async fn send_simple(&self, to: &str, subject: &str, text: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("mail provider unavailable"));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            template: String::new(),
            variables: [("text".to_string(), serde_json::json!(text))]
                .into_iter()
                .collect(),
        });
        Ok(())
    }
}

// =============================================================================
// Mock Push Notification Service
// =============================================================================

#[derive(Default)]
pub struct MockPushNotificationService {
    sent_notifications: Arc<Mutex<Vec<(String, String, String, serde_json::Value)>>>,
    fail: AtomicBool,
}

impl MockPushNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let service = Self::default();
        service.fail.store(true, Ordering::SeqCst);
        service
    }

    /// Get all notifications that were sent.
    pub fn sent_notifications(&self) -> Vec<(String, String, String, serde_json::Value)> {
        self.sent_notifications.lock().unwrap().clone()
    }

    /// Check if a notification was sent with the given title.
    pub fn was_sent_with_title(&self, title: &str) -> bool {
        self.sent_notifications
            .lock()
            .unwrap()
            .iter()
            .any(|(_, t, _, _)| t == title)
    }
}

#[async_trait]
impl BasePushNotificationService for MockPushNotificationService {
    async fn send_notification(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("push provider unavailable"));
        }
        self.sent_notifications.lock().unwrap().push((
            device_token.to_string(),
            title.to_string(),
            body.to_string(),
            data,
        ));
        Ok(())
    }
}

// =============================================================================
// Mock Match Scorer
// =============================================================================

/// Scorer that returns the same score for every pair.
pub struct FixedMatchScorer(pub f64);

#[async_trait]
impl BaseMatchScorer for FixedMatchScorer {
    async fn score(&self, _user: &User, _job: &Job) -> Result<f64> {
        Ok(self.0)
    }
}

/// Scorer that always fails, for exercising the at-most-effort path.
pub struct FailingMatchScorer;

#[async_trait]
impl BaseMatchScorer for FailingMatchScorer {
    async fn score(&self, _user: &User, _job: &Job) -> Result<f64> {
        Err(anyhow!("embedding engine timed out"))
    }
}

// =============================================================================
// Mock Report Renderer
// =============================================================================

/// Renderer with controllable output, failure and timing.
///
/// With a gate attached the render call blocks until [`release`] is
/// invoked, which lets tests observe the `Processing` state
/// deterministically.
///
/// [`release`]: MockReportRenderer::release
pub struct MockReportRenderer {
    output: Vec<u8>,
    fail_with: Option<String>,
    gate: Option<Arc<Notify>>,
    rendered_row_counts: Arc<Mutex<Vec<usize>>>,
}

impl MockReportRenderer {
    pub fn new(output: Vec<u8>) -> Self {
        Self {
            output,
            fail_with: None,
            gate: None,
            rendered_row_counts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            output: Vec::new(),
            fail_with: Some(message.to_string()),
            gate: None,
            rendered_row_counts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hold every render until released.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one pending (or the next) render proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Row counts seen by each render call.
    pub fn rendered_row_counts(&self) -> Vec<usize> {
        self.rendered_row_counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseReportRenderer for MockReportRenderer {
    async fn render(&self, rows: &[Application]) -> Result<Vec<u8>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.rendered_row_counts.lock().unwrap().push(rows.len());
        if let Some(message) = &self.fail_with {
            return Err(anyhow!("{message}"));
        }
        Ok(self.output.clone())
    }
}
