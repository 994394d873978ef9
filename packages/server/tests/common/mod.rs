#![allow(dead_code)]

// Shared fixtures for integration tests.

use std::sync::{Arc, Once};

use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use upply_core::domains::applications::{Application, ApplicationStatus};
use upply_core::domains::jobs::Job;
use upply_core::domains::notifications::{Channel, NotificationEvent};
use upply_core::domains::users::User;
use upply_core::kernel::test_dependencies::{
    InMemoryApplicationRepository, InMemoryJobRepository, InMemoryUserRepository,
    MockEmailService, MockPushNotificationService, MockReportRenderer,
};
use upply_core::kernel::traits::BaseMatchScorer;
use upply_core::kernel::{ServerDeps, TestNats};

static TRACING: Once = Once::new();

/// Install a test subscriber so `tracing` output from the pipeline is
/// visible under `--nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info,upply_core=debug".into()),
            )
            .with_test_writer()
            .init();
    });
}

pub fn user_with_token() -> User {
    User {
        id: Uuid::new_v4(),
        first_name: "Amina".to_string(),
        last_name: "Karim".to_string(),
        email: "amina@example.com".to_string(),
        university: Some("KTH".to_string()),
        device_token: Some("device-amina".to_string()),
    }
}

pub fn user_without_token() -> User {
    User {
        device_token: None,
        ..user_with_token()
    }
}

pub fn job_posted_by(recruiter: Uuid) -> Job {
    Job {
        id: Uuid::new_v4(),
        title: "Backend Engineer".to_string(),
        company: "Acme".to_string(),
        posted_by: recruiter,
    }
}

pub fn application_for(job_id: Uuid, applicant_id: Uuid, ratio: Option<f64>) -> Application {
    Application {
        id: Uuid::new_v4(),
        applicant_id,
        job_id,
        status: ApplicationStatus::Submitted,
        cover_letter: Some("I would love to join.".to_string()),
        matching_ratio: ratio,
        applied_at: Utc::now(),
    }
}

pub fn submitted_event(user_id: Uuid, channels: Vec<Channel>) -> NotificationEvent {
    let mut payload = Map::new();
    payload.insert("jobTitle".to_string(), json!("Backend Engineer"));
    payload.insert("company".to_string(), json!("Acme"));
    payload.insert("status".to_string(), json!("SUBMITTED"));
    notification_event("JOB_APPLICATION_SUBMITTED", user_id, channels, payload)
}

pub fn notification_event(
    event_type: &str,
    user_id: Uuid,
    channels: Vec<Channel>,
    payload: Map<String, Value>,
) -> NotificationEvent {
    NotificationEvent {
        event_id: Uuid::new_v4(),
        event_type: event_type.to_string(),
        user_id,
        channels,
        payload,
    }
}

/// Everything a test needs to drive the pipeline against mocks.
pub struct TestHarness {
    pub users: Arc<InMemoryUserRepository>,
    pub jobs: Arc<InMemoryJobRepository>,
    pub applications: Arc<InMemoryApplicationRepository>,
    pub email: Arc<MockEmailService>,
    pub push: Arc<MockPushNotificationService>,
    pub nats: Arc<TestNats>,
    pub deps: Arc<ServerDeps>,
}

pub fn harness(scorer: Arc<dyn BaseMatchScorer>) -> TestHarness {
    init_tracing();

    let users = Arc::new(InMemoryUserRepository::new());
    let jobs = Arc::new(InMemoryJobRepository::new());
    let applications = Arc::new(InMemoryApplicationRepository::new());
    let email = Arc::new(MockEmailService::new());
    let push = Arc::new(MockPushNotificationService::new());
    let nats = Arc::new(TestNats::new());
    let renderer = Arc::new(MockReportRenderer::new(b"report".to_vec()));

    let deps = Arc::new(ServerDeps::new(
        users.clone(),
        jobs.clone(),
        applications.clone(),
        scorer,
        email.clone(),
        push.clone(),
        renderer,
        nats.clone(),
    ));

    TestHarness {
        users,
        jobs,
        applications,
        email,
        push,
        nats,
        deps,
    }
}
