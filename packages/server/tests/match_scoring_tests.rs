// Tests for the match-calc consumer: score persistence and the
// at-most-effort failure policy.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::{application_for, harness, job_posted_by, user_with_token};
use upply_core::domains::applications::{ApplicationMatchEvent, MatchCalcConsumer};
use upply_core::kernel::test_dependencies::{FailingMatchScorer, FixedMatchScorer};

#[tokio::test]
async fn score_is_persisted_on_the_application() {
    let h = harness(Arc::new(FixedMatchScorer(87.5)));

    let user = user_with_token();
    let job = job_posted_by(Uuid::new_v4());
    let application = application_for(job.id, user.id, None);
    let application_id = application.id;

    h.users.insert(user.clone());
    h.jobs.insert(job.clone());
    h.applications.insert(application);

    let consumer = MatchCalcConsumer::new(h.deps.clone());
    consumer
        .handle(ApplicationMatchEvent {
            application_id,
            user_id: user.id,
            job_id: job.id,
        })
        .await
        .unwrap();

    assert_eq!(h.applications.stored_ratio(application_id), Some(87.5));
}

#[tokio::test]
async fn missing_user_fails_the_event_but_not_the_consumer() {
    let h = harness(Arc::new(FixedMatchScorer(87.5)));

    let user = user_with_token();
    let job = job_posted_by(Uuid::new_v4());
    let application = application_for(job.id, user.id, None);
    let application_id = application.id;

    h.jobs.insert(job.clone());
    h.applications.insert(application);

    let consumer = MatchCalcConsumer::new(h.deps.clone());
    let event = ApplicationMatchEvent {
        application_id,
        user_id: user.id,
        job_id: job.id,
    };

    // the user lookup misses: the handler reports the error for the
    // driver loop to log, and the score stays null
    assert!(consumer.handle(event.clone()).await.is_err());
    assert_eq!(h.applications.stored_ratio(application_id), None);

    // the consumer itself survives: the same event processes fine once
    // the user exists
    h.users.insert(user);
    consumer.handle(event).await.unwrap();
    assert_eq!(h.applications.stored_ratio(application_id), Some(87.5));
}

#[tokio::test]
async fn scorer_failure_leaves_the_score_null() {
    let h = harness(Arc::new(FailingMatchScorer));

    let user = user_with_token();
    let job = job_posted_by(Uuid::new_v4());
    let application = application_for(job.id, user.id, None);
    let application_id = application.id;

    h.users.insert(user.clone());
    h.jobs.insert(job.clone());
    h.applications.insert(application);

    let consumer = MatchCalcConsumer::new(h.deps.clone());
    let result = consumer
        .handle(ApplicationMatchEvent {
            application_id,
            user_id: user.id,
            job_id: job.id,
        })
        .await;

    assert!(result.is_err());
    assert_eq!(h.applications.stored_ratio(application_id), None);
}

#[tokio::test]
async fn missing_application_fails_the_event() {
    let h = harness(Arc::new(FixedMatchScorer(87.5)));

    let user = user_with_token();
    let job = job_posted_by(Uuid::new_v4());
    h.users.insert(user.clone());
    h.jobs.insert(job.clone());

    let consumer = MatchCalcConsumer::new(h.deps.clone());
    let result = consumer
        .handle(ApplicationMatchEvent {
            application_id: Uuid::new_v4(),
            user_id: user.id,
            job_id: job.id,
        })
        .await;

    assert!(result.is_err());
}
