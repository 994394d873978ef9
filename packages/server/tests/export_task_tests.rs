// Lifecycle tests for the background export task manager:
// submit → poll → download, failure capture, and TTL-based reaping.

mod common;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use uuid::Uuid;

use common::{application_for, job_posted_by, user_with_token, user_without_token};
use upply_core::common::AppError;
use upply_core::domains::jobs::exports::{
    spawn_reaper_with_interval, ExportStatus, ExportTaskManager, InMemoryTaskStore,
};
use upply_core::domains::users::User;
use upply_core::kernel::test_dependencies::{
    InMemoryApplicationRepository, InMemoryJobRepository, MockReportRenderer,
};

struct ExportHarness {
    manager: Arc<ExportTaskManager>,
    renderer: Arc<MockReportRenderer>,
    recruiter: User,
    job_id: Uuid,
}

fn export_harness(renderer: MockReportRenderer, ttl: Duration) -> ExportHarness {
    common::init_tracing();

    let recruiter = user_with_token();
    let job = job_posted_by(recruiter.id);
    let job_id = job.id;

    let jobs = Arc::new(InMemoryJobRepository::new());
    jobs.insert(job);

    let applications = Arc::new(InMemoryApplicationRepository::new());
    applications.insert(application_for(job_id, Uuid::new_v4(), Some(72.0)));
    applications.insert(application_for(job_id, Uuid::new_v4(), None));
    applications.insert(application_for(job_id, Uuid::new_v4(), Some(91.0)));

    let renderer = Arc::new(renderer);
    let manager = Arc::new(ExportTaskManager::with_ttl(
        Arc::new(InMemoryTaskStore::new()),
        jobs,
        applications,
        renderer.clone(),
        ttl,
    ));

    ExportHarness {
        manager,
        renderer,
        recruiter,
        job_id,
    }
}

async fn wait_for_status(
    h: &ExportHarness,
    task_id: Uuid,
    status: ExportStatus,
) -> upply_core::domains::jobs::exports::ExportTaskResponse {
    for _ in 0..200 {
        let response = h
            .manager
            .get_status(h.job_id, task_id, &h.recruiter)
            .await
            .unwrap();
        if response.status == status {
            return response;
        }
        tokio::time::sleep(StdDuration::from_millis(5)).await;
    }
    panic!("timed out waiting for {status:?}");
}

#[tokio::test]
async fn submission_returns_processing_immediately() {
    let h = export_harness(MockReportRenderer::new(b"rows".to_vec()).gated(), Duration::seconds(600));

    let response = h.manager.start_export(h.job_id, &h.recruiter).await.unwrap();
    assert_eq!(response.status, ExportStatus::Processing);
    assert!(response.download_url.is_none());

    // still processing while the renderer is held
    let polled = h
        .manager
        .get_status(h.job_id, response.task_id, &h.recruiter)
        .await
        .unwrap();
    assert_eq!(polled.status, ExportStatus::Processing);

    h.renderer.release();
    let done = wait_for_status(&h, response.task_id, ExportStatus::Completed).await;
    let url = done.download_url.expect("completed task has a download url");
    assert!(url.contains(&response.task_id.to_string()));

    let bytes = h
        .manager
        .download(h.job_id, response.task_id, &h.recruiter)
        .await
        .unwrap();
    assert_eq!(bytes, b"rows");

    // the worker saw all three applications
    assert_eq!(h.renderer.rendered_row_counts(), vec![3]);
}

#[tokio::test]
async fn download_before_completion_is_rejected_not_blocked() {
    let h = export_harness(MockReportRenderer::new(b"rows".to_vec()).gated(), Duration::seconds(600));

    let response = h.manager.start_export(h.job_id, &h.recruiter).await.unwrap();
    let err = h
        .manager
        .download(h.job_id, response.task_id, &h.recruiter)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotReady(_)));

    h.renderer.release();
    wait_for_status(&h, response.task_id, ExportStatus::Completed).await;
}

#[tokio::test]
async fn worker_failure_is_captured_on_the_task() {
    let h = export_harness(
        MockReportRenderer::failing("spreadsheet backend exploded"),
        Duration::seconds(600),
    );

    let response = h.manager.start_export(h.job_id, &h.recruiter).await.unwrap();
    assert_eq!(response.status, ExportStatus::Processing);

    let failed = wait_for_status(&h, response.task_id, ExportStatus::Failed).await;
    assert!(failed.download_url.is_none());
    let message = failed.error_message.expect("failed task carries a message");
    assert!(message.contains("spreadsheet backend exploded"));

    // a failed task is never downloadable
    let err = h
        .manager
        .download(h.job_id, response.task_id, &h.recruiter)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotReady(_)));
}

#[tokio::test]
async fn reaped_tasks_are_unreachable_even_when_completed() {
    let h = export_harness(MockReportRenderer::new(b"rows".to_vec()), Duration::zero());

    let response = h.manager.start_export(h.job_id, &h.recruiter).await.unwrap();
    wait_for_status(&h, response.task_id, ExportStatus::Completed).await;

    let removed = h.manager.reap();
    assert_eq!(removed, 1);

    let err = h
        .manager
        .get_status(h.job_id, response.task_id, &h.recruiter)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = h
        .manager
        .download(h.job_id, response.task_id, &h.recruiter)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn reaper_loop_purges_on_its_own() {
    let h = export_harness(MockReportRenderer::new(b"rows".to_vec()), Duration::zero());

    let response = h.manager.start_export(h.job_id, &h.recruiter).await.unwrap();
    wait_for_status(&h, response.task_id, ExportStatus::Completed).await;

    let reaper = spawn_reaper_with_interval(h.manager.clone(), StdDuration::from_millis(10));

    let mut reaped = false;
    for _ in 0..200 {
        match h
            .manager
            .get_status(h.job_id, response.task_id, &h.recruiter)
            .await
        {
            Err(AppError::NotFound(_)) => {
                reaped = true;
                break;
            }
            _ => tokio::time::sleep(StdDuration::from_millis(5)).await,
        }
    }
    reaper.abort();
    assert!(reaped, "reaper never removed the expired task");
}

#[tokio::test]
async fn only_the_posting_recruiter_may_export() {
    let h = export_harness(MockReportRenderer::new(b"rows".to_vec()), Duration::seconds(600));
    let stranger = user_without_token();

    let err = h.manager.start_export(h.job_id, &stranger).await.unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    let response = h.manager.start_export(h.job_id, &h.recruiter).await.unwrap();
    let err = h
        .manager
        .get_status(h.job_id, response.task_id, &stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
}

#[tokio::test]
async fn unknown_ids_surface_as_not_found() {
    let h = export_harness(MockReportRenderer::new(b"rows".to_vec()), Duration::seconds(600));

    let err = h
        .manager
        .get_status(h.job_id, Uuid::new_v4(), &h.recruiter)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = h
        .manager
        .start_export(Uuid::new_v4(), &h.recruiter)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
