//! Export task lifecycle: submit, poll status, download.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::common::AppError;
use crate::domains::applications::{Application, ApplicationRepository};
use crate::domains::jobs::{Job, JobRepository};
use crate::domains::users::User;
use crate::kernel::traits::BaseReportRenderer;

use super::store::TaskStore;
use super::task::{ExportStatus, ExportTask, ExportTaskResponse, TASK_TTL};

pub struct ExportTaskManager {
    store: Arc<dyn TaskStore>,
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
    renderer: Arc<dyn BaseReportRenderer>,
    ttl: Duration,
}

impl ExportTaskManager {
    pub fn new(
        store: Arc<dyn TaskStore>,
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        renderer: Arc<dyn BaseReportRenderer>,
    ) -> Self {
        Self::with_ttl(store, jobs, applications, renderer, TASK_TTL)
    }

    /// Same as [`ExportTaskManager::new`] with a custom entry lifetime.
    pub fn with_ttl(
        store: Arc<dyn TaskStore>,
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        renderer: Arc<dyn BaseReportRenderer>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            jobs,
            applications,
            renderer,
            ttl,
        }
    }

    /// Start an export of all applications for `job_id`.
    ///
    /// Returns as soon as the task entry is registered; the rendering runs
    /// on its own worker and is observed only through the entry's state.
    pub async fn start_export(
        &self,
        job_id: Uuid,
        requester: &User,
    ) -> Result<ExportTaskResponse, AppError> {
        self.authorize(job_id, requester).await?;

        let mut rows = self.applications.find_all_by_job(job_id).await?;
        sort_for_export(&mut rows);

        let task = ExportTask::new(Uuid::new_v4(), job_id, self.ttl);
        let task_id = task.task_id;
        self.store.insert(task.clone());

        let store = Arc::clone(&self.store);
        let renderer = Arc::clone(&self.renderer);
        tokio::spawn(async move {
            match renderer.render(&rows).await {
                Ok(data) => {
                    info!("Export {} completed | {} bytes", task_id, data.len());
                    store.complete(task_id, data);
                }
                Err(e) => {
                    error!("Export {} failed | reason: {:#}", task_id, e);
                    store.fail(task_id, format!("{e:#}"));
                }
            }
        });

        info!("Export {} started for jobId: {}", task_id, job_id);
        Ok(ExportTaskResponse::from_task(&task, None))
    }

    /// Poll a task. `NotFound` covers ids that never existed and ids
    /// already reaped; the two are indistinguishable by design.
    pub async fn get_status(
        &self,
        job_id: Uuid,
        task_id: Uuid,
        requester: &User,
    ) -> Result<ExportTaskResponse, AppError> {
        self.authorize(job_id, requester).await?;
        let task = self.find_task(job_id, task_id)?;

        let download_url = (task.status == ExportStatus::Completed).then(|| {
            format!("/api/v1/jobs/{job_id}/applications/export/{task_id}/download")
        });

        Ok(ExportTaskResponse::from_task(&task, download_url))
    }

    /// Fetch the rendered report. Rejected (`NotReady`) while the task is
    /// still processing or has failed; never blocks, never returns partial
    /// bytes.
    pub async fn download(
        &self,
        job_id: Uuid,
        task_id: Uuid,
        requester: &User,
    ) -> Result<Vec<u8>, AppError> {
        self.authorize(job_id, requester).await?;
        let task = self.find_task(job_id, task_id)?;

        if task.status != ExportStatus::Completed {
            return Err(AppError::NotReady(
                "Export task is not completed yet".to_string(),
            ));
        }

        Ok(task.data.unwrap_or_default())
    }

    /// Drop every expired entry, whatever its status. Safe to run
    /// concurrently with submissions, workers and queries.
    pub fn reap(&self) -> usize {
        self.store.remove_expired(Utc::now())
    }

    async fn authorize(&self, job_id: Uuid, requester: &User) -> Result<Job, AppError> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job with ID {job_id}")))?;

        if job.posted_by != requester.id {
            return Err(AppError::PermissionDenied(
                "You are not permitted to export applications for this job".to_string(),
            ));
        }

        Ok(job)
    }

    fn find_task(&self, job_id: Uuid, task_id: Uuid) -> Result<ExportTask, AppError> {
        self.store
            .get(task_id)
            .filter(|task| task.job_id == job_id)
            .ok_or_else(|| AppError::NotFound(format!("Export task with ID {task_id}")))
    }
}

/// Recruiters read exports top-down: best matches first, unscored last.
fn sort_for_export(rows: &mut [Application]) {
    rows.sort_by(|a, b| match (a.matching_ratio, b.matching_ratio) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::applications::ApplicationStatus;

    fn app(ratio: Option<f64>) -> Application {
        Application {
            id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            status: ApplicationStatus::Submitted,
            cover_letter: None,
            matching_ratio: ratio,
            applied_at: Utc::now(),
        }
    }

    #[test]
    fn sorts_descending_with_unscored_last() {
        let mut rows = vec![app(None), app(Some(41.5)), app(Some(88.0)), app(None)];
        sort_for_export(&mut rows);

        let ratios: Vec<_> = rows.iter().map(|a| a.matching_ratio).collect();
        assert_eq!(ratios, vec![Some(88.0), Some(41.5), None, None]);
    }
}
