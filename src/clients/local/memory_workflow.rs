use crate::common::job::{Job, JobExecution, JobRequest};
use crate::traits::workflow::UnsendWorkflowApi;
use anyhow::Result;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Standalone workflow backend: accepts jobs and keeps them queued in
/// memory. Nothing ever runs them; it exists so the job endpoints work
/// without a workflow engine.
pub struct MemoryWorkflow {
    jobs: Mutex<Vec<Job>>,
}

impl MemoryWorkflow {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl UnsendWorkflowApi for MemoryWorkflow {
    async fn create_job(&self, request: &JobRequest) -> Result<Job> {
        let job = Job {
            uuid: Uuid::new_v4(),
            name: request.name.clone(),
            target: request.target.clone(),
            params: request.params.clone(),
            execution: JobExecution::Queued,
            created_at: Utc::now(),
        };
        self.jobs.lock().await.push(job.clone());
        Ok(job)
    }

    async fn get_job(&self, uuid: Uuid) -> Result<Option<Job>> {
        let jobs = self.jobs.lock().await;
        Ok(jobs.iter().find(|job| job.uuid == uuid).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.jobs.lock().await.clone())
    }
}
