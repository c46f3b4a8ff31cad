use crate::common::job::{Job, JobRequest};
use anyhow::Result;
use uuid::Uuid;

/// Client contract for the workflow engine that runs provisioning and
/// lifecycle jobs.
#[trait_variant::make(WorkflowApi: Send)]
pub trait UnsendWorkflowApi {
    async fn create_job(&self, request: &JobRequest) -> Result<Job>;
    async fn get_job(&self, uuid: Uuid) -> Result<Option<Job>>;
    async fn list_jobs(&self) -> Result<Vec<Job>>;
}
