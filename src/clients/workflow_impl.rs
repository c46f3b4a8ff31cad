use crate::clients::http::http_workflow::HttpWorkflowClient;
use crate::clients::local::memory_workflow::MemoryWorkflow;
use crate::common::job::{Job, JobRequest};
use crate::traits::workflow::{UnsendWorkflowApi, WorkflowApi};
use anyhow::Result;
use uuid::Uuid;

pub enum WorkflowImpl {
    Http(HttpWorkflowClient),
    Memory(MemoryWorkflow),
}

impl WorkflowApi for WorkflowImpl {
    async fn create_job(&self, request: &JobRequest) -> Result<Job> {
        match self {
            WorkflowImpl::Http(c) => c.create_job(request).await,
            WorkflowImpl::Memory(m) => m.create_job(request).await,
        }
    }

    async fn get_job(&self, uuid: Uuid) -> Result<Option<Job>> {
        match self {
            WorkflowImpl::Http(c) => c.get_job(uuid).await,
            WorkflowImpl::Memory(m) => m.get_job(uuid).await,
        }
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        match self {
            WorkflowImpl::Http(c) => c.list_jobs().await,
            WorkflowImpl::Memory(m) => m.list_jobs().await,
        }
    }
}
