use crate::common::job::{Job, JobRequest};
use crate::traits::workflow::UnsendWorkflowApi;
use anyhow::Result;
use reqwest::StatusCode;
use uuid::Uuid;

pub struct HttpWorkflowClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWorkflowClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl UnsendWorkflowApi for HttpWorkflowClient {
    async fn create_job(&self, request: &JobRequest) -> Result<Job> {
        let url = format!("{}/jobs", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "workflow engine returned {} submitting job {}",
                response.status(),
                request.name
            ));
        }
        Ok(response.json::<Job>().await?)
    }

    async fn get_job(&self, uuid: Uuid) -> Result<Option<Job>> {
        let url = format!("{}/jobs/{}", self.base_url, uuid);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "workflow engine returned {} for job {}",
                response.status(),
                uuid
            ));
        }
        Ok(Some(response.json::<Job>().await?))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let url = format!("{}/jobs", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "workflow engine returned {} listing jobs",
                response.status()
            ));
        }
        Ok(response.json::<Vec<Job>>().await?)
    }
}
