use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job submission payload forwarded to the workflow engine.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobRequest {
    pub name: String,
    /// Target machine or server uuid, when the job applies to one.
    pub target: Option<String>,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum JobExecution {
    Queued,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Job {
    pub uuid: Uuid,
    pub name: String,
    pub target: Option<String>,
    pub params: serde_json::Value,
    pub execution: JobExecution,
    pub created_at: DateTime<Utc>,
}
