use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::common::job::{Job, JobRequest};
use crate::common::machine::{DirectoryMachine, MachineFilter, MachineKey};
use crate::server::rest_server::AppState;
use crate::traits::directory::DirectoryApi;
use crate::traits::workflow::WorkflowApi;

pub async fn list_machines(
    State(st): State<AppState>,
    Query(filter): Query<MachineFilter>,
) -> Result<Json<Vec<DirectoryMachine>>, StatusCode> {
    match st.directory.list_machines(&filter).await {
        Ok(machines) => Ok(Json(machines)),
        Err(e) => {
            log::error!("failed to list machines: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OwnerParam {
    pub owner_uuid: String,
}

pub async fn get_machine(
    State(st): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<OwnerParam>,
) -> Result<Json<DirectoryMachine>, StatusCode> {
    let key = MachineKey {
        uuid,
        owner_uuid: params.owner_uuid,
    };
    match st.directory.get_machine(&key).await {
        Ok(Some(machine)) => Ok(Json(machine)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            log::error!("failed to get machine {}: {:?}", key.uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvisionRequest {
    pub owner_uuid: String,
    pub alias: Option<String>,
    pub brand: Option<String>,
    pub ram: Option<u64>,
    pub server_uuid: Option<String>,
}

/// POST /machines submits a provision job to the workflow engine. The
/// machine record itself shows up later, once the new machine starts
/// heartbeating and gets reconciled into the directory.
pub async fn provision_machine(
    State(st): State<AppState>,
    Json(request): Json<ProvisionRequest>,
) -> Result<(StatusCode, Json<Job>), StatusCode> {
    let job_request = JobRequest {
        name: "provision".to_string(),
        target: request.server_uuid.clone(),
        params: serde_json::to_value(&request).unwrap_or(serde_json::Value::Null),
    };
    match st.workflow.create_job(&job_request).await {
        Ok(job) => Ok((StatusCode::ACCEPTED, Json(job))),
        Err(e) => {
            log::error!("failed to submit provision job: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
