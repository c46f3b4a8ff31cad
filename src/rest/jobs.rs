use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::common::job::{Job, JobRequest};
use crate::server::rest_server::AppState;
use crate::traits::workflow::WorkflowApi;

pub async fn create_job(
    State(st): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<(StatusCode, Json<Job>), StatusCode> {
    match st.workflow.create_job(&request).await {
        Ok(job) => Ok((StatusCode::ACCEPTED, Json(job))),
        Err(e) => {
            log::error!("failed to submit job {}: {:?}", request.name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn get_job(
    State(st): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<Job>, StatusCode> {
    match st.workflow.get_job(uuid).await {
        Ok(Some(job)) => Ok(Json(job)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            log::error!("failed to get job {}: {:?}", uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn list_jobs(State(st): State<AppState>) -> Result<Json<Vec<Job>>, StatusCode> {
    match st.workflow.list_jobs().await {
        Ok(jobs) => Ok(Json(jobs)),
        Err(e) => {
            log::error!("failed to list jobs: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
