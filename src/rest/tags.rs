use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::collections::HashMap;

use crate::common::machine::{DirectoryMachine, MachineKey};
use crate::rest::machines::OwnerParam;
use crate::server::rest_server::AppState;
use crate::traits::directory::DirectoryApi;

/// Tags live inside the machine record, so every mutation here is a
/// read-modify-replace through the directory client.
async fn load_machine(
    st: &AppState,
    uuid: String,
    owner_uuid: String,
) -> Result<DirectoryMachine, StatusCode> {
    let key = MachineKey { uuid, owner_uuid };
    match st.directory.get_machine(&key).await {
        Ok(Some(machine)) => Ok(machine),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            log::error!("failed to load machine {}: {:?}", key.uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn store_machine(st: &AppState, machine: &DirectoryMachine) -> Result<(), StatusCode> {
    st.directory.replace_machine(machine).await.map_err(|e| {
        log::error!("failed to update tags for machine {}: {:?}", machine.uuid, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn list_tags(
    State(st): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<OwnerParam>,
) -> Result<Json<HashMap<String, String>>, StatusCode> {
    let machine = load_machine(&st, uuid, params.owner_uuid).await?;
    Ok(Json(machine.tags))
}

pub async fn get_tag(
    State(st): State<AppState>,
    Path((uuid, key)): Path<(String, String)>,
    Query(params): Query<OwnerParam>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let machine = load_machine(&st, uuid, params.owner_uuid).await?;
    match machine.tags.get(&key) {
        Some(value) => Ok(Json(serde_json::json!({ key: value }))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn set_tags(
    State(st): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<OwnerParam>,
    Json(new_tags): Json<HashMap<String, String>>,
) -> Result<Json<HashMap<String, String>>, StatusCode> {
    let mut machine = load_machine(&st, uuid, params.owner_uuid).await?;
    machine.tags.extend(new_tags);
    store_machine(&st, &machine).await?;
    Ok(Json(machine.tags))
}

pub async fn delete_tag(
    State(st): State<AppState>,
    Path((uuid, key)): Path<(String, String)>,
    Query(params): Query<OwnerParam>,
) -> Result<StatusCode, StatusCode> {
    let mut machine = load_machine(&st, uuid, params.owner_uuid).await?;
    if machine.tags.remove(&key).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    store_machine(&st, &machine).await?;
    Ok(StatusCode::NO_CONTENT)
}
