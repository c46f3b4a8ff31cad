use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::clients::directory_impl::DirectoryImpl;
use crate::clients::workflow_impl::WorkflowImpl;
use crate::common::config::ServerConfig;
use crate::rest::{jobs, machines, tags};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub directory: Arc<DirectoryImpl>,
    pub workflow: Arc<WorkflowImpl>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route(
            "/machines",
            get(machines::list_machines).post(machines::provision_machine),
        )
        .route("/machines/{uuid}", get(machines::get_machine))
        .route(
            "/machines/{uuid}/tags",
            get(tags::list_tags).post(tags::set_tags),
        )
        .route(
            "/machines/{uuid}/tags/{key}",
            get(tags::get_tag).delete(tags::delete_tag),
        )
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/{uuid}", get(jobs::get_job))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn rest_server_start(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.api_port);
    log::info!("Starting REST API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let app = build_router(state);
    axum::serve(listener, app).await.map_err(|e| {
        error!("Failed to start server: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}

async fn health(State(st): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "config": {
            "cache_size": st.config.cache_size,
            "cache_ttl_secs": st.config.cache_ttl_secs,
        }
    }))
}
