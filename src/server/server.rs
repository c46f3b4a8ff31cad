use crate::common::config::load_server_config;
use crate::server::listener::spawn_heartbeat_listener;
use crate::server::loader::{load_directory_client, load_inventory_client, load_workflow_client};
use crate::server::rest_server::{AppState, rest_server_start};
use crate::server::transport;
use crate::sync::cache::MachineCache;
use crate::sync::dispatcher::HeartbeatDispatcher;
use crate::sync::reconciler::Reconciler;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Events buffered between the heartbeat ingress and the listener task.
const HEARTBEAT_QUEUE_DEPTH: usize = 128;

pub async fn server_start(config_path: &str) -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting machine API server...");
    let config = Arc::new(load_server_config(config_path)?);

    let inventory = Arc::new(load_inventory_client(&config)?);
    let directory = Arc::new(load_directory_client(&config)?);
    let workflow = Arc::new(load_workflow_client(&config)?);

    // Heartbeat reconciliation pipeline: transport -> channel -> listener
    // -> dispatcher -> reconciler -> directory.
    let cache = MachineCache::new(
        config.cache_size,
        Duration::from_secs(config.cache_ttl_secs),
    );
    let reconciler = Reconciler::new(directory.clone());
    let dispatcher = Arc::new(HeartbeatDispatcher::new(cache, inventory, reconciler));

    let (tx, rx) = mpsc::channel(HEARTBEAT_QUEUE_DEPTH);
    spawn_heartbeat_listener(rx, dispatcher);

    let heartbeat_addr = format!("{}:{}", config.host, config.heartbeat_port);
    let heartbeat_listener = tokio::net::TcpListener::bind(&heartbeat_addr).await?;
    log::info!("Heartbeat ingress listening on {}", heartbeat_addr);
    let max_frame_len = config.max_frame_len;
    tokio::spawn(async move {
        if let Err(e) = transport::serve_heartbeats(heartbeat_listener, tx, max_frame_len).await {
            log::error!("heartbeat ingress terminated: {:?}", e);
        }
    });

    let state = AppState {
        config,
        directory,
        workflow,
    };
    rest_server_start(state).await
}
