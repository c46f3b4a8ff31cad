use crate::common::heartbeat::HeartbeatEvent;
use crate::sync::dispatcher::HeartbeatDispatcher;
use crate::traits::directory::DirectoryApi;
use crate::traits::inventory::InventoryApi;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The single heartbeat handler registered against the transport: drains
/// the channel and hands each event to the dispatcher. Every event runs in
/// its own task so a slow inventory fetch never stalls the stream; the
/// transport sees pure fire-and-forget.
pub fn spawn_heartbeat_listener<I, D>(
    mut rx: mpsc::Receiver<HeartbeatEvent>,
    dispatcher: Arc<HeartbeatDispatcher<I, D>>,
) -> JoinHandle<()>
where
    I: InventoryApi + Send + Sync + 'static,
    D: DirectoryApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .on_heartbeats(&event.server_uuid, &event.heartbeats)
                    .await;
            });
        }
        log::info!("heartbeat channel closed, listener exiting");
    })
}
