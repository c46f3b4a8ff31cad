use crate::common::heartbeat::HeartbeatTuple;
use crate::common::machine::DirectoryMachine;
use crate::sync::cache::MachineCache;
use crate::sync::reconciler::Reconciler;
use crate::traits::directory::DirectoryApi;
use crate::traits::inventory::InventoryApi;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Consumes heartbeat batches and decides, per machine, whether anything
/// needs to be fetched from the inventory service and reconciled into the
/// directory. The cache is the change-detection oracle and is owned
/// exclusively by this dispatcher.
///
/// Inventory errors are logged and the tuple dropped; because the cache is
/// only written after a successful fetch, the next heartbeat retries
/// naturally. Heartbeats for the same machine can overlap in flight; the
/// resulting duplicate fetches and directory writes are tolerated and
/// converge on the next cycle.
pub struct HeartbeatDispatcher<I, D> {
    inventory: Arc<I>,
    reconciler: Reconciler<D>,
    cache: Mutex<MachineCache>,
}

impl<I, D> HeartbeatDispatcher<I, D>
where
    I: InventoryApi + Send + Sync,
    D: DirectoryApi + Send + Sync,
{
    pub fn new(cache: MachineCache, inventory: Arc<I>, reconciler: Reconciler<D>) -> Self {
        Self {
            inventory,
            reconciler,
            cache: Mutex::new(cache),
        }
    }

    /// Process one heartbeat batch from the given compute node. Never
    /// fails; per-tuple errors are logged and the rest of the batch keeps
    /// going.
    pub async fn on_heartbeats(&self, server_uuid: &str, heartbeats: &[Value]) {
        for raw in heartbeats {
            let Some(tuple) = HeartbeatTuple::parse(raw) else {
                log::warn!(
                    "skipping malformed heartbeat tuple from server {}: {}",
                    server_uuid,
                    raw
                );
                continue;
            };
            if tuple.is_global() {
                continue;
            }
            log::trace!(
                "heartbeat for machine {} on server {}: {}",
                tuple.uuid,
                server_uuid,
                tuple.status
            );

            let cached = self.cache.lock().await.get(&tuple.uuid);
            match cached {
                Some(old) => self.known_machine(server_uuid, old).await,
                None => self.new_machine(server_uuid, &tuple.uuid).await,
            }
        }
    }

    /// First sighting of a machine: fetch it, remember its projection and
    /// push it into the directory.
    async fn new_machine(&self, server_uuid: &str, uuid: &str) {
        let machine = match self.inventory.get_machine(server_uuid, uuid).await {
            Ok(machine) => machine,
            Err(e) => {
                log::error!("failed to fetch machine {} from inventory: {:?}", uuid, e);
                return;
            }
        };
        self.cache
            .lock()
            .await
            .set(&machine.uuid, machine.to_directory());
        self.reconciler.reconcile(&machine).await;
    }

    /// Machine already known: fetch the current state and only write when
    /// the directory-shaped projection actually changed. Steady-state
    /// heartbeats land here and must not produce a write storm.
    async fn known_machine(&self, server_uuid: &str, old: DirectoryMachine) {
        let machine = match self.inventory.get_machine(server_uuid, &old.uuid).await {
            Ok(machine) => machine,
            Err(e) => {
                log::error!(
                    "failed to fetch machine {} from inventory: {:?}",
                    old.uuid,
                    e
                );
                return;
            }
        };

        let fresh = machine.to_directory();
        if fresh == old {
            return;
        }
        self.cache.lock().await.set(&machine.uuid, fresh);
        self.reconciler.reconcile(&machine).await;
    }
}
