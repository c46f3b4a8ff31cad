use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use serde_json::{Value, json};

use machine_api::common::machine::{DirectoryMachine, Machine, MachineFilter, MachineKey};
use machine_api::sync::cache::MachineCache;
use machine_api::sync::dispatcher::HeartbeatDispatcher;
use machine_api::sync::reconciler::Reconciler;
use machine_api::traits::directory::DirectoryApi;
use machine_api::traits::inventory::InventoryApi;

const SERVER: &str = "564d5535-5fd9-7b84-4d4f-d4d462f4fcde";

// --- Test doubles -----------------------------------------------------------

#[derive(Default)]
struct MockInventory {
    machines: Mutex<HashMap<String, Machine>>,
    fetches: AtomicUsize,
}

impl MockInventory {
    fn insert(&self, machine: Machine) {
        self.machines
            .lock()
            .unwrap()
            .insert(machine.uuid.clone(), machine);
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl InventoryApi for MockInventory {
    async fn get_machine(&self, _node_id: &str, uuid: &str) -> Result<Machine> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.machines
            .lock()
            .unwrap()
            .get(uuid)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no machine {}", uuid))
    }
}

#[derive(Default)]
struct MockDirectory {
    entries: Mutex<HashMap<String, DirectoryMachine>>,
    queries: AtomicUsize,
    adds: AtomicUsize,
    replaces: AtomicUsize,
    fail_queries: AtomicBool,
    fail_adds: AtomicBool,
}

impl MockDirectory {
    fn entry(&self, uuid: &str, owner_uuid: &str) -> Option<DirectoryMachine> {
        self.entries
            .lock()
            .unwrap()
            .get(&format!("{}/{}", uuid, owner_uuid))
            .cloned()
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn adds(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
    }

    fn replaces(&self) -> usize {
        self.replaces.load(Ordering::SeqCst)
    }
}

impl DirectoryApi for MockDirectory {
    async fn get_machine(&self, key: &MachineKey) -> Result<Option<DirectoryMachine>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("directory unavailable"));
        }
        Ok(self.entry(&key.uuid, &key.owner_uuid))
    }

    async fn add_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        if self.fail_adds.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("directory unavailable"));
        }
        let key = format!("{}/{}", machine.uuid, machine.owner_uuid);
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(&key) {
            return Err(anyhow::anyhow!("machine {} already exists", machine.uuid));
        }
        entries.insert(key, machine.clone());
        Ok(())
    }

    async fn replace_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        self.replaces.fetch_add(1, Ordering::SeqCst);
        let key = format!("{}/{}", machine.uuid, machine.owner_uuid);
        self.entries.lock().unwrap().insert(key, machine.clone());
        Ok(())
    }

    async fn list_machines(&self, filter: &MachineFilter) -> Result<Vec<DirectoryMachine>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .values()
            .filter(|machine| machine.matches(filter))
            .cloned()
            .collect())
    }
}

// --- Helpers ----------------------------------------------------------------

fn machine(uuid: &str, status: &str, ram: u64) -> Machine {
    Machine {
        uuid: uuid.to_string(),
        owner_uuid: "930896af-bf8c-48d4-885c-6573a94b1853".to_string(),
        server_uuid: Some(SERVER.to_string()),
        alias: Some(format!("vm-{}", uuid)),
        brand: Some("joyent".to_string()),
        ram: Some(ram),
        swap: Some(ram * 2),
        disk: Some(10240),
        cpu_cap: Some(100),
        cpu_shares: Some(25),
        lightweight_processes: Some(1000),
        setup: Some("2026-08-01T00:00:00Z".to_string()),
        status: Some(status.to_string()),
        zfs_io_priority: Some(10),
        tags: HashMap::new(),
    }
}

fn batch(uuids: &[(&str, &str)]) -> Vec<Value> {
    uuids
        .iter()
        .enumerate()
        .map(|(i, (uuid, status))| json!([i, uuid, status, "/", "", "liveimg", "shared", "0"]))
        .collect()
}

fn dispatcher(
    inventory: Arc<MockInventory>,
    directory: Arc<MockDirectory>,
) -> HeartbeatDispatcher<MockInventory, MockDirectory> {
    HeartbeatDispatcher::new(
        MachineCache::new(100, Duration::from_secs(3600)),
        inventory,
        Reconciler::new(directory),
    )
}

// --- Tests ------------------------------------------------------------------

#[tokio::test]
async fn global_zone_is_never_fetched_or_reconciled() {
    let inventory = Arc::new(MockInventory::default());
    let directory = Arc::new(MockDirectory::default());
    let dispatcher = dispatcher(inventory.clone(), directory.clone());

    dispatcher
        .on_heartbeats(SERVER, &batch(&[("global", "running")]))
        .await;

    assert_eq!(inventory.fetches(), 0);
    assert_eq!(directory.queries(), 0);
}

#[tokio::test]
async fn first_sighting_fetches_caches_and_adds() {
    let inventory = Arc::new(MockInventory::default());
    inventory.insert(machine("c1", "running", 256));
    let directory = Arc::new(MockDirectory::default());
    let dispatcher = dispatcher(inventory.clone(), directory.clone());

    dispatcher
        .on_heartbeats(SERVER, &batch(&[("global", "running"), ("c1", "running")]))
        .await;

    assert_eq!(inventory.fetches(), 1);
    assert_eq!(directory.queries(), 1);
    assert_eq!(directory.adds(), 1);
    assert_eq!(directory.replaces(), 0);
    let entry = directory
        .entry("c1", "930896af-bf8c-48d4-885c-6573a94b1853")
        .expect("machine should be in directory");
    assert_eq!(entry.ram, Some(256));
}

#[tokio::test]
async fn unchanged_machine_fetches_but_does_not_write() {
    let inventory = Arc::new(MockInventory::default());
    inventory.insert(machine("c1", "running", 256));
    let directory = Arc::new(MockDirectory::default());
    let dispatcher = dispatcher(inventory.clone(), directory.clone());

    let hbs = batch(&[("c1", "running")]);
    dispatcher.on_heartbeats(SERVER, &hbs).await;
    dispatcher.on_heartbeats(SERVER, &hbs).await;

    // The re-sighting still fetches, but nothing downstream moves.
    assert_eq!(inventory.fetches(), 2);
    assert_eq!(directory.queries(), 1);
    assert_eq!(directory.adds(), 1);
    assert_eq!(directory.replaces(), 0);
}

#[tokio::test]
async fn changed_machine_is_replaced_exactly_once() {
    let inventory = Arc::new(MockInventory::default());
    inventory.insert(machine("c1", "running", 256));
    let directory = Arc::new(MockDirectory::default());
    let dispatcher = dispatcher(inventory.clone(), directory.clone());

    let hbs = batch(&[("c1", "running")]);
    dispatcher.on_heartbeats(SERVER, &hbs).await;

    inventory.insert(machine("c1", "stopped", 256));
    dispatcher.on_heartbeats(SERVER, &hbs).await;

    assert_eq!(directory.adds(), 1);
    assert_eq!(directory.replaces(), 1);
    let entry = directory
        .entry("c1", "930896af-bf8c-48d4-885c-6573a94b1853")
        .unwrap();
    assert_eq!(entry.status.as_deref(), Some("stopped"));

    // Cache now holds the new projection, so repeating the heartbeat is
    // quiet again.
    dispatcher.on_heartbeats(SERVER, &hbs).await;
    assert_eq!(directory.replaces(), 1);
}

#[tokio::test]
async fn reconciler_is_idempotent_across_invocations() {
    let directory = Arc::new(MockDirectory::default());
    let reconciler = Reconciler::new(directory.clone());
    let m = machine("c1", "running", 256);

    reconciler.reconcile(&m).await;
    reconciler.reconcile(&m).await;

    assert_eq!(directory.adds(), 1);
    assert_eq!(directory.replaces(), 1);
    assert_eq!(directory.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn directory_query_failure_aborts_without_writes() {
    let directory = Arc::new(MockDirectory::default());
    directory.fail_queries.store(true, Ordering::SeqCst);
    let reconciler = Reconciler::new(directory.clone());

    reconciler.reconcile(&machine("c1", "running", 256)).await;

    assert_eq!(directory.queries(), 1);
    assert_eq!(directory.adds(), 0);
    assert_eq!(directory.replaces(), 0);
}

#[tokio::test]
async fn inventory_error_leaves_cache_cold_and_retries_next_cycle() {
    let inventory = Arc::new(MockInventory::default());
    let directory = Arc::new(MockDirectory::default());
    let dispatcher = dispatcher(inventory.clone(), directory.clone());

    let hbs = batch(&[("c1", "running")]);
    dispatcher.on_heartbeats(SERVER, &hbs).await;

    assert_eq!(inventory.fetches(), 1);
    assert_eq!(directory.adds(), 0);

    // The machine shows up in inventory; the cache was never written, so
    // the next heartbeat takes the first-sighting path again.
    inventory.insert(machine("c1", "running", 256));
    dispatcher.on_heartbeats(SERVER, &hbs).await;

    assert_eq!(inventory.fetches(), 2);
    assert_eq!(directory.adds(), 1);
}

#[tokio::test]
async fn malformed_tuples_are_skipped() {
    let inventory = Arc::new(MockInventory::default());
    inventory.insert(machine("c1", "running", 256));
    let directory = Arc::new(MockDirectory::default());
    let dispatcher = dispatcher(inventory.clone(), directory.clone());

    let hbs = vec![
        json!({ "not": "a tuple" }),
        json!([0]),
        json!([0, "c1"]),
        json!([0, 42, "running"]),
    ];
    dispatcher.on_heartbeats(SERVER, &hbs).await;

    assert_eq!(inventory.fetches(), 0);
    assert_eq!(directory.queries(), 0);
}

#[tokio::test]
async fn failed_directory_add_does_not_stop_the_batch() {
    let inventory = Arc::new(MockInventory::default());
    inventory.insert(machine("c1", "running", 256));
    inventory.insert(machine("c2", "running", 512));
    let directory = Arc::new(MockDirectory::default());
    directory.fail_adds.store(true, Ordering::SeqCst);
    let dispatcher = dispatcher(inventory.clone(), directory.clone());

    dispatcher
        .on_heartbeats(SERVER, &batch(&[("c1", "running"), ("c2", "running")]))
        .await;

    // Both machines were attempted despite every add failing.
    assert_eq!(inventory.fetches(), 2);
    assert_eq!(directory.adds(), 2);
}
