use crate::common::machine::Machine;
use crate::traits::inventory::UnsendInventoryApi;
use anyhow::Result;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind::NotFound};

/// Standalone inventory backend seeded from a JSON file mapping server uuid
/// to the machines running on it. Useful for development and demos; the
/// records never change once loaded.
pub struct StaticInventory {
    machines: HashMap<String, Vec<Machine>>,
}

impl StaticInventory {
    pub fn from_file(path: &str) -> Result<Self> {
        let machines = match File::open(path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == NotFound => {
                log::warn!("inventory seed file {} not found, starting empty", path);
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { machines })
    }
}

impl UnsendInventoryApi for StaticInventory {
    async fn get_machine(&self, node_id: &str, uuid: &str) -> Result<Machine> {
        self.machines
            .get(node_id)
            .and_then(|machines| machines.iter().find(|m| m.uuid == uuid))
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!("machine {} not found on server {}", uuid, node_id)
            })
    }
}
