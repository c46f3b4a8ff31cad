use crate::clients::http::http_inventory::HttpInventoryClient;
use crate::clients::local::static_inventory::StaticInventory;
use crate::common::machine::Machine;
use crate::traits::inventory::{InventoryApi, UnsendInventoryApi};
use anyhow::Result;

pub enum InventoryImpl {
    Http(HttpInventoryClient),
    Static(StaticInventory),
}

impl InventoryApi for InventoryImpl {
    async fn get_machine(&self, node_id: &str, uuid: &str) -> Result<Machine> {
        match self {
            InventoryImpl::Http(c) => c.get_machine(node_id, uuid).await,
            InventoryImpl::Static(s) => s.get_machine(node_id, uuid).await,
        }
    }
}
