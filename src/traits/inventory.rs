use crate::common::machine::Machine;
use anyhow::Result;

/// Client contract for the compute-node inventory service, the
/// authoritative source of live machine state.
#[trait_variant::make(InventoryApi: Send)]
pub trait UnsendInventoryApi {
    /// Fetch the full record for one machine on one compute node.
    async fn get_machine(&self, node_id: &str, uuid: &str) -> Result<Machine>;
}
