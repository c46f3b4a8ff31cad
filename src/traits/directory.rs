use crate::common::machine::{DirectoryMachine, MachineFilter, MachineKey};
use anyhow::Result;

/// Client contract for the directory service, the durable store of machine
/// metadata. The directory has no atomic upsert; callers that need
/// create-or-replace semantics must emulate it with a read followed by the
/// matching write.
#[trait_variant::make(DirectoryApi: Send)]
pub trait UnsendDirectoryApi {
    async fn get_machine(&self, key: &MachineKey) -> Result<Option<DirectoryMachine>>;
    /// Create a new entry. Fails if one already exists for the same key.
    async fn add_machine(&self, machine: &DirectoryMachine) -> Result<()>;
    /// Full replace of an existing entry, last write wins.
    async fn replace_machine(&self, machine: &DirectoryMachine) -> Result<()>;
    async fn list_machines(&self, filter: &MachineFilter) -> Result<Vec<DirectoryMachine>>;
}
