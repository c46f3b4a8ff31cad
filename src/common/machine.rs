use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Live machine state as reported by the compute-node inventory service.
/// The inventory service is the canonical source of truth for this shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Machine {
    pub uuid: String,
    pub owner_uuid: String,
    pub server_uuid: Option<String>,
    pub alias: Option<String>,
    pub brand: Option<String>,
    pub ram: Option<u64>,
    pub swap: Option<u64>,
    pub disk: Option<u64>,
    pub cpu_cap: Option<u32>,
    pub cpu_shares: Option<u32>,
    pub lightweight_processes: Option<u32>,
    pub setup: Option<String>,
    pub status: Option<String>,
    pub zfs_io_priority: Option<u32>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Directory-shaped projection of a machine. This is what the directory
/// service stores and what the cache holds for change detection. Equality
/// is field-by-field on this flat struct; there is nothing deeper to
/// compare.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DirectoryMachine {
    pub uuid: String,
    pub owner_uuid: String,
    pub server_uuid: Option<String>,
    pub alias: Option<String>,
    pub brand: Option<String>,
    pub ram: Option<u64>,
    pub swap: Option<u64>,
    pub disk: Option<u64>,
    pub cpu_cap: Option<u32>,
    pub cpu_shares: Option<u32>,
    pub lightweight_processes: Option<u32>,
    pub setup: Option<String>,
    pub status: Option<String>,
    pub zfs_io_priority: Option<u32>,
    pub tags: HashMap<String, String>,
}

/// Directory entries are keyed by machine uuid plus owner uuid.
#[derive(Debug, Clone)]
pub struct MachineKey {
    pub uuid: String,
    pub owner_uuid: String,
}

/// Filters accepted by the machine listing endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MachineFilter {
    pub owner_uuid: Option<String>,
    pub ram: Option<u64>,
    pub alias: Option<String>,
    pub status: Option<String>,
    pub brand: Option<String>,
}

impl Machine {
    pub fn key(&self) -> MachineKey {
        MachineKey {
            uuid: self.uuid.clone(),
            owner_uuid: self.owner_uuid.clone(),
        }
    }

    pub fn to_directory(&self) -> DirectoryMachine {
        DirectoryMachine {
            uuid: self.uuid.clone(),
            owner_uuid: self.owner_uuid.clone(),
            server_uuid: self.server_uuid.clone(),
            alias: self.alias.clone(),
            brand: self.brand.clone(),
            ram: self.ram,
            swap: self.swap,
            disk: self.disk,
            cpu_cap: self.cpu_cap,
            cpu_shares: self.cpu_shares,
            lightweight_processes: self.lightweight_processes,
            setup: self.setup.clone(),
            status: self.status.clone(),
            zfs_io_priority: self.zfs_io_priority,
            tags: self.tags.clone(),
        }
    }
}

impl DirectoryMachine {
    pub fn matches(&self, filter: &MachineFilter) -> bool {
        if let Some(owner_uuid) = &filter.owner_uuid
            && &self.owner_uuid != owner_uuid
        {
            return false;
        }
        if let Some(ram) = filter.ram
            && self.ram != Some(ram)
        {
            return false;
        }
        if let Some(alias) = &filter.alias
            && self.alias.as_ref() != Some(alias)
        {
            return false;
        }
        if let Some(status) = &filter.status
            && self.status.as_ref() != Some(status)
        {
            return false;
        }
        if let Some(brand) = &filter.brand
            && self.brand.as_ref() != Some(brand)
        {
            return false;
        }
        true
    }
}
