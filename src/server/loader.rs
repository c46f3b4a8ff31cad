use crate::clients::directory_impl::DirectoryImpl;
use crate::clients::http::http_directory::HttpDirectoryClient;
use crate::clients::http::http_inventory::HttpInventoryClient;
use crate::clients::http::http_workflow::HttpWorkflowClient;
use crate::clients::inventory_impl::InventoryImpl;
use crate::clients::local::file_directory::FileDirectoryStore;
use crate::clients::local::memory_workflow::MemoryWorkflow;
use crate::clients::local::static_inventory::StaticInventory;
use crate::clients::workflow_impl::WorkflowImpl;
use crate::common::config::{BackendType, ServerConfig};
use anyhow::Result;

pub fn load_inventory_client(config: &ServerConfig) -> Result<InventoryImpl> {
    match config.inventory.backend {
        BackendType::Http => {
            let url = config
                .inventory
                .url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("inventory url not configured"))?;
            log::debug!("Using HTTP inventory client at {}", url);
            Ok(InventoryImpl::Http(HttpInventoryClient::new(&url)))
        }
        BackendType::Local => {
            let path = config
                .inventory
                .seed_path
                .clone()
                .unwrap_or_else(|| "./data/inventory.json".to_string());
            log::debug!("Using static inventory seeded from {}", path);
            Ok(InventoryImpl::Static(StaticInventory::from_file(&path)?))
        }
    }
}

pub fn load_directory_client(config: &ServerConfig) -> Result<DirectoryImpl> {
    match config.directory.backend {
        BackendType::Http => {
            let url = config
                .directory
                .url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("directory url not configured"))?;
            log::debug!("Using HTTP directory client at {}", url);
            Ok(DirectoryImpl::Http(HttpDirectoryClient::new(&url)))
        }
        BackendType::Local => {
            let path = config
                .directory
                .data_path
                .clone()
                .unwrap_or_else(|| "./data".to_string());
            log::debug!("Using file directory store in {}", path);
            Ok(DirectoryImpl::File(FileDirectoryStore::new(&path)))
        }
    }
}

pub fn load_workflow_client(config: &ServerConfig) -> Result<WorkflowImpl> {
    match config.workflow.backend {
        BackendType::Http => {
            let url = config
                .workflow
                .url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("workflow url not configured"))?;
            log::debug!("Using HTTP workflow client at {}", url);
            Ok(WorkflowImpl::Http(HttpWorkflowClient::new(&url)))
        }
        BackendType::Local => {
            log::debug!("Using in-memory workflow queue");
            Ok(WorkflowImpl::Memory(MemoryWorkflow::new()))
        }
    }
}
