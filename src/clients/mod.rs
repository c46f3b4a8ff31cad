pub mod http {
    pub mod http_directory;
    pub mod http_inventory;
    pub mod http_workflow;
}
pub mod local {
    pub mod file_directory;
    pub mod memory_workflow;
    pub mod static_inventory;
}
pub mod directory_impl;
pub mod inventory_impl;
pub mod workflow_impl;
