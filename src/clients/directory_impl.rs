use crate::clients::http::http_directory::HttpDirectoryClient;
use crate::clients::local::file_directory::FileDirectoryStore;
use crate::common::machine::{DirectoryMachine, MachineFilter, MachineKey};
use crate::traits::directory::{DirectoryApi, UnsendDirectoryApi};
use anyhow::Result;

pub enum DirectoryImpl {
    Http(HttpDirectoryClient),
    File(FileDirectoryStore),
}

impl DirectoryApi for DirectoryImpl {
    async fn get_machine(&self, key: &MachineKey) -> Result<Option<DirectoryMachine>> {
        match self {
            DirectoryImpl::Http(c) => c.get_machine(key).await,
            DirectoryImpl::File(f) => f.get_machine(key).await,
        }
    }

    async fn add_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        match self {
            DirectoryImpl::Http(c) => c.add_machine(machine).await,
            DirectoryImpl::File(f) => f.add_machine(machine).await,
        }
    }

    async fn replace_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        match self {
            DirectoryImpl::Http(c) => c.replace_machine(machine).await,
            DirectoryImpl::File(f) => f.replace_machine(machine).await,
        }
    }

    async fn list_machines(&self, filter: &MachineFilter) -> Result<Vec<DirectoryMachine>> {
        match self {
            DirectoryImpl::Http(c) => c.list_machines(filter).await,
            DirectoryImpl::File(f) => f.list_machines(filter).await,
        }
    }
}
