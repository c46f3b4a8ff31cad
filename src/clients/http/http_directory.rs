use crate::common::machine::{DirectoryMachine, MachineFilter, MachineKey};
use crate::traits::directory::UnsendDirectoryApi;
use anyhow::Result;
use reqwest::StatusCode;

pub struct HttpDirectoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDirectoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl UnsendDirectoryApi for HttpDirectoryClient {
    async fn get_machine(&self, key: &MachineKey) -> Result<Option<DirectoryMachine>> {
        let url = format!("{}/machines/{}", self.base_url, key.uuid);
        let response = self
            .client
            .get(&url)
            .query(&[("owner_uuid", key.owner_uuid.as_str())])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "directory service returned {} for machine {}",
                response.status(),
                key.uuid
            ));
        }
        Ok(Some(response.json::<DirectoryMachine>().await?))
    }

    async fn add_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        let url = format!("{}/machines", self.base_url);
        let response = self.client.post(&url).json(machine).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "directory service returned {} adding machine {}",
                response.status(),
                machine.uuid
            ));
        }
        Ok(())
    }

    async fn replace_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        let url = format!("{}/machines/{}", self.base_url, machine.uuid);
        let response = self.client.put(&url).json(machine).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "directory service returned {} replacing machine {}",
                response.status(),
                machine.uuid
            ));
        }
        Ok(())
    }

    async fn list_machines(&self, filter: &MachineFilter) -> Result<Vec<DirectoryMachine>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(owner_uuid) = &filter.owner_uuid {
            query.push(("owner_uuid", owner_uuid.clone()));
        }
        if let Some(ram) = filter.ram {
            query.push(("ram", ram.to_string()));
        }
        if let Some(alias) = &filter.alias {
            query.push(("alias", alias.clone()));
        }
        if let Some(status) = &filter.status {
            query.push(("status", status.clone()));
        }
        if let Some(brand) = &filter.brand {
            query.push(("brand", brand.clone()));
        }

        let url = format!("{}/machines", self.base_url);
        let response = self.client.get(&url).query(&query).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "directory service returned {} listing machines",
                response.status()
            ));
        }
        Ok(response.json::<Vec<DirectoryMachine>>().await?)
    }
}
