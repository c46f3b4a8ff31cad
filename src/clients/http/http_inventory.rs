use crate::common::machine::Machine;
use crate::traits::inventory::UnsendInventoryApi;
use anyhow::Result;

pub struct HttpInventoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpInventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl UnsendInventoryApi for HttpInventoryClient {
    async fn get_machine(&self, node_id: &str, uuid: &str) -> Result<Machine> {
        let url = format!("{}/servers/{}/vms/{}", self.base_url, node_id, uuid);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "inventory service returned {} for machine {} on server {}",
                response.status(),
                uuid,
                node_id
            ));
        }
        Ok(response.json::<Machine>().await?)
    }
}
