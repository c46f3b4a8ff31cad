use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Talk to the real service over HTTP.
    Http,
    /// Standalone backend (JSON files / in-memory), no external service.
    Local,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    pub backend: BackendType,
    pub url: Option<String>,
    /// Seed file for the local backend.
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub backend: BackendType,
    pub url: Option<String>,
    /// Data directory for the local backend.
    pub data_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    pub backend: BackendType,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default = "default_heartbeat_port")]
    pub heartbeat_port: u16,
    #[serde(default = "default_max_frame_len")]
    pub max_frame_len: usize,
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    pub inventory: InventoryConfig,
    pub directory: DirectoryConfig,
    pub workflow: WorkflowConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_heartbeat_port() -> u16 {
    9090
}

fn default_max_frame_len() -> usize {
    1024 * 1024
}

fn default_cache_size() -> usize {
    100
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

/// Load the server configuration from the given file, with environment
/// variables (MACHINE_API_*) layered on top. A missing file is fine as
/// long as the environment provides the backend settings.
pub fn load_server_config(path: &str) -> Result<ServerConfig> {
    dotenv::dotenv().ok();
    let config = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(Environment::with_prefix("MACHINE_API").separator("__"))
        .build()?;
    Ok(config.try_deserialize()?)
}
