use crate::common::machine::{DirectoryMachine, MachineFilter, MachineKey};
use crate::traits::directory::UnsendDirectoryApi;
use anyhow::Result;
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{File, create_dir_all};
use std::io::{ErrorKind::NotFound, Read, Write};
use std::path::{Path, PathBuf};

/// Standalone directory backend keeping machine entries in a single JSON
/// file. Exists so the API can run without a real directory service; it is
/// not meant to scale.
pub struct FileDirectoryStore {
    machines_path: PathBuf,
}

impl FileDirectoryStore {
    pub fn new(data_dir: &str) -> Self {
        Self {
            machines_path: Path::new(data_dir).join("machines.json"),
        }
    }

    fn entry_key(uuid: &str, owner_uuid: &str) -> String {
        format!("{}/{}", uuid, owner_uuid)
    }

    fn load_map(&self) -> Result<HashMap<String, DirectoryMachine>> {
        match File::open(&self.machines_path) {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;
                if contents.trim().is_empty() {
                    Ok(HashMap::new())
                } else {
                    Ok(serde_json::from_str(&contents)?)
                }
            }
            Err(e) if e.kind() == NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_map(&self, map: &HashMap<String, DirectoryMachine>) -> Result<()> {
        if let Some(parent) = self.machines_path.parent() {
            create_dir_all(parent)?;
        }
        let mut file = File::create(&self.machines_path)?;
        file.lock_exclusive()?;
        let json = serde_json::to_string_pretty(map)?;
        file.write_all(json.as_bytes())?;
        FileExt::unlock(&file)?;
        Ok(())
    }
}

impl UnsendDirectoryApi for FileDirectoryStore {
    async fn get_machine(&self, key: &MachineKey) -> Result<Option<DirectoryMachine>> {
        let map = self.load_map()?;
        Ok(map.get(&Self::entry_key(&key.uuid, &key.owner_uuid)).cloned())
    }

    async fn add_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        let mut map = self.load_map()?;
        let key = Self::entry_key(&machine.uuid, &machine.owner_uuid);
        if map.contains_key(&key) {
            return Err(anyhow::anyhow!(
                "machine {} already exists in directory",
                machine.uuid
            ));
        }
        map.insert(key, machine.clone());
        self.save_map(&map)
    }

    async fn replace_machine(&self, machine: &DirectoryMachine) -> Result<()> {
        let mut map = self.load_map()?;
        let key = Self::entry_key(&machine.uuid, &machine.owner_uuid);
        map.insert(key, machine.clone());
        self.save_map(&map)
    }

    async fn list_machines(&self, filter: &MachineFilter) -> Result<Vec<DirectoryMachine>> {
        let map = self.load_map()?;
        Ok(map
            .into_values()
            .filter(|machine| machine.matches(filter))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;

    fn machine(uuid: &str, owner: &str, ram: u64) -> DirectoryMachine {
        DirectoryMachine {
            uuid: uuid.to_string(),
            owner_uuid: owner.to_string(),
            server_uuid: None,
            alias: Some(format!("vm-{}", uuid)),
            brand: Some("joyent".to_string()),
            ram: Some(ram),
            swap: Some(ram * 2),
            disk: Some(10240),
            cpu_cap: Some(100),
            cpu_shares: Some(25),
            lightweight_processes: Some(1000),
            setup: Some("2026-01-01T00:00:00Z".to_string()),
            status: Some("running".to_string()),
            zfs_io_priority: Some(10),
            tags: StdHashMap::new(),
        }
    }

    fn store() -> FileDirectoryStore {
        let dir = std::env::temp_dir().join(format!("machine-api-test-{}", uuid::Uuid::new_v4()));
        FileDirectoryStore::new(&dir.to_string_lossy())
    }

    #[tokio::test]
    async fn add_then_get_round_trips() {
        let store = store();
        let m = machine("c1", "o1", 256);
        store.add_machine(&m).await.unwrap();

        let got = store
            .get_machine(&MachineKey {
                uuid: "c1".to_string(),
                owner_uuid: "o1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(got, Some(m));
    }

    #[tokio::test]
    async fn add_rejects_duplicates() {
        let store = store();
        let m = machine("c1", "o1", 256);
        store.add_machine(&m).await.unwrap();
        assert!(store.add_machine(&m).await.is_err());
    }

    #[tokio::test]
    async fn replace_overwrites() {
        let store = store();
        let mut m = machine("c1", "o1", 256);
        store.add_machine(&m).await.unwrap();

        m.status = Some("stopped".to_string());
        store.replace_machine(&m).await.unwrap();

        let got = store
            .get_machine(&MachineKey {
                uuid: "c1".to_string(),
                owner_uuid: "o1".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got.status.as_deref(), Some("stopped"));
    }

    #[tokio::test]
    async fn list_applies_filters() {
        let store = store();
        store.add_machine(&machine("c1", "o1", 256)).await.unwrap();
        store.add_machine(&machine("c2", "o1", 512)).await.unwrap();
        store.add_machine(&machine("c3", "o2", 256)).await.unwrap();

        let filter = MachineFilter {
            owner_uuid: Some("o1".to_string()),
            ram: Some(256),
            ..Default::default()
        };
        let machines = store.list_machines(&filter).await.unwrap();
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].uuid, "c1");
    }
}
