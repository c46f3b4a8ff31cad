use crate::common::machine::DirectoryMachine;
use indexmap::IndexMap;
use std::time::{Duration, Instant};

struct CacheEntry {
    record: DirectoryMachine,
    stored_at: Instant,
}

/// Fixed-capacity, time-expiring store of the last reconciled
/// directory-shaped record per machine uuid. The dispatcher uses it as its
/// change-detection oracle; a miss means "no known record", not "the
/// machine does not exist".
///
/// Entries are ordered by recency inside an IndexMap: `get` promotes the
/// entry to the most-recent slot, `set` inserts at the most-recent slot and
/// evicts the least-recent one when at capacity. Expiry is checked lazily
/// on lookup.
pub struct MachineCache {
    entries: IndexMap<String, CacheEntry>,
    capacity: usize,
    ttl: Duration,
}

impl MachineCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            ttl,
        }
    }

    pub fn get(&mut self, uuid: &str) -> Option<DirectoryMachine> {
        let expired = self.entries.get(uuid)?.stored_at.elapsed() >= self.ttl;
        if expired {
            self.entries.shift_remove(uuid);
            return None;
        }
        let index = self.entries.get_index_of(uuid)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get(uuid).map(|entry| entry.record.clone())
    }

    /// Overwrites any existing entry and resets its TTL. Evicts the
    /// least-recently-used entry when inserting a new key at capacity.
    /// Capacity 0 stores nothing, so every lookup is a miss.
    pub fn set(&mut self, uuid: &str, record: DirectoryMachine) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.shift_remove(uuid).is_none() && self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(
            uuid.to_string(),
            CacheEntry {
                record,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
