use crate::common::machine::Machine;
use crate::traits::directory::DirectoryApi;
use std::sync::Arc;

/// Applies a freshly fetched machine record to the directory service with a
/// get-then-add-or-replace sequence. The directory has no atomic upsert, so
/// two racing invocations for the same machine can both pick the same
/// branch; the losing add then fails against the directory's uniqueness
/// constraint and is only logged. The next heartbeat-driven change
/// detection re-attempts.
pub struct Reconciler<D> {
    directory: Arc<D>,
}

impl<D: DirectoryApi + Send + Sync> Reconciler<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Create or replace the directory entry for `machine`. Failures are
    /// logged and swallowed; nothing propagates back to the caller.
    pub async fn reconcile(&self, machine: &Machine) {
        let key = machine.key();
        let record = machine.to_directory();

        let existing = match self.directory.get_machine(&key).await {
            Ok(existing) => existing,
            Err(e) => {
                log::error!(
                    "failed to query directory for machine {}: {:?}",
                    key.uuid,
                    e
                );
                return;
            }
        };

        if existing.is_some() {
            match self.directory.replace_machine(&record).await {
                Ok(()) => log::trace!("replaced machine {} in directory", key.uuid),
                Err(e) => log::error!(
                    "failed to replace machine {} in directory: {:?}",
                    key.uuid,
                    e
                ),
            }
        } else {
            match self.directory.add_machine(&record).await {
                Ok(()) => log::trace!("added machine {} to directory", key.uuid),
                Err(e) => log::error!(
                    "failed to add machine {} to directory: {:?}",
                    key.uuid,
                    e
                ),
            }
        }
    }
}
