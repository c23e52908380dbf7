//! Write-back of resolved identifiers to the persistent store

use projid_common::{KeyValueStore, ProjectId, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Persists identifiers into the store's named slot
#[derive(Clone)]
pub struct WriteBack {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl WriteBack {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Overwrite the slot with `identifier`
    ///
    /// Absent or empty input is a no-op and never clears the slot.
    /// Returns whether a write happened.
    pub fn persist(&self, identifier: Option<&str>) -> Result<bool> {
        let Some(id) = identifier.and_then(ProjectId::new) else {
            debug!(key = %self.key, "Ignoring empty project identifier");
            return Ok(false);
        };

        self.store.set(&self.key, id.as_str())?;
        info!(key = %self.key, project_id = %id, "Project identifier persisted");
        Ok(true)
    }

    /// `persist`, with store failures logged instead of returned
    pub fn persist_logged(&self, identifier: Option<&str>) -> bool {
        match self.persist(identifier) {
            Ok(written) => written,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to persist project identifier");
                false
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
