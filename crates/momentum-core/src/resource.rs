//! Last opened learning resource.

use log::debug;

use crate::{
    error::Result,
    models::LastViewedResource,
    store::{keys, KeyValueStore, StoreReadExt},
};

/// Single-slot owner of the `lastViewedResource` key.
pub struct LastResourceTracker<S> {
    store: S,
}

impl<S: KeyValueStore> LastResourceTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrites the slot with `resource`.
    pub async fn record(&self, resource: &LastViewedResource) -> Result<()> {
        self.store
            .set_json(keys::LAST_VIEWED_RESOURCE, resource)
            .await?;
        debug!("Recorded last viewed {} '{}'", resource.kind.as_str(), resource.title);
        Ok(())
    }

    /// The most recently recorded resource. Unreadable or undecodable values
    /// count as none.
    pub async fn get(&self) -> Option<LastViewedResource> {
        self.store.get_json(keys::LAST_VIEWED_RESOURCE).await
    }
}
