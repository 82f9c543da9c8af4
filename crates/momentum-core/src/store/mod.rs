//! Persistent key-value storage shared by every component.
//!
//! Storage is asynchronous and non-transactional: each `set` or `remove` is
//! its own durable write. Components never write each other's keys, so no
//! locking is needed beyond what a single call provides.
//!
//! ```text
//! ProfileStore          hobbyName, currentSkillLevel, desiredSkillLevel,
//!                       timeCommitment, onboardingCompleted
//! PlanCache             learningPlan
//! ProgressTracker       weeks, progress
//! LastResourceTracker   lastViewedResource
//!        │
//!        ▼
//! KeyValueStore (SqliteStore | MemoryStore)
//! ```

use std::future::Future;

use log::warn;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage keys used by the components. Each key has exactly one writer.
pub mod keys {
    pub const HOBBY_NAME: &str = "hobbyName";
    pub const CURRENT_SKILL_LEVEL: &str = "currentSkillLevel";
    pub const DESIRED_SKILL_LEVEL: &str = "desiredSkillLevel";
    pub const TIME_COMMITMENT: &str = "timeCommitment";
    pub const ONBOARDING_COMPLETED: &str = "onboardingCompleted";
    pub const WEEKS: &str = "weeks";
    pub const PROGRESS: &str = "progress";
    pub const LAST_VIEWED_RESOURCE: &str = "lastViewedResource";
    pub const LEARNING_PLAN: &str = "learningPlan";
}

/// Durable string-keyed storage with get/set/remove.
pub trait KeyValueStore: Clone {
    /// Reads the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Read helpers implementing the "read failure means absent" policy.
pub(crate) trait StoreReadExt: KeyValueStore {
    /// Reads `key`, logging and swallowing storage errors.
    async fn get_or_absent(&self, key: &str) -> Option<String> {
        match self.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{key}', treating it as absent: {e}");
                None
            }
        }
    }

    /// Reads and decodes a JSON value. Storage and decode failures are both
    /// logged and reported as absent.
    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_or_absent(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored value for '{key}' is not valid JSON, ignoring it: {e}");
                None
            }
        }
    }

    /// Encodes `value` as JSON and stores it.
    async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw).await
    }
}

impl<S: KeyValueStore> StoreReadExt for S {}
