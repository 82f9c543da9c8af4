//! SQLite-backed key-value store.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::KeyValueStore;
use crate::{
    db::Database,
    error::{MomentumError, Result},
};

/// Key reported for failures that are not tied to a single key.
const ALL_KEYS: &str = "*";

/// Key-value store persisted in a SQLite file.
///
/// Every call opens a short-lived connection on the blocking pool, so the
/// handle itself is just a path and is cheap to clone into each component.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns `MomentumError::FileSystem` if the parent directory cannot be
    /// created, `MomentumError::Database` if schema initialization fails.
    pub async fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MomentumError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&init_path)?;
            Ok::<(), MomentumError>(())
        })
        .await
        .map_err(|e| MomentumError::join(ALL_KEYS, e))??;

        debug!("Opened key-value store at {}", db_path.display());
        Ok(Self { db_path })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Lists every stored key.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.keys()
        })
        .await
        .map_err(|e| MomentumError::join(ALL_KEYS, e))?
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        let owned = key.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_value(&owned)
        })
        .await
        .map_err(|e| MomentumError::join(key, e))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let owned = key.to_string();
        let value = value.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.set_value(&owned, &value)
        })
        .await
        .map_err(|e| MomentumError::join(key, e))?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let owned = key.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.remove_value(&owned).map(|_| ())
        })
        .await
        .map_err(|e| MomentumError::join(key, e))?
    }
}
