//! Builder for creating and configuring Momentum sessions.

use std::path::{Path, PathBuf};

use super::Momentum;
use crate::{
    config::GeneratorConfig,
    error::{MomentumError, Result},
    plan::HttpPlanGenerator,
    progress::UncompletePolicy,
    store::SqliteStore,
};

/// Builder for sessions backed by SQLite and the HTTP plan generator.
#[derive(Debug, Clone)]
pub struct MomentumBuilder {
    database_path: Option<PathBuf>,
    generator: GeneratorConfig,
    policy: UncompletePolicy,
}

impl MomentumBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            generator: GeneratorConfig::default(),
            policy: UncompletePolicy::default(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/momentum/momentum.db` or
    /// `~/.local/share/momentum/momentum.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_generator_config(mut self, config: GeneratorConfig) -> Self {
        self.generator = config;
        self
    }

    pub fn with_uncomplete_policy(mut self, policy: UncompletePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the configured session. Persisted state is not read until
    /// [`Momentum::load`].
    ///
    /// # Errors
    ///
    /// Returns `MomentumError::Configuration` if the generator configuration
    /// is invalid
    /// Returns `MomentumError::FileSystem` if the database path is invalid
    /// Returns `MomentumError::Database` if database initialization fails
    pub async fn build(self) -> Result<Momentum> {
        let generator = HttpPlanGenerator::new(self.generator.clone())?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };
        let store = SqliteStore::open(&db_path).await?;

        Ok(Momentum::new(store, generator)
            .with_uncomplete_policy(self.policy)
            .with_fetch_timeout(self.generator.timeout()))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("momentum")
            .place_data_file("momentum.db")
            .map_err(|e| MomentumError::XdgDirectory(e.to_string()))
    }
}

impl Default for MomentumBuilder {
    fn default() -> Self {
        Self::new()
    }
}
