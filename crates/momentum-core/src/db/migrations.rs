//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Schema version written to `PRAGMA user_version` once the `kv` table exists.
const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Several short-lived connections may touch the file in turn
        self.connection
            .busy_timeout(std::time::Duration::from_secs(5))
            .db_context("Failed to set busy timeout")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;

        if version < SCHEMA_VERSION {
            // Version 0 files predate the updated_at column
            let has_updated_at: bool = self
                .connection
                .query_row(
                    "SELECT COUNT(*) FROM pragma_table_info('kv') WHERE name = 'updated_at'",
                    [],
                    |row| row.get(0),
                )
                .map(|count: i64| count > 0)
                .db_context("Failed to inspect kv table")?;

            if !has_updated_at {
                self.connection
                    .execute(
                        "ALTER TABLE kv ADD COLUMN updated_at TEXT NOT NULL DEFAULT ''",
                        [],
                    )
                    .db_context("Failed to add updated_at column to kv table")?;
            }

            self.connection
                .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
                .db_context("Failed to record schema version")?;
        }

        Ok(())
    }
}
