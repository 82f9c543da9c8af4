//! Key-value slot queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv WHERE key = ?1";
const SELECT_KEYS_SQL: &str = "SELECT key FROM kv ORDER BY key";

impl super::Database {
    /// Reads the value stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read value")
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_VALUE_SQL, params![key, value, &now])
            .db_context("Failed to write value")?;
        Ok(())
    }

    /// Removes `key`. Returns whether a value was present.
    pub fn remove_value(&self, key: &str) -> Result<bool> {
        let rows_affected = self
            .connection
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to remove value")?;
        Ok(rows_affected > 0)
    }

    /// Lists every stored key in lexical order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_KEYS_SQL)
            .db_context("Failed to prepare query")?;

        let keys = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query keys")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to fetch keys")?;

        Ok(keys)
    }
}
