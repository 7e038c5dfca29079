//! `SQLite` implementation of [`KeyValueStore`].

use std::future::Future;

use sqlx::SqlitePool;

use fleetdash_app::ports::KeyValueStore;
use fleetdash_domain::error::FleetDashError;

use crate::error::StorageError;

const SELECT_VALUE: &str = "SELECT value FROM kv_entries WHERE key = ?";
const UPSERT: &str = "INSERT INTO kv_entries (key, value) VALUES (?, ?) \
                      ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const DELETE_BY_KEY: &str = "DELETE FROM kv_entries WHERE key = ?";

/// `SQLite`-backed key/value store. Survives restarts when file-backed.
///
/// Obtained from [`Database::kv_store`](crate::Database::kv_store).
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, FleetDashError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            let value: Option<String> = sqlx::query_scalar(SELECT_VALUE)
                .bind(key)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(value)
        }
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        let value = value.to_string();
        async move {
            sqlx::query(UPSERT)
                .bind(key)
                .bind(value)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            sqlx::query(DELETE_BY_KEY)
                .bind(key)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
