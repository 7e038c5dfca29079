//! Opening the session database.
//!
//! The file is created on first use and migrated before any store is handed
//! out. An in-memory database lives only as long as its connection, so it is
//! served from a single connection that is never recycled.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;
use crate::kv_store::SqliteKeyValueStore;

/// An open, migrated session database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database at `url` and bring its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] when the URL is malformed or the file
    /// cannot be opened, and [`StorageError::Migration`] when the schema
    /// cannot be applied.
    pub async fn open(url: &str) -> Result<Self, StorageError> {
        let open_failed = |source| StorageError::Open {
            url: url.to_string(),
            source,
        };

        let options = SqliteConnectOptions::from_str(url)
            .map_err(open_failed)?
            .create_if_missing(true);
        let pool = pool_options(url)
            .connect_with(options)
            .await
            .map_err(open_failed)?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!(url, "session database ready");
        Ok(Self { pool })
    }

    /// A key/value store over this database. Every store shares the pool.
    #[must_use]
    pub fn kv_store(&self) -> SqliteKeyValueStore {
        SqliteKeyValueStore::new(self.pool.clone())
    }

    /// Wait for pending writes and release the file.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn pool_options(url: &str) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new();
    if is_in_memory(url) {
        options
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        options
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdash_app::ports::KeyValueStore;

    #[tokio::test]
    async fn should_create_schema_when_opening_memory_db() {
        let db = Database::open("sqlite::memory:").await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&db.pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|row| row.0.as_str()).collect();
        assert_eq!(names, ["kv_entries"]);
    }

    #[tokio::test]
    async fn should_share_memory_db_between_stores() {
        let db = Database::open("sqlite::memory:").await.unwrap();
        db.kv_store().set("authToken", "t").await.unwrap();
        assert_eq!(
            db.kv_store().get("authToken").await.unwrap().as_deref(),
            Some("t")
        );
    }

    #[tokio::test]
    async fn should_keep_data_after_reopening_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("session.db").display());

        let db = Database::open(&url).await.unwrap();
        db.kv_store().set("user", "{}").await.unwrap();
        db.close().await;

        let db = Database::open(&url).await.unwrap();
        assert_eq!(db.kv_store().get("user").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn should_name_url_when_file_cannot_be_opened() {
        let url = "sqlite:/nonexistent-fleetdash-dir/nested/session.db";
        let Err(err) = Database::open(url).await else {
            panic!("opened a database under a missing directory");
        };
        assert!(matches!(err, StorageError::Open { .. }), "{err:?}");
        assert_eq!(err.to_string(), format!("cannot open session database at {url}"));
    }

    #[test]
    fn should_detect_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:shared?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:fleetdash.db?mode=rwc"));
    }
}
