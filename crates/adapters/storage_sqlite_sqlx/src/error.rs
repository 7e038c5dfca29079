//! Failures of the `SQLite` session store.

use fleetdash_domain::error::FleetDashError;

/// Errors raised while opening or querying the session database.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database at `url` could not be opened or created.
    #[error("cannot open session database at {url}")]
    Open {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("cannot bring session database schema up to date")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A read, write or removal of a session key failed.
    #[error("session store query failed")]
    Query(#[from] sqlx::Error),
}

impl From<StorageError> for FleetDashError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
