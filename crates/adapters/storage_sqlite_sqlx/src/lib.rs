//! # fleetdash-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `KeyValueStore` port defined in `fleetdash-app::ports::storage`
//! - Open the session database, creating the file on first use
//! - Run database migrations (using sqlx embedded migrations)
//!
//! ## Dependency rule
//! Depends on `fleetdash-app` (for port traits) and `fleetdash-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod database;
mod error;
mod kv_store;

pub use database::Database;
pub use error::StorageError;
pub use kv_store::SqliteKeyValueStore;
