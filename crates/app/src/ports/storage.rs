//! Storage port: durable string key/value pairs.
//!
//! Mirrors the browser's local storage: plain string values, last write wins,
//! no transactions.

use std::future::Future;

use fleetdash_domain::error::FleetDashError;

/// Durable key/value storage scoped to one console installation.
pub trait KeyValueStore: Send + Sync {
    /// Read `key`, returning `None` when absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, FleetDashError>> + Send;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send;
}

impl<T: KeyValueStore> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, FleetDashError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
        (**self).remove(key)
    }
}
