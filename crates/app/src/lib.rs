//! # fleetdash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `KeyValueStore`: durable string key/value storage for the session
//!   - `Backend`: answers resolved routes (the fixture catalog today)
//!   - `NetworkConditions`: latency and failure injection strategy
//! - Define **driving/inbound** use-cases:
//!   - `MockDispatcher`: delay, inject failures, route to the backend
//!   - `SessionService`: login, logout, current user
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (simulated and fixed network strategies, in-memory store)
//!
//! ## Dependency rule
//! Depends on `fleetdash-domain` only (plus `tokio::time` and `rand`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dispatcher;
pub mod kv_store;
pub mod network;
pub mod ports;
pub mod services;
