//! Backend port: whatever answers a resolved route.
//!
//! The fixture catalog implements it today; a real HTTP client could replace
//! it without touching the dispatcher.

use fleetdash_domain::error::FleetDashError;
use fleetdash_domain::payload::Payload;
use fleetdash_domain::route::{Method, Route};

/// Answers requests that made it past the simulated network.
pub trait Backend: Send + Sync {
    /// Produce the payload for `route` called with `method`.
    ///
    /// # Errors
    ///
    /// Implementations return [`FleetDashError::Auth`] for disallowed methods
    /// and [`FleetDashError::NotFound`] for routes they cannot serve.
    fn respond(
        &self,
        route: Route,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<Payload, FleetDashError>;
}

impl<T: Backend> Backend for std::sync::Arc<T> {
    fn respond(
        &self,
        route: Route,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<Payload, FleetDashError> {
        (**self).respond(route, method, body)
    }
}
