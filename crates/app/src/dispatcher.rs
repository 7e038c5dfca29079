//! Mock request dispatcher: the console's only way to reach the backend.
//!
//! Every request first sleeps for the latency chosen by the
//! [`NetworkConditions`] strategy, then may fail with
//! [`FleetDashError::Unavailable`], and only then is the endpoint resolved
//! and handed to the [`Backend`]. An unknown endpoint therefore still pays
//! the latency and can still hit an injected failure.

use fleetdash_domain::error::{FleetDashError, PayloadMismatchError};
use fleetdash_domain::id::ServerId;
use fleetdash_domain::metrics::DashboardMetrics;
use fleetdash_domain::payload::{ActionAck, Payload};
use fleetdash_domain::route::{Method, Route};
use fleetdash_domain::server::{ServerAction, ServerDetail, ServerSummary};

use crate::ports::{Backend, NetworkConditions};

/// Routes requests through a simulated network to a [`Backend`].
pub struct MockDispatcher<B, N> {
    backend: B,
    network: N,
}

impl<B: Backend, N: NetworkConditions> MockDispatcher<B, N> {
    /// Create a dispatcher over `backend`, shaped by `network`.
    pub fn new(backend: B, network: N) -> Self {
        Self { backend, network }
    }

    /// Issue a request against a logical endpoint.
    ///
    /// `endpoint` may be written with or without a leading `/`.
    ///
    /// # Errors
    ///
    /// - [`FleetDashError::Unavailable`] when the network injects a failure
    /// - [`FleetDashError::NotFound`] when the endpoint is unknown
    /// - whatever the backend reports (e.g. a disallowed method)
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<serde_json::Value>,
    ) -> Result<Payload, FleetDashError> {
        self.simulate_delay().await;

        if self.network.should_fail() {
            tracing::warn!(endpoint, %method, "injected service failure");
            return Err(FleetDashError::Unavailable);
        }

        let route = endpoint.parse::<Route>().inspect_err(|err| {
            tracing::warn!(endpoint, %method, error = %err, "unknown endpoint");
        })?;

        tracing::debug!(%route, %method, "dispatching request");
        self.backend.respond(route, method, body.as_ref())
    }

    /// `GET /dashboard/metrics`
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn dashboard_metrics(&self) -> Result<DashboardMetrics, FleetDashError> {
        self.fetch(Route::DashboardMetrics).await
    }

    /// `GET /servers`
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn servers(&self) -> Result<Vec<ServerSummary>, FleetDashError> {
        self.fetch(Route::Servers).await
    }

    /// `GET /servers/{id}`. Unknown ids answer with the default record.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn server_details(&self, id: ServerId) -> Result<ServerDetail, FleetDashError> {
        self.fetch(Route::ServerDetail(id)).await
    }

    /// Acknowledge a control action on a server.
    ///
    /// Only the latency is simulated: actions never fail and never touch the
    /// backend, so no record changes.
    pub async fn server_action(&self, id: ServerId, action: ServerAction) -> ActionAck {
        self.simulate_delay().await;
        tracing::info!(server = %id, ?action, "server action acknowledged");
        ActionAck {
            success: true,
            message: action.acknowledgement(id),
        }
    }

    async fn fetch<T>(&self, route: Route) -> Result<T, FleetDashError>
    where
        T: TryFrom<Payload, Error = PayloadMismatchError>,
    {
        let payload = self.request(&route.path(), Method::Read, None).await?;
        Ok(T::try_from(payload)?)
    }

    async fn simulate_delay(&self) {
        let latency = self.network.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}
