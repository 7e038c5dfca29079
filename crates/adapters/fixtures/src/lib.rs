//! # fleetdash-adapter-fixtures
//!
//! Fixture backend that answers every route with canned data.
//!
//! ## Provided routes
//!
//! | Route | Method | Payload |
//! |-------|--------|---------|
//! | `auth/login` | `POST` only | fresh credential + the admin profile |
//! | `dashboard/metrics` | any | fleet-wide metrics and recent activity |
//! | `servers` | any | four server summaries |
//! | `servers/{id}` | any | detail for id 1 or 2; any other id gets id 1 |
//!
//! The data never changes at runtime. Only the credential sequence advances.
//!
//! ## Dependency rule
//!
//! Depends on `fleetdash-app` (port traits) and `fleetdash-domain` only.

mod dashboard;
mod servers;
mod users;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use fleetdash_app::ports::Backend;
use fleetdash_domain::error::{AuthError, FleetDashError, NotFoundError, ValidationError};
use fleetdash_domain::id::ServerId;
use fleetdash_domain::metrics::DashboardMetrics;
use fleetdash_domain::payload::{LoginGrant, Payload};
use fleetdash_domain::route::{Method, Route};
use fleetdash_domain::server::{ServerDetail, ServerSummary};
use fleetdash_domain::session::{Credential, UserProfile};
use fleetdash_domain::time;

/// Record served for server ids without a detail fixture.
pub const DEFAULT_DETAIL_ID: ServerId = ServerId::new(1);

const TOKEN_PREFIX: &str = "mock-jwt-token";

/// Immutable catalog of canned responses.
pub struct FixtureCatalog {
    user: UserProfile,
    metrics: DashboardMetrics,
    servers: Vec<ServerSummary>,
    details: BTreeMap<ServerId, ServerDetail>,
    issued: AtomicU64,
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        let details = servers::details()
            .into_iter()
            .map(|detail| (detail.summary.id, detail))
            .collect();

        Self {
            user: users::admin(),
            metrics: dashboard::metrics(),
            servers: servers::summaries(),
            details,
            issued: AtomicU64::new(0),
        }
    }
}

impl FixtureCatalog {
    /// Detail for `id`, falling back to [`DEFAULT_DETAIL_ID`] for unknown ids.
    fn detail(&self, id: ServerId) -> Option<&ServerDetail> {
        self.details.get(&id).or_else(|| {
            tracing::debug!(server = %id, fallback = %DEFAULT_DETAIL_ID, "no detail fixture, using default");
            self.details.get(&DEFAULT_DETAIL_ID)
        })
    }

    /// Mint a credential that no earlier call has returned.
    fn mint_credential(&self) -> Result<Credential, ValidationError> {
        let seq = self.issued.fetch_add(1, Ordering::Relaxed);
        let millis = time::epoch_millis(time::now());
        Credential::new(format!("{TOKEN_PREFIX}-{millis}-{seq}"))
    }

    fn login(&self, method: Method) -> Result<Payload, FleetDashError> {
        if method != Method::Create {
            return Err(AuthError::MethodNotAllowed { method }.into());
        }
        Ok(Payload::Login(LoginGrant {
            token: self.mint_credential()?,
            user: self.user.clone(),
        }))
    }
}

impl Backend for FixtureCatalog {
    fn respond(
        &self,
        route: Route,
        method: Method,
        _body: Option<&serde_json::Value>,
    ) -> Result<Payload, FleetDashError> {
        match route {
            Route::Login => self.login(method),
            Route::DashboardMetrics => Ok(Payload::Metrics(self.metrics.clone())),
            Route::Servers => Ok(Payload::Servers(self.servers.clone())),
            Route::ServerDetail(id) => self
                .detail(id)
                .map(|detail| Payload::ServerDetail(Box::new(detail.clone())))
                .ok_or_else(|| {
                    NotFoundError {
                        resource: "Server",
                        id: id.to_string(),
                    }
                    .into()
                }),
        }
    }
}
