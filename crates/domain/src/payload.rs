//! Payloads answered by the backend, one variant per endpoint kind.

use serde::{Deserialize, Serialize};

use crate::error::PayloadMismatchError;
use crate::metrics::DashboardMetrics;
use crate::server::{ServerDetail, ServerSummary};
use crate::session::{Credential, UserProfile};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    pub token: Credential,
    pub user: UserProfile,
}

/// Acknowledgement of a server control action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAck {
    pub success: bool,
    pub message: String,
}

/// Any successful backend answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Login(LoginGrant),
    Metrics(DashboardMetrics),
    Servers(Vec<ServerSummary>),
    ServerDetail(Box<ServerDetail>),
}

impl Payload {
    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Metrics(_) => "metrics",
            Self::Servers(_) => "servers",
            Self::ServerDetail(_) => "server detail",
        }
    }
}

macro_rules! impl_try_from_payload {
    ($target:ty, $variant:ident, $expected:literal, |$inner:ident| $convert:expr) => {
        impl TryFrom<Payload> for $target {
            type Error = PayloadMismatchError;

            fn try_from(payload: Payload) -> Result<Self, Self::Error> {
                match payload {
                    Payload::$variant($inner) => Ok($convert),
                    other => Err(PayloadMismatchError {
                        expected: $expected,
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_try_from_payload!(LoginGrant, Login, "login", |grant| grant);
impl_try_from_payload!(DashboardMetrics, Metrics, "metrics", |metrics| metrics);
impl_try_from_payload!(Vec<ServerSummary>, Servers, "servers", |servers| servers);
impl_try_from_payload!(ServerDetail, ServerDetail, "server detail", |detail| *detail);
