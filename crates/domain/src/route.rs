//! Logical endpoints the console can request, and the method verbs used.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotFoundError;
use crate::id::ServerId;

/// Request verb. Serialized with its HTTP spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "GET")]
    Read,
    #[serde(rename = "POST")]
    Create,
    #[serde(rename = "PUT")]
    Update,
    #[serde(rename = "DELETE")]
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("GET"),
            Self::Create => f.write_str("POST"),
            Self::Update => f.write_str("PUT"),
            Self::Delete => f.write_str("DELETE"),
        }
    }
}

/// A resolved endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `auth/login`
    Login,
    /// `dashboard/metrics`
    DashboardMetrics,
    /// `servers`
    Servers,
    /// `servers/{id}`
    ServerDetail(ServerId),
}

impl Route {
    /// Canonical path, without leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "auth/login".to_string(),
            Self::DashboardMetrics => "dashboard/metrics".to_string(),
            Self::Servers => "servers".to_string(),
            Self::ServerDetail(id) => format!("servers/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

impl FromStr for Route {
    type Err = NotFoundError;

    /// Parse an endpoint, with or without a leading `/`.
    fn from_str(endpoint: &str) -> Result<Self, Self::Err> {
        let not_found = || NotFoundError {
            resource: "Endpoint",
            id: endpoint.to_string(),
        };

        let path = endpoint.strip_prefix('/').unwrap_or(endpoint);
        let segments: Vec<&str> = path.split('/').collect();

        match segments.as_slice() {
            ["auth", "login"] => Ok(Self::Login),
            ["dashboard", "metrics"] => Ok(Self::DashboardMetrics),
            ["servers"] => Ok(Self::Servers),
            ["servers", id] if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => id
                .parse()
                .map(Self::ServerDetail)
                .map_err(|_| not_found()),
            _ => Err(not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_known_routes() {
        assert_eq!("auth/login".parse(), Ok(Route::Login));
        assert_eq!("/dashboard/metrics".parse(), Ok(Route::DashboardMetrics));
        assert_eq!("/servers".parse(), Ok(Route::Servers));
        assert_eq!(
            "servers/2".parse(),
            Ok(Route::ServerDetail(ServerId::new(2)))
        );
    }

    #[test]
    fn should_reject_unknown_top_level_endpoint() {
        let err = "/billing".parse::<Route>().unwrap_err();
        assert_eq!(err.resource, "Endpoint");
        assert_eq!(err.id, "/billing");
    }

    #[test]
    fn should_reject_non_numeric_server_id() {
        assert!("servers/web-01".parse::<Route>().is_err());
        assert!("servers/".parse::<Route>().is_err());
        assert!("servers/+1".parse::<Route>().is_err());
    }

    #[test]
    fn should_reject_trailing_segments() {
        assert!("servers/1/restart".parse::<Route>().is_err());
        assert!("servers/".parse::<Route>().is_err());
    }

    #[test]
    fn should_display_with_leading_slash() {
        assert_eq!(Route::ServerDetail(ServerId::new(4)).to_string(), "/servers/4");
        assert_eq!(Route::Login.path(), "auth/login");
    }

    #[test]
    fn should_display_http_spelling() {
        assert_eq!(Method::Create.to_string(), "POST");
        assert_eq!(serde_json::to_string(&Method::Read).unwrap(), "\"GET\"");
    }
}
