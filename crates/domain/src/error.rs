//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`FleetDashError`] via `#[from]`. Adapter errors are boxed into
//! [`FleetDashError::Storage`].

/// Top-level error for every fleetdash operation.
#[derive(Debug, thiserror::Error)]
pub enum FleetDashError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("authentication error")]
    Auth(#[from] AuthError),

    /// Injected transient failure; the caller may simply try again.
    #[error("Service temporarily unavailable")]
    Unavailable,

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("unexpected payload")]
    PayloadMismatch(#[from] PayloadMismatchError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FleetDashError {
    /// The single human-readable message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Auth(err) => err.to_string(),
            Self::Unavailable => self.to_string(),
            Self::NotFound(err) => err.to_string(),
            Self::PayloadMismatch(_) | Self::Storage(_) => {
                "Network error occurred".to_string()
            }
        }
    }
}

/// Client-side checks that fail before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Credential must not be empty")]
    EmptyCredential,

    #[error("Minimum latency must not exceed maximum latency")]
    LatencyRange,

    #[error("Failure probability must be between 0 and 1")]
    FailureProbability,
}

/// Authentication and authorization failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The login request failed for any reason; the cause is kept as source.
    #[error("Invalid credentials or server error")]
    LoginFailed(#[source] Box<FleetDashError>),

    #[error("Method not allowed")]
    MethodNotAllowed { method: crate::route::Method },

    #[error("Please sign in to continue")]
    NotSignedIn,
}

/// An endpoint or record that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{resource} not found: {id}")]
pub struct NotFoundError {
    pub resource: &'static str,
    pub id: String,
}

/// A backend answered with a payload of the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} payload, got {actual}")]
pub struct PayloadMismatchError {
    pub expected: &'static str,
    pub actual: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Method;

    #[test]
    fn should_surface_validation_message_to_user() {
        let err: FleetDashError = ValidationError::PasswordTooShort { min: 6 }.into();
        assert_eq!(
            err.user_message(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn should_surface_not_found_message_to_user() {
        let err: FleetDashError = NotFoundError {
            resource: "Endpoint",
            id: "/nope".to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Endpoint not found: /nope");
    }

    #[test]
    fn should_hide_login_cause_behind_generic_message() {
        let err: FleetDashError =
            AuthError::LoginFailed(Box::new(FleetDashError::Unavailable)).into();
        assert_eq!(err.user_message(), "Invalid credentials or server error");
    }

    #[test]
    fn should_keep_login_cause_as_source() {
        let err = AuthError::LoginFailed(Box::new(FleetDashError::Unavailable));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Service temporarily unavailable");
    }

    #[test]
    fn should_report_method_not_allowed() {
        let err: FleetDashError = AuthError::MethodNotAllowed {
            method: Method::Read,
        }
        .into();
        assert_eq!(err.user_message(), "Method not allowed");
    }

    #[test]
    fn should_mask_storage_errors_for_user() {
        let io = std::io::Error::other("disk on fire");
        let err = FleetDashError::Storage(Box::new(io));
        assert_eq!(err.user_message(), "Network error occurred");
    }
}
