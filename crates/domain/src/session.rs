//! Session: the signed-in user and the credential that proves it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::UserId;

/// Store key holding the raw credential.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Store key holding the JSON-serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

/// Opaque bearer-token-like credential. Never empty.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCredential`] when `token` is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ValidationError::EmptyCredential);
        }
        Ok(Self(token))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Credential {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Credential> for String {
    fn from(value: Credential) -> Self {
        value.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Cached identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// The single session of a console instance.
///
/// `authenticated` is derived from the credential, so a session can never
/// be authenticated without one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credential: Option<Credential>,
    profile: Option<UserProfile>,
}

impl Session {
    /// A freshly signed-in session.
    #[must_use]
    pub fn signed_in(credential: Credential, profile: UserProfile) -> Self {
        Self {
            credential: Some(credential),
            profile: Some(profile),
        }
    }

    /// Rebuild a session from whatever was persisted, profile optional.
    #[must_use]
    pub fn restored(credential: Option<Credential>, profile: Option<UserProfile>) -> Self {
        Self {
            credential,
            profile,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Drop credential and profile.
    pub fn clear(&mut self) {
        self.credential = None;
        self.profile = None;
    }
}
