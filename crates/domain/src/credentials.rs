//! Login credentials as typed into the sign-in form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Email and password submitted by the login form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Run the form-level checks, reporting the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] in form order: email presence,
    /// email shape, password presence, password length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_valid_credentials() {
        let creds = LoginCredentials::new("admin@cloudsystems.com", "password123");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn should_require_email() {
        let creds = LoginCredentials::new("   ", "password123");
        assert_eq!(creds.validate(), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn should_reject_email_without_at_sign() {
        let creds = LoginCredentials::new("admin.cloudsystems.com", "password123");
        assert_eq!(creds.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn should_require_password() {
        let creds = LoginCredentials::new("a@b.c", "      ");
        assert_eq!(creds.validate(), Err(ValidationError::PasswordRequired));
    }

    #[test]
    fn should_reject_short_password() {
        let creds = LoginCredentials::new("a@b.c", "12345");
        assert_eq!(
            creds.validate(),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn should_accept_password_of_exactly_minimum_length() {
        let creds = LoginCredentials::new("a@b.c", "123456");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn should_count_characters_not_bytes() {
        let creds = LoginCredentials::new("a@b.c", "éééééé");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn should_check_email_before_password() {
        let creds = LoginCredentials::new("nope", "1");
        assert_eq!(creds.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn should_not_leak_password_in_debug_output() {
        let creds = LoginCredentials::new("a@b.c", "hunter22");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("a@b.c"));
    }
}
