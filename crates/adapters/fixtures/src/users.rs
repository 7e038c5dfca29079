//! The single console user.

use fleetdash_domain::id::UserId;
use fleetdash_domain::session::UserProfile;

/// Profile returned by every successful login.
pub fn admin() -> UserProfile {
    UserProfile {
        id: UserId::new(1),
        email: "admin@cloudsystems.com".to_string(),
        name: "Cloud Administrator".to_string(),
        role: "admin".to_string(),
    }
}
