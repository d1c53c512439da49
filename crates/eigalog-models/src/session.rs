use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer identity issued by the external auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user profile document. A missing document or missing field reads as
/// a regular user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub admin: bool,
}

/// Identity resolved for the current page view: the bearer id plus the
/// admin flag looked up from the profile store.
///
/// Transient; re-derived on every auth-state change and threaded explicitly
/// to the components that need it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub admin: bool,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            admin: false,
        }
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }
}
