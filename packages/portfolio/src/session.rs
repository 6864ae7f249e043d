//! The client's current belief about who is signed in.

use serde::{Deserialize, Serialize};

/// Identity of a signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl UserRef {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Session state. Starts `Unknown` until the identity provider answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unknown,
    Authenticated(UserRef),
    Unauthenticated,
}

impl Session {
    pub fn from_user(user: Option<UserRef>) -> Self {
        match user {
            Some(user) => Session::Authenticated(user),
            None => Session::Unauthenticated,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Session::Unknown)
    }

    pub fn user(&self) -> Option<&UserRef> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
