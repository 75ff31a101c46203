use crate::domain_model::User;
use serde::{Deserialize, Serialize};

/// Client-side view of the authenticated session. A cache of the last
/// successful authentication, never the backend's source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn authenticated(user: User) -> Self {
        Session {
            user: Some(user),
            is_authenticated: true,
        }
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }
}
