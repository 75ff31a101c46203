use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::{Arc, RwLock};

/// Process-wide credential store. The in-memory session is the fast path;
/// every transition is mirrored into the durable store so a restart comes
/// back in the same state.
pub struct RealSessionService {
    client: Arc<dyn ApiClient>,
    store: Arc<dyn LocalStore>,
    state: RwLock<Session>,
}

impl RealSessionService {
    /// Builds the service with whatever session survived the last run.
    pub async fn restore(client: Arc<dyn ApiClient>, store: Arc<dyn LocalStore>) -> Self {
        let session = match store.get(SESSION_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(session) => session,
                Err(error) => {
                    warn!(%error, "stored session is malformed, starting signed out");
                    Session::default()
                }
            },
            Ok(None) => Session::default(),
            Err(error) => {
                warn!(%error, "could not read stored session, starting signed out");
                Session::default()
            }
        };
        RealSessionService {
            client,
            store,
            state: RwLock::new(session),
        }
    }

    async fn persist(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => {
                if let Err(error) = self.store.set(SESSION_KEY, &raw).await {
                    warn!(%error, "failed to persist session");
                }
            }
            Err(error) => warn!(%error, "failed to serialize session"),
        }
    }
}

#[async_trait::async_trait]
impl SessionService for RealSessionService {
    async fn set_user(&self, user: User) {
        let session = Session::authenticated(user);
        *self.state.write().unwrap() = session.clone();
        self.persist(&session).await;
    }

    async fn logout(&self) {
        // Best effort only. Whatever the backend says, the local session is
        // gone when this returns.
        if let Err(error) = self.client.post(LOGOUT_PATH, serde_json::json!({})).await {
            warn!(%error, "backend logout failed, clearing local session anyway");
        }
        self.state.write().unwrap().clear();
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEY] {
            if let Err(error) = self.store.remove(key).await {
                warn!(key, %error, "failed to clear stored value on logout");
            }
        }
    }

    async fn current_user(&self) -> Option<User> {
        self.state.read().unwrap().user.clone()
    }

    async fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().is_authenticated
    }
}
