use crate::application_port::*;
use crate::logger::*;
use std::sync::Arc;
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Route guard for the authenticated area. One "who am I" call per guard
/// instance; concurrent and repeated checks observe the memoized outcome.
/// The guard never retries and never distinguishes "definitely logged out"
/// from "couldn't tell" — both redirect to login.
pub struct SessionBootstrap {
    auth_api: Arc<dyn AuthApi>,
    session: Arc<dyn SessionService>,
    outcome: OnceCell<GuardState>,
}

impl SessionBootstrap {
    pub fn new(auth_api: Arc<dyn AuthApi>, session: Arc<dyn SessionService>) -> Self {
        SessionBootstrap {
            auth_api,
            session,
            outcome: OnceCell::new(),
        }
    }

    /// `Checking` until the first `check` resolves.
    pub fn state(&self) -> GuardState {
        self.outcome.get().copied().unwrap_or(GuardState::Checking)
    }

    pub async fn check(&self) -> GuardState {
        *self
            .outcome
            .get_or_init(|| async {
                match self.auth_api.me().await {
                    Ok(user) => {
                        self.session.set_user(user).await;
                        GuardState::Authenticated
                    }
                    // The expected case for a first-time visitor; stay quiet.
                    Err(ApiError::Unauthorized { .. }) => GuardState::Unauthenticated,
                    Err(error) => {
                        warn!(%error, "session check failed");
                        GuardState::Unauthenticated
                    }
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::*;
    use crate::domain_port::TransportError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedAuthApi {
        me_calls: AtomicUsize,
        outcome: Box<dyn Fn() -> Result<User, ApiError> + Send + Sync>,
    }

    impl ScriptedAuthApi {
        fn new(outcome: impl Fn() -> Result<User, ApiError> + Send + Sync + 'static) -> Self {
            ScriptedAuthApi {
                me_calls: AtomicUsize::new(0),
                outcome: Box::new(outcome),
            }
        }
    }

    #[async_trait::async_trait]
    impl AuthApi for ScriptedAuthApi {
        async fn login(&self, _input: LoginInput) -> Result<TokenPair, ApiError> {
            unimplemented!("not used by the guard")
        }

        async fn register(&self, _input: RegisterInput) -> Result<User, ApiError> {
            unimplemented!("not used by the guard")
        }

        async fn me(&self) -> Result<User, ApiError> {
            self.me_calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    #[derive(Default)]
    struct RecordingSession {
        user: Mutex<Option<User>>,
    }

    #[async_trait::async_trait]
    impl SessionService for RecordingSession {
        async fn set_user(&self, user: User) {
            *self.user.lock().unwrap() = Some(user);
        }

        async fn logout(&self) {
            *self.user.lock().unwrap() = None;
        }

        async fn current_user(&self) -> Option<User> {
            self.user.lock().unwrap().clone()
        }

        async fn is_authenticated(&self) -> bool {
            self.user.lock().unwrap().is_some()
        }
    }

    fn sample_user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 5,
            "username": "aiko",
            "email": "aiko@example.com",
            "first_name": "Aiko",
            "last_name": "Mori",
            "is_coach": false,
            "is_student": true
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn successful_check_authenticates_and_records_the_user() {
        let auth = Arc::new(ScriptedAuthApi::new(|| Ok(sample_user())));
        let session = Arc::new(RecordingSession::default());
        let guard = SessionBootstrap::new(auth.clone(), session.clone());

        assert_eq!(guard.state(), GuardState::Checking);
        assert_eq!(guard.check().await, GuardState::Authenticated);
        assert_eq!(guard.state(), GuardState::Authenticated);
        assert_eq!(session.current_user().await, Some(sample_user()));
    }

    #[tokio::test]
    async fn unauthorized_is_the_silent_signed_out_path() {
        let auth = Arc::new(ScriptedAuthApi::new(|| {
            Err(ApiError::Unauthorized {
                body: serde_json::json!({"detail": "Invalid token."}),
            })
        }));
        let session = Arc::new(RecordingSession::default());
        let guard = SessionBootstrap::new(auth, session.clone());

        assert_eq!(guard.check().await, GuardState::Unauthenticated);
        assert_eq!(session.current_user().await, None);
    }

    #[tokio::test]
    async fn other_failures_also_end_unauthenticated() {
        let auth = Arc::new(ScriptedAuthApi::new(|| {
            Err(ApiError::Network(TransportError::Unreachable(
                "refused".into(),
            )))
        }));
        let session = Arc::new(RecordingSession::default());
        let guard = SessionBootstrap::new(auth, session.clone());

        assert_eq!(guard.check().await, GuardState::Unauthenticated);
        assert_eq!(session.current_user().await, None);
    }

    #[tokio::test]
    async fn the_check_runs_exactly_once_per_guard() {
        let auth = Arc::new(ScriptedAuthApi::new(|| Ok(sample_user())));
        let session = Arc::new(RecordingSession::default());
        let guard = SessionBootstrap::new(auth.clone(), session);

        let (a, b) = tokio::join!(guard.check(), guard.check());
        guard.check().await;

        assert_eq!(a, GuardState::Authenticated);
        assert_eq!(b, GuardState::Authenticated);
        assert_eq!(auth.me_calls.load(Ordering::SeqCst), 1);
    }
}
