use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use serde_json::json;
use std::sync::Arc;

/// `AuthApi` over the request pipeline, mirroring the backend's auth URL
/// table.
pub struct HttpAuthApi {
    client: Arc<dyn ApiClient>,
    store: Arc<dyn LocalStore>,
}

impl HttpAuthApi {
    pub fn new(client: Arc<dyn ApiClient>, store: Arc<dyn LocalStore>) -> Self {
        HttpAuthApi { client, store }
    }

    async fn persist(&self, key: &str, value: &str) {
        // A broken store degrades to an in-memory session for this run;
        // the login itself already succeeded.
        if let Err(error) = self.store.set(key, value).await {
            warn!(key, %error, "failed to persist token");
        }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, input: LoginInput) -> Result<TokenPair, ApiError> {
        let response = self
            .client
            .post(
                LOGIN_PATH,
                json!({"username": input.username, "password": input.password}),
            )
            .await?;
        let pair: TokenPair = response.decode()?;
        self.persist(ACCESS_TOKEN_KEY, &pair.access.0).await;
        self.persist(REFRESH_TOKEN_KEY, &pair.refresh.0).await;
        Ok(pair)
    }

    async fn register(&self, input: RegisterInput) -> Result<User, ApiError> {
        let response = self
            .client
            .post(
                REGISTER_PATH,
                json!({
                    "username": input.username,
                    "password": input.password,
                    "first_name": input.first_name,
                    "last_name": input.last_name,
                    "email": input.email,
                    "phone": input.phone,
                }),
            )
            .await?;
        response.decode()
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.client.get(ME_PATH).await?.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::{CsrfResolver, RequestPipeline};
    use crate::infra_fake::*;
    use reqwest::{StatusCode, Url};

    fn api(transport: FakeTransport) -> (HttpAuthApi, Arc<FakeLocalStore>) {
        let base: Url = "http://localhost:8000".parse().unwrap();
        let transport = Arc::new(transport);
        let store = Arc::new(FakeLocalStore::new());
        let csrf = Arc::new(CsrfResolver::new(
            transport.clone(),
            Arc::new(FakeCookieJar::new()),
            base.join(CSRF_TOKEN_PATH).unwrap(),
        ));
        let pipeline = Arc::new(RequestPipeline::new(
            transport,
            store.clone(),
            csrf,
            Arc::new(FakeNotifier::new()),
            base,
        ));
        (HttpAuthApi::new(pipeline, store.clone()), store)
    }

    #[tokio::test]
    async fn login_stores_both_tokens_under_their_fixed_keys() {
        let (auth, store) = api(FakeTransport::with_handler(|request| {
            let body = match request.url.path() {
                CSRF_TOKEN_PATH => serde_json::json!({"csrfToken": "tok"}),
                LOGIN_PATH => serde_json::json!({"access": "acc-1", "refresh": "ref-1"}),
                other => panic!("unexpected path {other}"),
            };
            Ok(TransportResponse::json(StatusCode::OK, body))
        }));

        let pair = auth
            .login(LoginInput {
                username: "kenta".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(pair.access.0, "acc-1");
        assert_eq!(store.get_sync(ACCESS_TOKEN_KEY).as_deref(), Some("acc-1"));
        assert_eq!(store.get_sync(REFRESH_TOKEN_KEY).as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn me_decodes_the_user_record() {
        let (auth, _) = api(FakeTransport::with_handler(|_| {
            Ok(TransportResponse::json(
                StatusCode::OK,
                serde_json::json!({
                    "id": 9,
                    "username": "mira",
                    "email": "mira@example.com",
                    "first_name": "Mira",
                    "last_name": "Ito",
                    "is_coach": false,
                    "is_student": true
                }),
            ))
        }));

        let user = auth.me().await.unwrap();
        assert_eq!(user.id, UserId(9));
        assert_eq!(user.username, "mira");
    }

    #[tokio::test]
    async fn bad_credentials_surface_the_unauthorized_classification() {
        let (auth, _) = api(FakeTransport::with_handler(|request| {
            let body = match request.url.path() {
                CSRF_TOKEN_PATH => serde_json::json!({"csrfToken": "tok"}),
                _ => {
                    return Ok(TransportResponse::json(
                        StatusCode::UNAUTHORIZED,
                        serde_json::json!({"detail": "No active account found"}),
                    ));
                }
            };
            Ok(TransportResponse::json(StatusCode::OK, body))
        }));

        let result = auth
            .login(LoginInput {
                username: "kenta".into(),
                password: "wrong".into(),
            })
            .await;
        assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    }
}
