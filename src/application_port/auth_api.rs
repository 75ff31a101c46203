use crate::application_port::ApiError;
use crate::domain_model::*;

pub const LOGIN_PATH: &str = "/api/auth/token/";
pub const REGISTER_PATH: &str = "/api/auth/register/";
pub const ME_PATH: &str = "/api/auth/me/";
pub const LOGOUT_PATH: &str = "/api/auth/logout/";
pub const CSRF_TOKEN_PATH: &str = "/api/auth/csrf-token/";
/// Calls under this prefix report their own failures; the pipeline keeps the
/// global session-expired notice out of them.
pub const AUTH_PATH_PREFIX: &str = "/api/auth/";

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token pair; both tokens are stored
    /// under their fixed keys on success.
    async fn login(&self, input: LoginInput) -> Result<TokenPair, ApiError>;
    async fn register(&self, input: RegisterInput) -> Result<User, ApiError>;
    /// The "who am I" call: 401 when the session is not valid.
    async fn me(&self) -> Result<User, ApiError>;
}
