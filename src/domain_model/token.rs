use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken(pub String);

/// Anti-forgery token, distinct from the bearer pair. Sourced from the
/// `csrftoken` cookie or the token-issuing endpoint's response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrfToken(pub String);

/// Response body of `POST /api/auth/token/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}
