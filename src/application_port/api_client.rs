use crate::domain_port::*;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

/// Classified outcome of a pipeline call. The variant is the classification
/// tag; the original response body travels with it untouched so callers can
/// assemble their own field-aware messages.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Network(#[from] TransportError),
    #[error("unauthorized")]
    Unauthorized { body: serde_json::Value },
    #[error("request rejected by anti-forgery check: {detail}")]
    CsrfRejected { detail: String },
    #[error("HTTP {status}")]
    Status {
        status: StatusCode,
        body: serde_json::Value,
    },
    #[error("malformed request: {0}")]
    InvalidRequest(String),
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/api/auth/me/`.
    pub path: String,
    pub headers: HeaderMap,
    pub payload: Payload,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            payload: Payload::Empty,
        }
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.payload = Payload::Multipart(form);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// The single choke point every outbound call goes through. Bodies are
/// `serde_json::Value` so the trait stays object-safe; callers build them
/// with `json!` or `serde_json::to_value`.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;

    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::new(Method::GET, path)).await
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::new(Method::POST, path).json(body))
            .await
    }

    async fn put(&self, path: &str, body: serde_json::Value) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::new(Method::PUT, path).json(body))
            .await
    }

    async fn patch(&self, path: &str, body: serde_json::Value) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::new(Method::PATCH, path).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::new(Method::DELETE, path)).await
    }

    async fn post_multipart(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::new(Method::POST, path).multipart(form))
            .await
    }
}
