use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

/// Raw HTTP send. One implementation wraps reqwest, one is a scripted fake.
/// A response of any status is `Ok`; `Err` means no response arrived at all.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub payload: Payload,
}

#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body; `Null` when the body was empty, `String` when it
    /// was not valid JSON.
    pub body: serde_json::Value,
}

impl TransportResponse {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        TransportResponse {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connect-level failure: refused, DNS, TLS handshake — the host never
    /// answered.
    #[error("server unreachable: {0}")]
    Unreachable(String),
    /// The connection failed some other way before a response arrived.
    #[error("connection failed: {0}")]
    Connection(String),
}
