use crate::application_impl::CsrfResolver;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use reqwest::header::{self, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use std::sync::Arc;

/// Header the backend validates mutating requests against.
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Marker the backend puts in the 403 detail when that validation fails.
const CSRF_MARKER: &str = "CSRF";

/// The single choke point for outbound HTTP: credential attachment, multipart
/// header stripping, and response classification with global notices. The
/// pipeline never substitutes its own error for the backend's — it tags,
/// notifies, and propagates.
pub struct RequestPipeline {
    transport: Arc<dyn Transport>,
    store: Arc<dyn LocalStore>,
    csrf: Arc<CsrfResolver>,
    notifier: Arc<dyn Notifier>,
    base: Url,
}

impl RequestPipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn LocalStore>,
        csrf: Arc<CsrfResolver>,
        notifier: Arc<dyn Notifier>,
        base: Url,
    ) -> Self {
        RequestPipeline {
            transport,
            store,
            csrf,
            notifier,
            base,
        }
    }

    /// Every 401 that passes the choke point deletes both stored tokens, so
    /// no call site can forget to.
    async fn clear_tokens(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(error) = self.store.remove(key).await {
                warn!(key, %error, "failed to clear stored token");
            }
        }
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn detail_text(body: &serde_json::Value) -> String {
    body.get("detail")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[async_trait::async_trait]
impl ApiClient for RequestPipeline {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self
            .base
            .join(&request.path)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let mut headers = request.headers;

        if let Some(AccessToken(token)) = stored_access_token(self.store.as_ref()).await {
            match HeaderValue::try_from(format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(error) => warn!(%error, "stored access token is not header-safe"),
            }
        }

        // The token-issuing endpoint must not trigger a resolution of its
        // own output.
        if is_mutating(&request.method) && request.path != CSRF_TOKEN_PATH {
            if let Some(CsrfToken(token)) = self.csrf.resolve().await {
                match HeaderValue::try_from(token) {
                    Ok(value) => {
                        headers.insert(CSRF_HEADER, value);
                    }
                    Err(error) => warn!(%error, "anti-forgery token is not header-safe"),
                }
            }
        }

        if matches!(request.payload, Payload::Multipart(_)) {
            // The transport has to set the boundary-bearing value itself.
            headers.remove(header::CONTENT_TYPE);
        }

        debug!(method = %request.method, path = %request.path, "sending request");
        let outcome = self
            .transport
            .send(TransportRequest {
                method: request.method,
                url,
                headers,
                payload: request.payload,
            })
            .await;

        match outcome {
            Err(error) => {
                let notice = match error {
                    TransportError::Unreachable(_) => Notice::ServerUnreachable,
                    TransportError::Connection(_) => Notice::ConnectionProblem,
                };
                self.notifier.notify(notice);
                warn!(path = %request.path, %error, "request failed before a response arrived");
                Err(ApiError::Network(error))
            }
            Ok(response) if response.status == StatusCode::UNAUTHORIZED => {
                self.clear_tokens().await;
                if !request.path.starts_with(AUTH_PATH_PREFIX) {
                    self.notifier.notify(Notice::SessionExpired);
                }
                Err(ApiError::Unauthorized {
                    body: response.body,
                })
            }
            Ok(response) if response.status == StatusCode::FORBIDDEN => {
                let detail = detail_text(&response.body);
                if detail.contains(CSRF_MARKER) {
                    self.notifier.notify(Notice::CsrfRejected);
                    return Err(ApiError::CsrfRejected { detail });
                }
                Err(ApiError::Status {
                    status: response.status,
                    body: response.body,
                })
            }
            Ok(response) if !response.status.is_success() => Err(ApiError::Status {
                status: response.status,
                body: response.body,
            }),
            Ok(response) => Ok(ApiResponse {
                status: response.status,
                body: response.body,
            }),
        }
    }
}
