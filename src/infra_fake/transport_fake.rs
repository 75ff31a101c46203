use crate::application_port::*;
use crate::domain_port::*;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

type Handler =
    Box<dyn Fn(&TransportRequest) -> Result<TransportResponse, TransportError> + Send + Sync>;

/// Scripted transport: a handler closure decides every response, each
/// request is recorded, and an optional latency keeps requests overlapping
/// for single-flight assertions.
pub struct FakeTransport {
    handler: Handler,
    latency: Duration,
    calls: Mutex<Vec<TransportRequest>>,
}

impl FakeTransport {
    /// Answers everything with an empty 200.
    pub fn new() -> Self {
        Self::with_handler(|_| Ok(TransportResponse::json(StatusCode::OK, json!({}))))
    }

    pub fn with_handler(
        handler: impl Fn(&TransportRequest) -> Result<TransportResponse, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        FakeTransport {
            handler: Box::new(handler),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn count_for_path(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.url.path() == path)
            .count()
    }
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.handler)(&request)
    }
}

/// A canned in-process backend for the `fake` api backend of the demo
/// binary: one coach account, token issuing, and a "who am I" that honors
/// the bearer header.
pub fn fake_backend() -> FakeTransport {
    FakeTransport::with_handler(|request| {
        let body = match request.url.path() {
            LOGIN_PATH => json!({"access": "fake-access", "refresh": "fake-refresh"}),
            CSRF_TOKEN_PATH => json!({"csrfToken": "fake-csrf"}),
            ME_PATH => {
                let authorized = request
                    .headers
                    .get(reqwest::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v == "Bearer fake-access");
                if !authorized {
                    return Ok(TransportResponse::json(
                        StatusCode::UNAUTHORIZED,
                        json!({"detail": "Authentication credentials were not provided."}),
                    ));
                }
                json!({
                    "id": 1,
                    "username": "sensei",
                    "email": "sensei@example.com",
                    "first_name": "Hanshi",
                    "last_name": "Ota",
                    "is_coach": true,
                    "is_student": false,
                    "is_staff": true
                })
            }
            LOGOUT_PATH => json!({}),
            _ => json!({}),
        };
        Ok(TransportResponse::json(StatusCode::OK, body))
    })
}
