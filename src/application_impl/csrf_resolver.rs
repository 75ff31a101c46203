use crate::domain_model::CsrfToken;
use crate::domain_port::*;
use crate::logger::*;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use std::sync::{Arc, Mutex};

type Flight = Shared<BoxFuture<'static, Option<CsrfToken>>>;

/// Lazily acquires the anti-forgery token for mutating requests. Concurrent
/// callers with no cookie in the jar share one in-flight fetch; the slot is
/// released once the flight completes so a later cookie expiry can trigger a
/// fresh fetch.
pub struct CsrfResolver {
    transport: Arc<dyn Transport>,
    jar: Arc<dyn CookieJar>,
    endpoint: Url,
    flight: Mutex<Option<Flight>>,
}

impl CsrfResolver {
    pub fn new(transport: Arc<dyn Transport>, jar: Arc<dyn CookieJar>, endpoint: Url) -> Self {
        CsrfResolver {
            transport,
            jar,
            endpoint,
            flight: Mutex::new(None),
        }
    }

    /// The cookie-sourced value always wins; the network is only touched
    /// when the jar has nothing. `None` means the request goes out without a
    /// token and the backend will answer 403.
    pub async fn resolve(&self) -> Option<CsrfToken> {
        if let Some(value) = self.jar.get(CSRF_COOKIE_NAME) {
            return Some(CsrfToken(value));
        }

        let flight = {
            let mut slot = self.flight.lock().unwrap();
            match slot.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let started = Self::fetch(
                        self.transport.clone(),
                        self.jar.clone(),
                        self.endpoint.clone(),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(started.clone());
                    started
                }
            }
        };

        let resolved = flight.clone().await;

        let mut slot = self.flight.lock().unwrap();
        if slot.as_ref().is_some_and(|current| Shared::ptr_eq(current, &flight)) {
            *slot = None;
        }
        resolved
    }

    async fn fetch(
        transport: Arc<dyn Transport>,
        jar: Arc<dyn CookieJar>,
        endpoint: Url,
    ) -> Option<CsrfToken> {
        let request = TransportRequest {
            method: Method::POST,
            url: endpoint,
            headers: HeaderMap::new(),
            payload: Payload::Empty,
        };
        match transport.send(request).await {
            Ok(response) => {
                let from_body = response
                    .body
                    .get("csrfToken")
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(|s| CsrfToken(s.to_string()));
                // The server may set the cookie as a side effect instead of
                // returning the token in the body.
                from_body.or_else(|| jar.get(CSRF_COOKIE_NAME).map(CsrfToken))
            }
            Err(error) => {
                warn!(%error, "anti-forgery token fetch failed");
                jar.get(CSRF_COOKIE_NAME).map(CsrfToken)
            }
        }
    }
}
