use crate::domain_port::CookieJar;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;

/// Read view over the cookie jar the transport writes into, scoped to the
/// backend's base URL.
pub struct SharedCookieJar {
    jar: Arc<Jar>,
    base: Url,
}

impl SharedCookieJar {
    pub fn new(base: Url) -> Self {
        SharedCookieJar {
            jar: Arc::new(Jar::default()),
            base,
        }
    }

    /// The jar to hand to the transport so both sides see the same cookies.
    pub fn inner(&self) -> Arc<Jar> {
        self.jar.clone()
    }
}

impl CookieJar for SharedCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        let raw = header.to_str().ok()?;
        raw.split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_port::CSRF_COOKIE_NAME;

    #[test]
    fn reads_a_cookie_the_transport_stored() {
        let base: Url = "http://localhost:8000".parse().unwrap();
        let shared = SharedCookieJar::new(base.clone());
        shared
            .inner()
            .add_cookie_str("csrftoken=tok-9; Path=/", &base);

        assert_eq!(shared.get(CSRF_COOKIE_NAME).as_deref(), Some("tok-9"));
        assert_eq!(shared.get("sessionid"), None);
    }
}
