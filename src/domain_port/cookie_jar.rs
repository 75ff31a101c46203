/// Cookie name the backend uses for the anti-forgery token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Read access to the ambient cookie jar shared with the transport. The
/// resolver prefers a cookie-sourced anti-forgery token over anything it
/// fetched itself.
pub trait CookieJar: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}
