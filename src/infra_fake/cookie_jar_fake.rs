use crate::domain_port::CookieJar;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory cookie jar; tests use `set`/`clear` to simulate the server
/// setting a cookie or the browser expiring one.
#[derive(Default)]
pub struct FakeCookieJar {
    values: Mutex<HashMap<String, String>>,
}

impl FakeCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    pub fn clear(&self, name: &str) {
        self.values.lock().unwrap().remove(name);
    }
}

impl CookieJar for FakeCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.values.lock().unwrap().get(name).cloned()
    }
}
