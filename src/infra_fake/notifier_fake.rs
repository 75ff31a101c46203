use crate::domain_model::Notice;
use crate::domain_port::Notifier;
use std::sync::Mutex;

/// Records every notice so tests can assert exactly what was surfaced.
#[derive(Default)]
pub struct FakeNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
