use crate::domain_model::Notice;

/// Sink for globally surfaced notices. The pipeline classifies, the UI
/// boundary decides how to render; the core stays side-effect free beyond
/// this call.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
