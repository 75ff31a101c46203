use std::fmt;

/// Classification tags for globally surfaced request failures. The pipeline
/// emits these through the `Notifier` port; a UI adapter turns them into
/// toasts. Everything not covered here is the caller's own problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Connect-level failure: the backend host did not answer at all.
    ServerUnreachable,
    /// Some other transport failure before any response arrived.
    ConnectionProblem,
    /// A 401 outside the auth flow.
    SessionExpired,
    /// A 403 naming the anti-forgery check.
    CsrfRejected,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notice::ServerUnreachable => {
                "Cannot reach the server. Check that the backend is running."
            }
            Notice::ConnectionProblem => "Connection to the server failed.",
            Notice::SessionExpired => "Your session has expired. Please sign in again.",
            Notice::CsrfRejected => {
                "The request was rejected for security reasons. Refresh the page and try again."
            }
        };
        write!(f, "{message}")
    }
}
