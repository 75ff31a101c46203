use crate::domain_model::Notice;
use crate::domain_port::Notifier;
use crate::logger::*;

/// The CLI's notice adapter: where a browser client would raise a toast,
/// this renders through the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::ServerUnreachable | Notice::ConnectionProblem => error!("{notice}"),
            Notice::SessionExpired | Notice::CsrfRejected => warn!("{notice}"),
        }
    }
}
