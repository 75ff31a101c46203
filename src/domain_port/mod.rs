mod cookie_jar;
mod local_store;
mod notifier;
mod transport;

pub use cookie_jar::*;
pub use local_store::*;
pub use notifier::*;
pub use transport::*;
