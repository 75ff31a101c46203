mod cookie_jar_fake;
mod local_store_fake;
mod notifier_fake;
mod transport_fake;

pub use cookie_jar_fake::*;
pub use local_store_fake::*;
pub use notifier_fake::*;
pub use transport_fake::*;
