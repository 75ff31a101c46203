mod cookie_jar_reqwest;
mod transport_reqwest;

pub use cookie_jar_reqwest::*;
pub use transport_reqwest::*;
