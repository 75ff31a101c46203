mod auth_api_impl;
mod csrf_resolver;
mod request_pipeline;
mod session_bootstrap;
mod session_service_impl;

pub use auth_api_impl::*;
pub use csrf_resolver::*;
pub use request_pipeline::*;
pub use session_bootstrap::*;
pub use session_service_impl::*;
