mod api_client;
mod auth_api;
mod session_service;

pub use api_client::*;
pub use auth_api::*;
pub use session_service::*;
