mod client;
mod notifier;

pub use client::*;
pub use notifier::*;
