use crate::domain_model::*;

/// The client-side credential store: holds the authenticated session and
/// exposes it to every other component.
#[async_trait::async_trait]
pub trait SessionService: Send + Sync {
    /// Record the user and flip to authenticated. Pure state transition.
    async fn set_user(&self, user: User);
    /// Best-effort backend logout, then unconditional local clearing. Must
    /// never leave the client looking authenticated, whatever the backend
    /// call does.
    async fn logout(&self);
    async fn current_user(&self) -> Option<User>;
    async fn is_authenticated(&self) -> bool;
}
