use serde::Serialize;

/// Cached roster data that a successful mutation made stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterEvent {
    /// The role list must be refetched.
    RolesChanged,
    /// The user list must be refetched (user rows render role info).
    UsersChanged,
}

/// Receiver of roster invalidation notifications.
///
/// Called synchronously before the mutating call returns, so a host cache is
/// invalidated before the UI settles.
pub trait RosterEventSink: Send + Sync {
    /// Publishes one notification.
    fn publish(&self, event: RosterEvent);
}
