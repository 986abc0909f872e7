use depot_application::{RosterEvent, RosterEventSink};
use tokio::sync::broadcast;
use tracing::debug;

/// Fans roster invalidations out to every subscribed host cache.
#[derive(Debug, Clone)]
pub struct BroadcastRosterEventSink {
    sender: broadcast::Sender<RosterEvent>,
}

impl BroadcastRosterEventSink {
    /// Creates a sink buffering up to `capacity` events per lagging subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.sender.subscribe()
    }
}

impl RosterEventSink for BroadcastRosterEventSink {
    fn publish(&self, event: RosterEvent) {
        if self.sender.send(event).is_err() {
            debug!(?event, "roster event dropped without subscribers");
        }
    }
}
