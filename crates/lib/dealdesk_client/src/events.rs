//! Session lifecycle events.
//!
//! The client never navigates. On a 401 it clears the session and publishes
//! [`SessionEvent::Expired`]; whatever owns navigation subscribes and sends
//! the user to the login page.

use tokio::sync::broadcast;
use tracing::debug;

use crate::route_gate::LOGIN_PATH;

const CHANNEL_CAPACITY: usize = 16;

/// Something happened to the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the credentials; storage is already cleared.
    Expired { redirect_to: &'static str },
    LoggedIn { user_id: i64 },
    LoggedOut,
}

impl SessionEvent {
    pub fn expired() -> Self {
        SessionEvent::Expired {
            redirect_to: LOGIN_PATH,
        }
    }
}

/// Broadcast hub for [`SessionEvent`]s. Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscribers is fine.
    pub fn publish(&self, event: SessionEvent) {
        debug!(?event, receivers = self.tx.receiver_count(), "session event");
        let _ = self.tx.send(event);
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
