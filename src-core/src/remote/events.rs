//! Auth state notifications
//!
//! Backends push an [`AuthChange`] to every subscriber whenever the signed-in
//! identity changes. Subscribers receive them on an unbounded channel.

use std::sync::Mutex;

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

use crate::domain::Identity;

/// Kind of auth state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Auth state transition together with the identity it leaves behind
#[derive(Debug, Clone, PartialEq)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub identity: Option<Identity>,
}

impl AuthChange {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            event: AuthEvent::SignedIn,
            identity: Some(identity),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            event: AuthEvent::SignedOut,
            identity: None,
        }
    }
}

/// Stream of auth changes handed to a subscriber
pub type AuthEvents = UnboundedReceiver<AuthChange>;

/// Fan-out of auth changes to all live subscribers
#[derive(Default)]
pub struct AuthBroadcast {
    subscribers: Mutex<Vec<UnboundedSender<AuthChange>>>,
}

impl AuthBroadcast {
    pub fn subscribe(&self) -> AuthEvents {
        let (tx, rx) = unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);
        rx
    }

    /// Deliver `change` to every subscriber; dropped receivers are forgotten
    pub fn emit(&self, change: AuthChange) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|tx| tx.unbounded_send(change.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_emit_reaches_live_subscribers() {
        let broadcast = AuthBroadcast::default();
        let mut first = broadcast.subscribe();
        let second = broadcast.subscribe();
        drop(second);

        broadcast.emit(AuthChange::signed_out());

        assert_eq!(first.next().await, Some(AuthChange::signed_out()));
        assert_eq!(broadcast.subscribers.lock().unwrap().len(), 1);
    }
}
