//! Live connection registry.

use palaver_core::{PalaverResult, UserId};
use palaver_service::Notifier;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Envelope pushed over a live connection.
#[derive(Debug, Serialize)]
struct EventEnvelope<'a> {
    event: &'a str,
    data: serde_json::Value,
}

/// Registry of live WebSocket connections, one per user.
///
/// A user opening a second connection replaces the first; the replaced
/// socket's sender is dropped, which closes its forwarding task. The
/// registry doubles as the real-time notifier: delivery is a channel send
/// into the connection's outbound queue, nothing more.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<UserId, UnboundedSender<String>>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user's outbound channel, replacing any previous one.
    pub fn register(&self, user_id: UserId, sender: UnboundedSender<String>) {
        let previous = self.connections.write().insert(user_id, sender);
        if previous.is_some() {
            debug!("Replaced existing connection for {}", user_id);
        }
    }

    /// Removes a user's connection if `sender` is still the registered one.
    /// A stale unregister from a replaced connection is a no-op.
    pub fn unregister(&self, user_id: UserId, sender: &UnboundedSender<String>) {
        let mut connections = self.connections.write();
        if let Some(current) = connections.get(&user_id) {
            if current.same_channel(sender) {
                connections.remove(&user_id);
            }
        }
    }

    /// True when the user has a live connection.
    #[must_use]
    pub fn is_online(&self, user_id: UserId) -> bool {
        self.connections.read().contains_key(&user_id)
    }

    /// Number of live connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.read().len()
    }
}

#[async_trait]
impl Notifier for ConnectionRegistry {
    async fn notify(
        &self,
        recipient: UserId,
        event: &str,
        payload: serde_json::Value,
    ) -> PalaverResult<bool> {
        let envelope = serde_json::to_string(&EventEnvelope {
            event,
            data: payload,
        })?;

        let sender = match self.connections.read().get(&recipient) {
            Some(sender) => sender.clone(),
            None => return Ok(false),
        };

        if sender.send(envelope).is_err() {
            // Receiver side is gone but the close handshake has not run
            // yet; drop the dead entry and report offline.
            self.unregister(recipient, &sender);
            return Ok(false);
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_notify_offline_user_returns_false() {
        let registry = ConnectionRegistry::new();
        let delivered = registry
            .notify(UserId::new(), "newMessage", serde_json::json!({}))
            .await
            .unwrap();
        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_notify_delivers_envelope() {
        let registry = ConnectionRegistry::new();
        let user = UserId::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(user, tx);

        let delivered = registry
            .notify(user, "newMessage", serde_json::json!({"text": "hi"}))
            .await
            .unwrap();
        assert!(delivered);

        let frame = rx.recv().await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(parsed["event"], "newMessage");
        assert_eq!(parsed["data"]["text"], "hi");
    }

    #[tokio::test]
    async fn test_notify_prunes_dead_connection() {
        let registry = ConnectionRegistry::new();
        let user = UserId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(user, tx);
        drop(rx);

        let delivered = registry
            .notify(user, "newMessage", serde_json::json!({}))
            .await
            .unwrap();
        assert!(!delivered);
        assert!(!registry.is_online(user));
    }

    #[test]
    fn test_second_connection_replaces_first() {
        let registry = ConnectionRegistry::new();
        let user = UserId::new();
        let (first_tx, _first_rx) = mpsc::unbounded_channel();
        let (second_tx, _second_rx) = mpsc::unbounded_channel();

        registry.register(user, first_tx.clone());
        registry.register(user, second_tx);
        assert_eq!(registry.connection_count(), 1);

        // The replaced connection's unregister must not evict the new one.
        registry.unregister(user, &first_tx);
        assert!(registry.is_online(user));
    }
}
