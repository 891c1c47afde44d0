//! Real-time notification seam.

use palaver_core::{PalaverResult, UserId};
use async_trait::async_trait;

/// Event name pushed to a receiver when a message lands.
pub const NEW_MESSAGE_EVENT: &str = "newMessage";

/// Real-time notifier abstraction.
///
/// Delivery is best-effort by contract: no retry, no acknowledgment, no
/// queueing for offline recipients. An offline recipient simply discovers
/// the message on their next read, which will miss the just-invalidated
/// cache key and see fresh data. Durability is owned entirely by the
/// persistent store; callers must treat any failure here as ignorable.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts to deliver `payload` as `event` to the recipient's live
    /// connection, if any.
    ///
    /// Returns `Ok(true)` when a connection was found and the event was
    /// handed off, `Ok(false)` when the recipient is offline.
    async fn notify(
        &self,
        recipient: UserId,
        event: &str,
        payload: serde_json::Value,
    ) -> PalaverResult<bool>;
}
