//! Conversation service trait definition.

use crate::dto::{MessageResponse, SendMessageRequest, UserResponse};
use palaver_core::{PalaverResult, UserId};
use async_trait::async_trait;

/// Conversation service.
///
/// Three read queries and one write, all orchestrating the cache store,
/// the persistent store, the media store and the real-time notifier.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Lists every other user as a potential contact.
    async fn list_contacts(&self, requester: UserId) -> PalaverResult<Vec<UserResponse>>;

    /// Lists the conversation history between the requester and a peer.
    async fn list_messages(
        &self,
        requester: UserId,
        peer: UserId,
    ) -> PalaverResult<Vec<MessageResponse>>;

    /// Lists the distinct users the requester has exchanged messages with.
    async fn list_chat_partners(&self, requester: UserId) -> PalaverResult<Vec<UserResponse>>;

    /// Sends a message, invalidating the conversation's cache keys and
    /// notifying the receiver's live connection if one exists.
    async fn send_message(
        &self,
        sender: UserId,
        receiver: UserId,
        request: SendMessageRequest,
    ) -> PalaverResult<MessageResponse>;
}
