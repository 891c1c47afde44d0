//! Conversation service implementation.
//!
//! The cache-aside core of the system. Reads populate the cache with a
//! fixed 300s TTL; `send_message` invalidates exactly the two directional
//! conversation keys before attempting real-time delivery. Cache and
//! notifier failures never decide the outcome of a request: once the
//! persistent store has accepted a write, the operation succeeds.

use crate::cache::{keys, CacheExt, CacheStore, CACHE_TTL};
use crate::chat_service::ChatService;
use crate::dto::{MessageResponse, SendMessageRequest, UserResponse};
use crate::media::{decode_image_payload, MediaStore};
use crate::notify::{Notifier, NEW_MESSAGE_EVENT};
use palaver_core::{PalaverError, PalaverResult, UserId, ValidateExt};
use palaver_repository::{MessageRepository, NewMessage, UserRepository};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Conversation service over injected store, cache, media and notifier
/// resources.
pub struct ChatServiceImpl {
    users: Arc<dyn UserRepository>,
    messages: Arc<dyn MessageRepository>,
    cache: Arc<dyn CacheStore>,
    media: Arc<dyn MediaStore>,
    notifier: Arc<dyn Notifier>,
}

impl ChatServiceImpl {
    /// Creates a new conversation service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        messages: Arc<dyn MessageRepository>,
        cache: Arc<dyn CacheStore>,
        media: Arc<dyn MediaStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            users,
            messages,
            cache,
            media,
            notifier,
        }
    }

    /// Opportunistic cache read: transport errors degrade to a miss.
    async fn cache_get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Cache read for '{}' failed, falling back to store: {}", key, e);
                None
            }
        }
    }

    /// Best-effort cache population.
    async fn cache_set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, CACHE_TTL).await {
            warn!("Cache write for '{}' failed: {}", key, e);
        }
    }

    /// Best-effort cache invalidation. Idempotent per the store contract,
    /// so deleting keys that were never populated is fine.
    async fn cache_delete(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            warn!("Cache invalidation for '{}' failed: {}", key, e);
        }
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn list_contacts(&self, requester: UserId) -> PalaverResult<Vec<UserResponse>> {
        let cache_key = keys::contacts(requester);

        if let Some(cached) = self.cache_get::<Vec<UserResponse>>(&cache_key).await {
            return Ok(cached);
        }

        let contacts: Vec<UserResponse> = self
            .users
            .find_all_excluding(requester)
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();

        self.cache_set(&cache_key, &contacts).await;
        Ok(contacts)
    }

    async fn list_messages(
        &self,
        requester: UserId,
        peer: UserId,
    ) -> PalaverResult<Vec<MessageResponse>> {
        let cache_key = keys::messages(requester, peer);

        if let Some(cached) = self.cache_get::<Vec<MessageResponse>>(&cache_key).await {
            return Ok(cached);
        }

        let messages: Vec<MessageResponse> = self
            .messages
            .find_between(requester, peer)
            .await?
            .into_iter()
            .map(MessageResponse::from)
            .collect();

        self.cache_set(&cache_key, &messages).await;
        Ok(messages)
    }

    async fn list_chat_partners(&self, requester: UserId) -> PalaverResult<Vec<UserResponse>> {
        let cache_key = keys::chat_partners(requester);

        if let Some(cached) = self.cache_get::<Vec<UserResponse>>(&cache_key).await {
            return Ok(cached);
        }

        // Distinct counterparts across every message the requester took
        // part in; set semantics, first-appearance order not preserved.
        let partner_ids: HashSet<UserId> = self
            .messages
            .find_involving(requester)
            .await?
            .iter()
            .map(|msg| msg.counterpart(requester))
            .collect();
        let partner_ids: Vec<UserId> = partner_ids.into_iter().collect();

        let partners: Vec<UserResponse> = self
            .users
            .find_by_ids(&partner_ids)
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();

        self.cache_set(&cache_key, &partners).await;
        Ok(partners)
    }

    async fn send_message(
        &self,
        sender: UserId,
        receiver: UserId,
        request: SendMessageRequest,
    ) -> PalaverResult<MessageResponse> {
        request.validate_request()?;

        // Blank strings count as absent, matching what chat clients send.
        let text = request.text.filter(|t| !t.trim().is_empty());
        let image = request.image.filter(|i| !i.trim().is_empty());

        if text.is_none() && image.is_none() {
            return Err(PalaverError::validation("Text or image is required"));
        }
        if sender == receiver {
            return Err(PalaverError::validation("Cannot send messages to yourself"));
        }
        if !self.users.exists(receiver).await? {
            return Err(PalaverError::not_found("User", receiver));
        }

        // Upload before persistence: a failed upload must not leave a
        // partial message behind.
        let image_url = match image {
            Some(payload) => {
                let bytes = decode_image_payload(&payload)?;
                Some(self.media.upload(&bytes).await?)
            }
            None => None,
        };

        let message = self
            .messages
            .insert(NewMessage {
                sender_id: sender,
                receiver_id: receiver,
                text,
                image_url,
            })
            .await?;

        info!("Message {} persisted: {} -> {}", message.id, sender, receiver);

        // Invalidate both directions of the conversation unconditionally.
        // The partner/contact lists for either side are left to age out via
        // the TTL.
        self.cache_delete(&keys::messages(sender, receiver)).await;
        self.cache_delete(&keys::messages(receiver, sender)).await;

        let response = MessageResponse::from(message);

        // Fire-and-forget push to the receiver. Failure or absence of a
        // live connection never fails the send.
        match serde_json::to_value(&response) {
            Ok(payload) => match self.notifier.notify(receiver, NEW_MESSAGE_EVENT, payload).await {
                Ok(true) => debug!("Delivered {} event to {}", NEW_MESSAGE_EVENT, receiver),
                Ok(false) => debug!("Receiver {} offline, no live delivery", receiver),
                Err(e) => warn!("Real-time delivery to {} failed: {}", receiver, e),
            },
            Err(e) => warn!("Failed to serialize {} payload: {}", NEW_MESSAGE_EVENT, e),
        }

        Ok(response)
    }
}

impl std::fmt::Debug for ChatServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatServiceImpl").finish_non_exhaustive()
    }
}
