//! Repository trait definitions.

use palaver_core::{Message, PalaverResult, User, UserId};
use async_trait::async_trait;

/// User repository trait.
///
/// Users are read-only from this backend's perspective; provisioning is
/// owned by the external auth system.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds all users except the given one, ordered by username.
    async fn find_all_excluding(&self, id: UserId) -> PalaverResult<Vec<User>>;

    /// Checks whether a user with the given ID exists.
    async fn exists(&self, id: UserId) -> PalaverResult<bool>;

    /// Finds the users whose IDs appear in `ids`.
    ///
    /// Missing IDs are silently skipped; the result order is unspecified.
    async fn find_by_ids(&self, ids: &[UserId]) -> PalaverResult<Vec<User>>;
}

/// A message accepted for persistence, before the server assigns an ID and
/// timestamp.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: Option<String>,
    pub image_url: Option<String>,
}

/// Message repository trait.
///
/// Messages are append-only; nothing in this backend updates or deletes
/// them.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Finds all messages between `a` and `b` in either direction, ordered
    /// by creation time ascending.
    async fn find_between(&self, a: UserId, b: UserId) -> PalaverResult<Vec<Message>>;

    /// Finds all messages where `id` is the sender or the receiver, ordered
    /// by creation time ascending.
    async fn find_involving(&self, id: UserId) -> PalaverResult<Vec<Message>>;

    /// Persists a new message, assigning its ID and timestamp.
    async fn insert(&self, message: NewMessage) -> PalaverResult<Message>;
}
