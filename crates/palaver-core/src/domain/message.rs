//! Message entity.

use crate::{MessageId, PalaverError, PalaverResult, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted chat message between two users.
///
/// Invariants: at least one of `text`/`image_url` is present, and the sender
/// is never the receiver. `Message::new` refuses to construct a value that
/// violates either, and the database schema carries matching CHECK
/// constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message.
    pub id: MessageId,

    /// The sending user.
    pub sender_id: UserId,

    /// The receiving user.
    pub receiver_id: UserId,

    /// Text body, if any.
    pub text: Option<String>,

    /// Stable URL of an attached image, if any.
    pub image_url: Option<String>,

    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with a fresh ID and timestamp.
    pub fn new(
        sender_id: UserId,
        receiver_id: UserId,
        text: Option<String>,
        image_url: Option<String>,
    ) -> PalaverResult<Self> {
        if text.is_none() && image_url.is_none() {
            return Err(PalaverError::validation("Text or image is required"));
        }
        if sender_id == receiver_id {
            return Err(PalaverError::validation("Cannot send messages to yourself"));
        }

        Ok(Self {
            id: MessageId::new(),
            sender_id,
            receiver_id,
            text,
            image_url,
            created_at: Utc::now(),
        })
    }

    /// True when `user_id` is either side of this message.
    #[must_use]
    pub fn involves(&self, user_id: UserId) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// The participant that is not `user_id`.
    ///
    /// Returns the sender when `user_id` is the receiver and vice versa;
    /// callers are expected to have checked [`involves`](Self::involves).
    #[must_use]
    pub fn counterpart(&self, user_id: UserId) -> UserId {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_requires_content() {
        let a = UserId::new();
        let b = UserId::new();
        let err = Message::new(a, b, None, None).unwrap_err();
        assert!(matches!(err, PalaverError::Validation(_)));
    }

    #[test]
    fn test_message_rejects_self_send() {
        let a = UserId::new();
        let err = Message::new(a, a, Some("hi".to_string()), None).unwrap_err();
        assert!(matches!(err, PalaverError::Validation(_)));
    }

    #[test]
    fn test_message_counterpart() {
        let a = UserId::new();
        let b = UserId::new();
        let msg = Message::new(a, b, Some("hi".to_string()), None).unwrap();
        assert_eq!(msg.counterpart(a), b);
        assert_eq!(msg.counterpart(b), a);
        assert!(msg.involves(a));
        assert!(msg.involves(b));
        assert!(!msg.involves(UserId::new()));
    }

    #[test]
    fn test_image_only_message_is_valid() {
        let a = UserId::new();
        let b = UserId::new();
        let msg = Message::new(a, b, None, Some("http://host/media/x".to_string())).unwrap();
        assert!(msg.text.is_none());
        assert!(msg.image_url.is_some());
    }
}
