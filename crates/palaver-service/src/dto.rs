//! Request and response DTOs.
//!
//! The response types double as the cache snapshot schemas: what goes into
//! Redis is exactly what goes over the wire, a plain aggregate with no
//! reference back to live store state.

use palaver_core::{Message, MessageId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to send a message. At least one of `text`/`image` must be
/// present; that cross-field rule is checked by the service, not here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(max = 4096, message = "Message text cannot exceed 4096 characters"))]
    pub text: Option<String>,

    /// Base64 (or data-URI) encoded image payload.
    pub image: Option<String>,
}

/// User response DTO. Deliberately has no password field at all, so a
/// cached snapshot can never leak a hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email.to_string(),
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// Message response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            text: message.text,
            image_url: message.image_url,
            created_at: message.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_core::Email;

    #[test]
    fn test_user_response_strips_password() {
        let user = User::new(
            "alice".to_string(),
            Email::new_unchecked("alice@example.com"),
            "hash".to_string(),
        );
        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("hash"));
        assert!(json.contains("alice@example.com"));
    }

    #[test]
    fn test_message_response_snapshot_roundtrip() {
        let a = UserId::new();
        let b = UserId::new();
        let message = Message::new(a, b, Some("hello".to_string()), None).unwrap();
        let response = MessageResponse::from(message);

        let json = serde_json::to_string(&response).unwrap();
        let back: MessageResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}
