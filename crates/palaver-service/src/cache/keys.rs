//! Cache key generators for consistent key naming.
//!
//! These formats are part of the service contract: invalidation in
//! `send_message` and population in the read paths must agree byte-for-byte
//! or stale entries survive their conversation. Message keys are
//! directional: one conversation owns `messages:{a}:{b}` *and*
//! `messages:{b}:{a}` because the read path is keyed by the requester.

use palaver_core::UserId;

/// Cache key for a user's contact list.
#[must_use]
pub fn contacts(user_id: UserId) -> String {
    format!("contacts:{}", user_id)
}

/// Cache key for the conversation history as seen by `user_id`.
#[must_use]
pub fn messages(user_id: UserId, peer_id: UserId) -> String {
    format!("messages:{}:{}", user_id, peer_id)
}

/// Cache key for a user's chat partner list.
#[must_use]
pub fn chat_partners(user_id: UserId) -> String {
    format!("chatPartners:{}", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_key() {
        let id = UserId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            contacts(id),
            "contacts:550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_messages_key_is_directional() {
        let a = UserId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let b = UserId::parse("650e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            messages(a, b),
            "messages:550e8400-e29b-41d4-a716-446655440000:650e8400-e29b-41d4-a716-446655440000"
        );
        assert_ne!(messages(a, b), messages(b, a));
    }

    #[test]
    fn test_chat_partners_key() {
        let id = UserId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            chat_partners(id),
            "chatPartners:550e8400-e29b-41d4-a716-446655440000"
        );
    }
}
