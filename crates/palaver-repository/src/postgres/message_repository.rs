//! PostgreSQL message repository implementation.

use crate::{
    pool::DatabasePool,
    traits::{MessageRepository, NewMessage},
};
use palaver_core::{Message, MessageId, PalaverResult, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL message repository.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: DatabasePool,
}

impl PgMessageRepository {
    /// Creates a new PostgreSQL message repository.
    #[must_use]
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a message.
#[derive(Debug, FromRow)]
struct MessageRow {
    id: Uuid,
    sender_id: Uuid,
    receiver_id: Uuid,
    text: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: MessageId::from_uuid(row.id),
            sender_id: UserId::from_uuid(row.sender_id),
            receiver_id: UserId::from_uuid(row.receiver_id),
            text: row.text,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn find_between(&self, a: UserId, b: UserId) -> PalaverResult<Vec<Message>> {
        debug!("Finding messages between {} and {}", a, b);

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, sender_id, receiver_id, text, image_url, created_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at
            "#,
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn find_involving(&self, id: UserId) -> PalaverResult<Vec<Message>> {
        debug!("Finding messages involving {}", id);

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, sender_id, receiver_id, text, image_url, created_at
            FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn insert(&self, message: NewMessage) -> PalaverResult<Message> {
        debug!(
            "Inserting message from {} to {}",
            message.sender_id, message.receiver_id
        );

        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, text, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, sender_id, receiver_id, text, image_url, created_at
            "#,
        )
        .bind(MessageId::new().into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.receiver_id.into_inner())
        .bind(&message.text)
        .bind(&message.image_url)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Message::from(row))
    }
}
