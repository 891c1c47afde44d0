//! PostgreSQL user repository implementation.

use crate::{pool::DatabasePool, traits::UserRepository};
use palaver_core::{Email, PalaverResult, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: DatabasePool,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: Email::new_unchecked(row.email),
            password_hash: row.password_hash,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all_excluding(&self, id: UserId) -> PalaverResult<Vec<User>> {
        debug!("Finding all users excluding: {}", id);

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, avatar_url, created_at, updated_at
            FROM users
            WHERE id != $1
            ORDER BY username
            "#,
        )
        .bind(id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn exists(&self, id: UserId) -> PalaverResult<bool> {
        debug!("Checking user existence: {}", id);

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(exists)
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> PalaverResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Finding {} users by id", ids.len());

        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, avatar_url, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
