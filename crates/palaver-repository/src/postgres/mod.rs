//! PostgreSQL repository implementations.

mod message_repository;
mod user_repository;

pub use message_repository::PgMessageRepository;
pub use user_repository::PgUserRepository;
