//! # Palaver Repository
//!
//! Persistent store adapter for the chat backend: repository traits for the
//! two entity kinds (users, messages) and their PostgreSQL implementations.
//! Everything above this crate sees the store as an opaque
//! query-by-predicate surface.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::DatabasePool;
pub use postgres::{PgMessageRepository, PgUserRepository};
pub use traits::{MessageRepository, NewMessage, UserRepository};
