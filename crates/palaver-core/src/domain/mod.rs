//! Domain entities and value objects.

pub mod email;
pub mod message;
pub mod user;

pub use email::{Email, EmailError};
pub use message::Message;
pub use user::User;
