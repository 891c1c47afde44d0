//! # Palaver Service
//!
//! Business logic for the chat backend: the cache-aside consistency layer,
//! the conversation service, and the seams for real-time delivery and media
//! storage.

pub mod cache;
pub mod chat_service;
pub mod chat_service_impl;
pub mod dto;
pub mod media;
pub mod notify;

pub use cache::*;
pub use chat_service::ChatService;
pub use chat_service_impl::ChatServiceImpl;
pub use dto::*;
pub use media::{decode_image_payload, BlobMediaStore, MediaStore};
pub use notify::{Notifier, NEW_MESSAGE_EVENT};
