//! Application state for Axum handlers.

use crate::realtime::ConnectionRegistry;
use palaver_service::{ChatService, MediaStore};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<dyn ChatService>,
    pub media_store: Arc<dyn MediaStore>,
    pub registry: Arc<ConnectionRegistry>,
    pub jwt_secret: String,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        chat_service: Arc<dyn ChatService>,
        media_store: Arc<dyn MediaStore>,
        registry: Arc<ConnectionRegistry>,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            chat_service,
            media_store,
            registry,
            jwt_secret: jwt_secret.into(),
        }
    }
}
