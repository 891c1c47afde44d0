//! HTTP controllers.

pub mod chat_controller;
pub mod health_controller;
pub mod media_controller;
