//! # Palaver REST
//!
//! REST and WebSocket API layer using Axum for Palaver.
//! Provides HTTP endpoints for contacts, conversations and message sending,
//! plus the WebSocket connection registry behind real-time delivery.

pub mod controllers;
pub mod extractors;
pub mod realtime;
pub mod responses;
pub mod router;
pub mod state;

pub use realtime::ConnectionRegistry;
pub use router::*;
pub use state::*;
