//! WebSocket connection registry and upgrade handler.

mod registry;
mod ws;

pub use registry::ConnectionRegistry;
pub use ws::ws_handler;
