//! # Palaver Config
//!
//! Layered configuration for the Palaver chat backend: TOML files under
//! `config/` plus `PALAVER_`-prefixed environment variable overrides.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::ConfigLoader;
