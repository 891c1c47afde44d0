//! # Palaver Core
//!
//! Core types, traits, and error definitions for the Palaver chat backend.
//! This crate provides the foundational abstractions shared by every layer:
//! the error taxonomy, typed entity IDs, validation helpers, and the domain
//! entities (users and messages).

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
