//! Result type aliases for Palaver.

use crate::PalaverError;

/// A specialized `Result` type for Palaver operations.
pub type PalaverResult<T> = Result<T, PalaverError>;
