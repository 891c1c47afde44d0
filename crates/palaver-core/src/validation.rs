//! Validation utilities.

use crate::PalaverError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `PalaverError` on failure.
    fn validate_request(&self) -> Result<(), PalaverError> {
        self.validate().map_err(validation_errors_to_palaver_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `PalaverError`.
#[must_use]
pub fn validation_errors_to_palaver_error(errors: ValidationErrors) -> PalaverError {
    let message = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let detail = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string());
                format!("{}: {}", field, detail)
            })
        })
        .collect::<Vec<_>>()
        .join("; ");

    PalaverError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(max = 4, message = "too long"))]
        text: String,
    }

    #[test]
    fn test_validate_request_maps_to_validation_error() {
        let probe = Probe {
            text: "abcdef".to_string(),
        };
        let err = probe.validate_request().unwrap_err();
        match err {
            PalaverError::Validation(msg) => assert!(msg.contains("too long")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_request_passes_valid_input() {
        let probe = Probe {
            text: "ok".to_string(),
        };
        assert!(probe.validate_request().is_ok());
    }
}
