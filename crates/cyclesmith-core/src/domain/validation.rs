use crate::domain::{
    error::DomainError,
    naming::{SCOPE_SEPARATOR, is_identifier},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// A cycle name is one or more C++ identifiers joined by `::`.
    pub fn validate_cycle_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidCycleName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }

        for segment in name.split(SCOPE_SEPARATOR) {
            if segment.is_empty() {
                return Err(invalid("empty scope segment"));
            }
            if !is_identifier(segment) {
                return Err(invalid(&format!("'{segment}' is not a C++ identifier")));
            }
        }

        Ok(())
    }
}
