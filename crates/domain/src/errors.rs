//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Unknown CEFR proficiency level code
    #[error("Invalid proficiency level: {0}")]
    InvalidProficiencyLevel(String),

    /// Scratch file name is not a single safe path segment
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Audio file", "abc.mp3");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Audio file");
                assert_eq!(id, "abc.mp3");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("Audio file", "abc.mp3");
        assert_eq!(err.to_string(), "Audio file not found: abc.mp3");
    }

    #[test]
    fn invalid_level_error_message() {
        let err = DomainError::InvalidProficiencyLevel("Z9".to_string());
        assert_eq!(err.to_string(), "Invalid proficiency level: Z9");
    }

    #[test]
    fn invalid_file_name_error_message() {
        let err = DomainError::InvalidFileName("../etc/passwd".to_string());
        assert_eq!(err.to_string(), "Invalid file name: ../etc/passwd");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
