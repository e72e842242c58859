//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid mission request: {0}")]
    InvalidRequest(String),

    #[error("Invalid mission id: {0}")]
    InvalidMissionId(String),

    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Check if this error is a configuration-time failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let error = DomainError::Configuration("no initiator".to_string());
        assert_eq!(error.to_string(), "Configuration error: no initiator");
    }

    #[test]
    fn test_is_configuration_check() {
        assert!(DomainError::Configuration("x".to_string()).is_configuration());
        assert!(!DomainError::InvalidRequest("x".to_string()).is_configuration());
        assert!(
            !DomainError::InvalidTransition {
                from: "completed".to_string(),
                to: "running".to_string(),
            }
            .is_configuration()
        );
    }
}
