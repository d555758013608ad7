//! Core error types for the navigator core
//!
//! "The query does not fit the simple form" is never an error: reconcilers answer it with
//! `Ok(None)`. The variants here are real faults, mostly raised by collaborators.

use thiserror::Error;

/// Core error type for all reconciliation and context operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Collaborator error: {service} - {message}")]
    Collaborator { service: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Fault raised by an injected lookup service
    pub fn collaborator(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn is_collaborator_fault(&self) -> bool {
        matches!(self, Self::Collaborator { .. })
    }
}

impl From<crate::config::ConfigError> for SearchError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used throughout the navigator crates
pub type SearchResult<T> = Result<T, SearchError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_fault() {
        let err = SearchError::collaborator("option-lookup", "connection reset");
        assert!(err.is_collaborator_fault());
        assert_eq!(
            err.to_string(),
            "Collaborator error: option-lookup - connection reset"
        );
        assert!(!SearchError::Config("x".into()).is_collaborator_fault());
    }

    #[test]
    fn test_from_config_error() {
        let err: SearchError = crate::config::ConfigError::InvalidValue {
            key: "JQL_CASCADE_FUNCTION".into(),
            message: "must not be blank".into(),
        }
        .into();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
