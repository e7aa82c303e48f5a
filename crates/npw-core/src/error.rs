//! Unified error handling for the wizard core.
//!
//! Wraps domain and application errors behind one type with user-actionable
//! suggestions and a display category, so the CLI can style and exit-code
//! every failure uniformly.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for npw-core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NpwError {
    /// Errors from the domain layer (template configuration, validation
    /// engine invariants).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (wizard orchestration).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl NpwError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in npw".into(),
                "Please file an issue with the command you ran".into(),
            ],
        }
    }

    /// Error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => match e.category() {
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type NpwResult<T> = Result<T, NpwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_category() {
        let err: NpwError = DomainError::NoValidTemplate.into();
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err: NpwError = ApplicationError::StepNotEntered.into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn suggestions_pass_through() {
        let err: NpwError = DomainError::ConflictingConstraints {
            parameter: "Class name".into(),
        }
        .into();
        assert!(!err.suggestions().is_empty());
    }
}
