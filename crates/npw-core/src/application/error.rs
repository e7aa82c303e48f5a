//! Application layer errors.
//!
//! These errors represent failures in wizard orchestration, not business
//! logic. A user typing an invalid value is NOT an error; that surfaces as
//! the step's aggregated validation message.

use thiserror::Error;

use crate::domain::ErrorCategory;

/// Errors that occur while driving the wizard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A step method was called before `on_entering`.
    #[error("Wizard step used before entering it")]
    StepNotEntered,

    /// `on_proceeding` was called while validation still fails.
    #[error("Cannot proceed: {message}")]
    CannotProceed { message: String },

    /// The generator failed to produce the project.
    #[error("Project generation failed: {reason}")]
    GenerationFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StepNotEntered => vec![
                "Call on_entering before interacting with the step".into(),
            ],
            Self::CannotProceed { message } => vec![
                format!("Fix the reported problem first: {message}"),
            ],
            Self::GenerationFailed { .. } => vec![
                "Check the Flutter SDK path and project location".into(),
                "Re-run with -vv for the generator's output".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StepNotEntered => ErrorCategory::Internal,
            Self::CannotProceed { .. } => ErrorCategory::Configuration,
            Self::GenerationFailed { .. } => ErrorCategory::Internal,
        }
    }
}
