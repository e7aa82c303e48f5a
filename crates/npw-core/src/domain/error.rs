//! Domain error types.
//!
//! Validation *failures* (a user typed something invalid) are NOT errors —
//! they surface as the step's single aggregated message and never leave the
//! orchestrator. Everything in this enum is either a configuration mistake
//! made by whoever assembled a template, or an internal invariant breach.

use thiserror::Error;

/// Root domain error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Template configuration errors (programmer error, fail fast)
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Parameter '{parameter}' declares both 'unique' and 'exists'")]
    ConflictingConstraints { parameter: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Orchestration configuration errors
    // ========================================================================
    /// The deduplication suffix search exceeded its iteration cap. The
    /// environment can never satisfy uniqueness; treat as misconfiguration,
    /// not as a user-facing validation failure.
    #[error("Could not find a unique value for '{parameter}' within {cap} attempts")]
    SuffixSearchExhausted { parameter: String, cap: usize },

    /// A value of the wrong kind was pushed at a parameter (e.g. a boolean
    /// into a text row).
    #[error("Parameter '{parameter}' expected a {expected} value")]
    ValueKindMismatch {
        parameter: String,
        expected: &'static str,
    },

    /// A parameter name that no widget of the active template declares.
    #[error("No parameter named '{name}' in template '{template}'")]
    UnknownParameter { name: String, template: String },

    // ========================================================================
    // Catalog errors
    // ========================================================================
    #[error("No valid template found")]
    NoValidTemplate,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConflictingConstraints { parameter } => vec![
                format!("Parameter '{parameter}' cannot be both unique and pre-existing"),
                "Remove one of the two constraints from the template definition".into(),
            ],
            Self::SuffixSearchExhausted { parameter, .. } => vec![
                format!("Every candidate name for '{parameter}' already exists"),
                "Check the project index and related parameters for stale entries".into(),
            ],
            Self::UnknownParameter { template, .. } => vec![
                format!("Check the widget list of template '{template}'"),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplate(_)
            | Self::ConflictingConstraints { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Configuration,
            Self::NoValidTemplate => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    NotFound,
    Internal,
}
