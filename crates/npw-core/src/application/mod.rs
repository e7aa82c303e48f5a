//! Application layer for the wizard.
//!
//! This layer contains:
//! - **Services**: use case orchestration (the parameter step, the finish path)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All validation rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{ProjectGenerator, RecentsStore};
pub use services::{ConfigureTemplateParametersStep, RowView, WizardService};
