//! Application ports (traits) for external dependencies.
//!
//! Driven (output) ports the wizard calls into; adapters in `npw-adapters`
//! implement them. The environment-probe port [`ProjectQuery`] lives in the
//! domain because the validation engine itself depends on it.
//!
//! [`ProjectQuery`]: crate::domain::ProjectQuery

use crate::application::ApplicationError;
use crate::domain::{Recipe, TemplateData};

/// History of recently used values, keyed per template parameter. Package
/// rows push into it when the wizard finishes so the next run can offer the
/// same packages again.
#[cfg_attr(test, mockall::automock)]
pub trait RecentsStore {
    /// Record `value` as the most recent entry for `key`.
    fn push(&mut self, key: &str, value: &str);

    /// Recent entries for `key`, most recent first.
    fn recent(&self, key: &str) -> Vec<String>;
}

/// Runs a recipe against its collected data.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectGenerator {
    fn generate(&mut self, recipe: Recipe, data: &TemplateData) -> Result<(), ApplicationError>;
}
