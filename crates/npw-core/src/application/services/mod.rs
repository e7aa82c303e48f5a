//! Use case orchestration.

pub mod configure_step;
pub mod wizard_service;

pub use configure_step::{ConfigureTemplateParametersStep, RowView};
pub use wizard_service::WizardService;
