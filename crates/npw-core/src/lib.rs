//! npw core - the New Project Wizard's parameter model and validation engine.
//!
//! This crate provides the domain and application layers of the wizard,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            npw-cli (CLI)                │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Services             │
//! │ (ConfigureTemplateParametersStep,       │
//! │  WizardService)                         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ProjectQuery, RecentsStore, Generator) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    npw-adapters (Infrastructure)        │
//! │ (LocalProjectQuery, MemoryRecents, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (Constraint, Parameter, Template,       │
//! │  validation engine, catalog)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use npw_core::domain::catalog::{labels, project_template, ProjectType};
//! use npw_core::domain::{EmptyQuery, WizardContext};
//! use npw_core::application::ConfigureTemplateParametersStep;
//!
//! let template = project_template(ProjectType::App, "com.example").unwrap();
//! let mut step = ConfigureTemplateParametersStep::new(
//!     template,
//!     Box::new(EmptyQuery),
//!     WizardContext::new("", false, "com.example"),
//! );
//! step.on_entering().unwrap();
//! step.set_user_value(labels::PROJECT_NAME, "my_shop".into()).unwrap();
//! step.process_pending().unwrap();
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ConfigureTemplateParametersStep, ProjectGenerator, RecentsStore,
        WizardService,
    };
    pub use crate::domain::{
        Constraint, EmptyQuery, Language, ParamValue, Parameter, ProjectQuery, ProjectType,
        Recipe, Template, TemplateData, UiContext, Widget, WizardContext,
    };
    pub use crate::error::{NpwError, NpwResult};
}

/// Crate version, for CLI display.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
