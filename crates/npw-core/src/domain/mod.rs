//! Domain layer: the template parameter model and its validation engine.
//!
//! Everything here is UI-free and framework-free. The only way the domain
//! touches the outside world is through the [`validation::ProjectQuery`]
//! driven port, which adapters implement.

pub mod catalog;
pub mod constraint;
pub mod error;
pub mod naming;
pub mod parameter;
pub mod template;
pub mod template_data;
pub mod validation;
pub mod widget;

pub use catalog::ProjectType;
pub use constraint::Constraint;
pub use error::{DomainError, ErrorCategory};
pub use parameter::{
    BooleanParameter, ParamValue, Parameter, StringParameter, SuggestContext, WizardContext,
};
pub use template::{Recipe, Template, TemplateConstraint, UiContext};
pub use template_data::{Language, ModuleTemplateData, ProjectTemplateData, TemplateData};
pub use validation::{EmptyQuery, ProjectQuery};
pub use widget::Widget;
