//! UI-agnostic widget descriptors.
//!
//! A template describes its input form as an ordered list of widgets. Most
//! widgets wrap exactly one [`Parameter`]; `Label` and `Separator` are pure
//! chrome and carry none. The orchestrator and any front end dispatch on the
//! variant with exhaustive matches, so a new widget kind is a compile-enforced
//! change at every integration point.

use crate::domain::parameter::{BooleanParameter, Parameter, StringParameter};

/// One element of a template's input form.
#[derive(Debug, Clone)]
pub enum Widget {
    /// An ordinary text field.
    TextField(StringParameter),
    /// Package selection. Rendered with history (recent packages) where the
    /// front end supports it; behaves like a text field otherwise.
    PackageName(StringParameter),
    /// Flutter SDK path selection.
    SdkSelector(StringParameter),
    /// An ordinary checkbox.
    Checkbox(BooleanParameter),
    /// Static text. No parameter.
    Label(String),
    /// Horizontal separator. No parameter, no functionality.
    Separator,
}

impl Widget {
    /// The parameter behind this widget, if it has one.
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            Self::TextField(p) | Self::PackageName(p) | Self::SdkSelector(p) => {
                Some(Parameter::String(p.clone()))
            }
            Self::Checkbox(p) => Some(Parameter::Boolean(p.clone())),
            Self::Label(_) | Self::Separator => None,
        }
    }

    /// The string parameter behind this widget, for the three text-like kinds.
    pub fn string_parameter(&self) -> Option<&StringParameter> {
        match self {
            Self::TextField(p) | Self::PackageName(p) | Self::SdkSelector(p) => Some(p),
            _ => None,
        }
    }

    /// Whether this widget's value participates in package-recents history.
    pub fn wants_recents(&self) -> bool {
        matches!(self, Self::PackageName(_))
    }
}
