//! Validation constraints attachable to string parameters.
//!
//! # Design
//!
//! `Constraint` is a pure value type — `Copy`, equality-by-value, no identity.
//! It holds NO checking logic. The actual syntax predicates and existence
//! probes live in `validation.rs`; this file's only job is to define the
//! closed set of rules and the error message each one produces.

use std::fmt;

use crate::domain::naming;

/// One atomic validation rule attached to a string parameter.
///
/// Constraints are typically combined into a small list, e.g.
/// `[Nonempty, Class, Unique]` for a generated class-name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// The value must be unique: it must NOT designate an entity that
    /// already exists (on disk, in the project index, or in a sibling field).
    Unique,
    /// The value must already exist. Mutually exclusive with [`Unique`] —
    /// declaring both on one parameter is a configuration error, rejected
    /// at template construction time.
    ///
    /// [`Unique`]: Constraint::Unique
    Exists,
    /// The value must not be empty.
    Nonempty,
    /// The value must be a valid class name.
    Class,
    /// The value must be a valid package name.
    Package,
    /// The value must be a valid module name.
    Module,
    /// The value must be a valid string resource name.
    String,
    /// The value must be a path to a valid Flutter SDK root.
    Sdk,
    /// The value must be a valid Dart package name (lower_case_with_underscores).
    Project,
}

impl Constraint {
    /// Fixed reporting order. When several constraints are violated at once,
    /// the first one in this order decides the single message shown to the
    /// user. Tests depend on this exact sequence.
    pub const MESSAGE_ORDER: [Constraint; 9] = [
        Constraint::Nonempty,
        Constraint::Class,
        Constraint::Package,
        Constraint::Module,
        Constraint::String,
        Constraint::Unique,
        Constraint::Exists,
        Constraint::Sdk,
        Constraint::Project,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Exists => "exists",
            Self::Nonempty => "nonempty",
            Self::Class => "class",
            Self::Package => "package",
            Self::Module => "module",
            Self::String => "string",
            Self::Sdk => "sdk",
            Self::Project => "project",
        }
    }

    /// The user-facing message for a violation of this constraint.
    ///
    /// `name` is the parameter's display name, `value` the offending input.
    /// Only [`Constraint::String`] inspects the value: it folds the
    /// resource-name checker's own error text into the message.
    pub fn error_message(&self, name: &str, value: &str) -> String {
        match self {
            Self::Nonempty => format!("Please specify {name}"),
            Self::Class => format!("{name} is not set to a valid class name"),
            Self::Package => format!("{name} is not set to a valid package name"),
            Self::Module => format!("{name} is not set to a valid module name"),
            Self::String => match naming::resource_name_error(value) {
                Some(sub) => format!("{name} is not set to a valid resource name: {sub}"),
                None => format!(
                    "Unknown resource name error (name: {name}). Constraint string is violated"
                ),
            },
            Self::Unique => format!("{name} must be unique"),
            Self::Exists => format!("{name} must already exist"),
            Self::Sdk => format!("{name} must be a path to a Flutter SDK"),
            Self::Project => format!("{name} is not set to a valid Dart project name"),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
