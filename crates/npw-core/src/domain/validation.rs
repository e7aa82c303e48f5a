//! The constraint validation engine.
//!
//! Validation is a pure function over a parameter's constraint list, the
//! proposed value, the ambient package name, and an environment probe
//! ([`ProjectQuery`], the driven port adapters implement). It returns data;
//! producing user-visible text is the last step and yields at most ONE
//! message per parameter.
//!
//! ## Algorithm
//!
//! 1. Empty value short-circuits: the only possible violation is `Nonempty`.
//! 2. The value is qualified with the ambient package when it has no dot;
//!    `Class` and `Package` syntax checks run on the qualified form.
//! 3. Each constraint contributes a syntax violation and/or an existence
//!    probe. "Exists" is the OR of every probe, plus membership in the
//!    related-values set (sibling parameters sharing a type constraint).
//! 4. `Unique` is violated when the value exists; `Exists` when it does not.

use crate::domain::constraint::Constraint;
use crate::domain::naming;
use crate::domain::parameter::{Parameter, StringParameter};

/// Constraints that make two parameters "related": a value held by one
/// counts as occupied when checking the other for uniqueness.
pub const TYPE_CONSTRAINTS: [Constraint; 4] = [
    Constraint::Class,
    Constraint::Package,
    Constraint::Module,
    Constraint::String,
];

/// Read-only environment probes used by existence checks.
///
/// `EmptyQuery` is the null object for the new-project flow, where there is
/// no open project to probe.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectQuery {
    /// Whether a module with this name exists in the open project.
    fn module_exists(&self, name: &str) -> bool;
    /// Whether a class with this fully qualified name exists.
    fn class_exists(&self, fq_name: &str) -> bool;
    /// Whether this package exists in the open project.
    fn package_exists(&self, name: &str) -> bool;
    /// Whether this filesystem path exists.
    fn path_exists(&self, path: &str) -> bool;
    /// Whether this path is the root of a usable Flutter SDK.
    fn is_sdk_root(&self, path: &str) -> bool;
}

/// Null object: no project open, nothing exists, no SDK found.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyQuery;

impl ProjectQuery for EmptyQuery {
    fn module_exists(&self, _name: &str) -> bool {
        false
    }
    fn class_exists(&self, _fq_name: &str) -> bool {
        false
    }
    fn package_exists(&self, _name: &str) -> bool {
        false
    }
    fn path_exists(&self, _path: &str) -> bool {
        false
    }
    fn is_sdk_root(&self, _path: &str) -> bool {
        false
    }
}

/// Validate `value` for this parameter and return the single error message
/// to display, or `None` when the value is acceptable.
///
/// When several constraints are violated at once the message is chosen by
/// [`Constraint::MESSAGE_ORDER`], not by declaration order, so e.g. a bad
/// class name is reported as such even if the value also collides.
pub fn validate(
    parameter: &StringParameter,
    query: &dyn ProjectQuery,
    package_name: Option<&str>,
    value: &str,
    related_values: &[String],
) -> Option<String> {
    let violations = validate_string_type(parameter, query, package_name, value, related_values);
    Constraint::MESSAGE_ORDER
        .iter()
        .find(|c| violations.contains(c))
        .map(|c| c.error_message(&parameter.name, value))
}

/// Validate `value` for this parameter and return every constraint it
/// violates.
pub fn validate_string_type(
    parameter: &StringParameter,
    query: &dyn ProjectQuery,
    package_name: Option<&str>,
    value: &str,
    related_values: &[String],
) -> Vec<Constraint> {
    let constraints = &parameter.constraints;

    if value.is_empty() {
        return if constraints.contains(&Constraint::Nonempty) {
            vec![Constraint::Nonempty]
        } else {
            vec![]
        };
    }

    let fq_name = match package_name {
        Some(pkg) if !value.contains('.') => format!("{pkg}.{value}"),
        _ => value.to_owned(),
    };

    let violates_syntax = |c: &Constraint| match c {
        // Handled by the short-circuit above.
        Constraint::Nonempty => false,
        Constraint::Class | Constraint::Package => {
            !naming::is_valid_fully_qualified_identifier(&fq_name)
        }
        Constraint::String => naming::resource_name_error(value).is_some(),
        Constraint::Sdk => !query.is_sdk_root(value),
        // May only violate uniqueness.
        Constraint::Module => false,
        // Decided from the aggregate existence check below.
        Constraint::Unique | Constraint::Exists => false,
        Constraint::Project => !naming::is_valid_dart_package_name(value),
    };

    let check_existence = |c: &Constraint| match c {
        Constraint::Class => query.class_exists(&fq_name),
        Constraint::Package => query.package_exists(value),
        Constraint::Module => query.module_exists(value),
        Constraint::Sdk => query.is_sdk_root(value),
        Constraint::Nonempty
        | Constraint::String
        | Constraint::Unique
        | Constraint::Exists
        | Constraint::Project => false,
    };

    let exists = constraints.iter().any(check_existence)
        || related_values.iter().any(|v| v == value);

    let mut violations: Vec<Constraint> =
        constraints.iter().copied().filter(violates_syntax).collect();
    if constraints.contains(&Constraint::Unique) && exists {
        violations.push(Constraint::Unique);
    }
    if constraints.contains(&Constraint::Exists) && !exists {
        violations.push(Constraint::Exists);
    }
    violations
}

/// Whether `value` satisfies this parameter's uniqueness requirement. Always
/// true for parameters without the `Unique` constraint.
pub fn uniqueness_satisfied(
    parameter: &StringParameter,
    query: &dyn ProjectQuery,
    package_name: Option<&str>,
    value: &str,
    related_values: &[String],
) -> bool {
    !validate_string_type(parameter, query, package_name, value, related_values)
        .contains(&Constraint::Unique)
}

/// Whether two distinct string parameters are related: their constraint
/// lists share at least one type constraint, so their values compete for
/// the same namespace.
pub fn is_related(a: &Parameter, b: &Parameter) -> bool {
    let (Some(a), Some(b)) = (a.as_string(), b.as_string()) else {
        return false;
    };
    if a.name == b.name {
        return false;
    }
    TYPE_CONSTRAINTS
        .iter()
        .any(|c| a.constraints.contains(c) && b.constraints.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameter::BooleanParameter;

    fn param(name: &str, constraints: Vec<Constraint>) -> StringParameter {
        StringParameter::builder(name).constraints(constraints).build()
    }

    #[test]
    fn empty_value_reports_only_nonempty() {
        let p = param("Class name", vec![Constraint::Nonempty, Constraint::Class]);
        let violations = validate_string_type(&p, &EmptyQuery, None, "", &[]);
        assert_eq!(violations, [Constraint::Nonempty]);

        let msg = validate(&p, &EmptyQuery, None, "", &[]);
        assert_eq!(msg.as_deref(), Some("Please specify Class name"));
    }

    #[test]
    fn empty_value_without_nonempty_is_fine() {
        let p = param("Optional", vec![Constraint::Class]);
        assert!(validate(&p, &EmptyQuery, None, "", &[]).is_none());
    }

    #[test]
    fn unqualified_class_name_is_checked_against_the_ambient_package() {
        let p = param("Class name", vec![Constraint::Class]);
        // "MainView" alone is not fully qualified, but the package prefix
        // makes it so.
        assert!(validate(&p, &EmptyQuery, Some("com.example"), "MainView", &[]).is_none());
        assert!(validate(&p, &EmptyQuery, None, "MainView", &[]).is_some());
    }

    #[test]
    fn syntax_message_wins_over_uniqueness() {
        let p = param("Class name", vec![Constraint::Class, Constraint::Unique]);
        let mut query = MockProjectQuery::new();
        query.expect_class_exists().return_const(true);
        query.expect_is_sdk_root().return_const(false);

        // "9bad" is both syntactically invalid and already taken. The class
        // message must be the one reported.
        let msg = validate(&p, &query, Some("com.example"), "9bad", &[]);
        assert_eq!(msg.as_deref(), Some("Class name is not set to a valid class name"));
    }

    #[test]
    fn unique_fires_when_the_value_exists() {
        let p = param("Module name", vec![Constraint::Module, Constraint::Unique]);
        let mut query = MockProjectQuery::new();
        query.expect_module_exists().returning(|name| name == "payments");

        assert_eq!(
            validate(&p, &query, None, "payments", &[]).as_deref(),
            Some("Module name must be unique")
        );
        assert!(validate(&p, &query, None, "billing", &[]).is_none());
    }

    #[test]
    fn exists_fires_when_the_value_does_not() {
        let p = param("Base module", vec![Constraint::Module, Constraint::Exists]);
        let mut query = MockProjectQuery::new();
        query.expect_module_exists().returning(|name| name == "app");

        assert!(validate(&p, &query, None, "app", &[]).is_none());
        assert_eq!(
            validate(&p, &query, None, "missing", &[]).as_deref(),
            Some("Base module must already exist")
        );
    }

    #[test]
    fn related_values_count_as_existing() {
        let p = param("Class name", vec![Constraint::Class, Constraint::Unique]);
        let related = vec!["MainView".to_owned()];
        assert!(!uniqueness_satisfied(
            &p,
            &EmptyQuery,
            Some("com.example"),
            "MainView",
            &related
        ));
        assert!(uniqueness_satisfied(
            &p,
            &EmptyQuery,
            Some("com.example"),
            "OtherView",
            &related
        ));
    }

    #[test]
    fn sdk_constraint_uses_the_probe_both_ways() {
        let p = param("Flutter SDK path", vec![Constraint::Sdk]);
        let mut query = MockProjectQuery::new();
        query.expect_is_sdk_root().returning(|path| path == "/opt/flutter");

        assert!(validate(&p, &query, None, "/opt/flutter", &[]).is_none());
        assert_eq!(
            validate(&p, &query, None, "/tmp", &[]).as_deref(),
            Some("Flutter SDK path must be a path to a Flutter SDK")
        );
    }

    #[test]
    fn project_constraint_enforces_dart_package_rules() {
        let p = param("Project name", vec![Constraint::Nonempty, Constraint::Project]);
        assert!(validate(&p, &EmptyQuery, None, "my_app", &[]).is_none());
        assert_eq!(
            validate(&p, &EmptyQuery, None, "MyApp", &[]).as_deref(),
            Some("Project name is not set to a valid Dart project name")
        );
    }

    #[test]
    fn relatedness_requires_a_shared_type_constraint() {
        let a = Parameter::String(param("A", vec![Constraint::Nonempty, Constraint::Package]));
        let b = Parameter::String(param("B", vec![Constraint::Package, Constraint::Unique]));
        let c = Parameter::String(param("C", vec![Constraint::Class]));
        let d = Parameter::Boolean(BooleanParameter::builder("D").build());

        assert!(is_related(&a, &b));
        assert!(!is_related(&a, &c));
        assert!(!is_related(&a, &d));
        assert!(!is_related(&a, &a));
    }
}
