//! The template parameter model.
//!
//! A [`Parameter`] is a named, typed, user-editable value. String parameters
//! carry validation [`Constraint`]s and an optional suggestion function;
//! boolean parameters are plain toggles. Visibility and enablement are never
//! stored — they are recomputed from the ambient [`WizardContext`] on every
//! evaluation pass.
//!
//! # Context injection
//!
//! Predicates and suggestions receive their context explicitly at call time
//! rather than reading it from a field injected after construction. This
//! removes the "has context been set yet?" temporal coupling: a parameter is
//! fully usable the moment its builder returns.

use std::fmt;
use std::sync::Arc;

use crate::domain::constraint::Constraint;

/// Ambient wizard state read by visibility/enablement predicates and
/// suggestion functions. Rebuilt whenever the active template changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardContext {
    /// The package name currently held by the wizard model.
    pub package_name: String,
    /// Whether the wizard is adding a module to an existing project rather
    /// than creating a whole new one.
    pub is_new_module: bool,
    /// Organization prefix used to compose suggested package names,
    /// e.g. `com.example`.
    pub base_package: String,
}

impl WizardContext {
    pub fn new(
        package_name: impl Into<String>,
        is_new_module: bool,
        base_package: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            is_new_module,
            base_package: base_package.into(),
        }
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::new("", false, "com.example")
    }
}

/// Read access handed to suggestion functions: the wizard context plus the
/// current values of sibling parameters. Suggestions are often calculated
/// from another parameter, e.g. a `flutter_app` project name derived from a
/// `FlutterApp` class name.
pub struct SuggestContext<'a> {
    pub wizard: &'a WizardContext,
    siblings: &'a [(String, ParamValue)],
}

impl<'a> SuggestContext<'a> {
    pub fn new(wizard: &'a WizardContext, siblings: &'a [(String, ParamValue)]) -> Self {
        Self { wizard, siblings }
    }

    /// The current string value of the sibling parameter with this name.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.siblings
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_str())
    }
}

/// Visibility/enablement predicate evaluated against the wizard context.
pub type Predicate = Arc<dyn Fn(&WizardContext) -> bool + Send + Sync>;

/// Suggestion function; `None` means "no suggestion, keep the default".
pub type Suggestion = Arc<dyn Fn(&SuggestContext<'_>) -> Option<String> + Send + Sync>;

fn always(_: &WizardContext) -> bool {
    true
}

/// A parameter's current value, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Str(_) => None,
            Self::Bool(b) => Some(*b),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

// ============================================================================
// String parameter
// ============================================================================

/// String parameter. Rendered as a text field (or package/SDK selector).
///
/// The empty string is the "unset" sentinel; `value` is never absent.
#[derive(Clone)]
pub struct StringParameter {
    pub name: String,
    pub help: Option<String>,
    pub default_value: String,
    pub value: String,
    pub constraints: Vec<Constraint>,
    visible: Predicate,
    enabled: Predicate,
    suggest: Option<Suggestion>,
}

impl StringParameter {
    pub fn builder(name: impl Into<String>) -> StringParameterBuilder {
        StringParameterBuilder::new(name)
    }

    pub fn visible(&self, ctx: &WizardContext) -> bool {
        (self.visible)(ctx)
    }

    pub fn enabled(&self, ctx: &WizardContext) -> bool {
        (self.enabled)(ctx)
    }

    /// Value suggested by the wizard, often calculated from sibling
    /// parameters. `None` falls back to the current value.
    pub fn suggest(&self, ctx: &SuggestContext<'_>) -> Option<String> {
        self.suggest.as_ref().and_then(|f| f(ctx))
    }

    pub fn has_constraint(&self, c: Constraint) -> bool {
        self.constraints.contains(&c)
    }
}

impl fmt::Debug for StringParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringParameter")
            .field("name", &self.name)
            .field("default_value", &self.default_value)
            .field("value", &self.value)
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}

/// Builder for [`StringParameter`].
pub struct StringParameterBuilder {
    name: String,
    help: Option<String>,
    default_value: String,
    constraints: Vec<Constraint>,
    visible: Predicate,
    enabled: Predicate,
    suggest: Option<Suggestion>,
}

impl StringParameterBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
            default_value: String::new(),
            constraints: Vec::new(),
            visible: Arc::new(always),
            enabled: Arc::new(always),
            suggest: None,
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    pub fn visible(
        mut self,
        predicate: impl Fn(&WizardContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.visible = Arc::new(predicate);
        self
    }

    pub fn enabled(
        mut self,
        predicate: impl Fn(&WizardContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.enabled = Arc::new(predicate);
        self
    }

    pub fn suggest(
        mut self,
        f: impl Fn(&SuggestContext<'_>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.suggest = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> StringParameter {
        StringParameter {
            name: self.name,
            help: self.help,
            value: self.default_value.clone(),
            default_value: self.default_value,
            constraints: self.constraints,
            visible: self.visible,
            enabled: self.enabled,
            suggest: self.suggest,
        }
    }
}

// ============================================================================
// Boolean parameter
// ============================================================================

/// Boolean parameter. Rendered as a checkbox.
#[derive(Clone)]
pub struct BooleanParameter {
    pub name: String,
    pub help: Option<String>,
    pub default_value: bool,
    pub value: bool,
    visible: Predicate,
    enabled: Predicate,
}

impl BooleanParameter {
    pub fn builder(name: impl Into<String>) -> BooleanParameterBuilder {
        BooleanParameterBuilder::new(name)
    }

    pub fn visible(&self, ctx: &WizardContext) -> bool {
        (self.visible)(ctx)
    }

    pub fn enabled(&self, ctx: &WizardContext) -> bool {
        (self.enabled)(ctx)
    }
}

impl fmt::Debug for BooleanParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanParameter")
            .field("name", &self.name)
            .field("default_value", &self.default_value)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BooleanParameter`].
pub struct BooleanParameterBuilder {
    name: String,
    help: Option<String>,
    default_value: bool,
    visible: Predicate,
    enabled: Predicate,
}

impl BooleanParameterBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
            default_value: false,
            visible: Arc::new(always),
            enabled: Arc::new(always),
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn default_value(mut self, value: bool) -> Self {
        self.default_value = value;
        self
    }

    pub fn visible(
        mut self,
        predicate: impl Fn(&WizardContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.visible = Arc::new(predicate);
        self
    }

    pub fn enabled(
        mut self,
        predicate: impl Fn(&WizardContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.enabled = Arc::new(predicate);
        self
    }

    pub fn build(self) -> BooleanParameter {
        BooleanParameter {
            name: self.name,
            help: self.help,
            value: self.default_value,
            default_value: self.default_value,
            visible: self.visible,
            enabled: self.enabled,
        }
    }
}

// ============================================================================
// The tagged union
// ============================================================================

/// A template parameter: either a string or a boolean.
///
/// The two integration points that care about the distinction (row creation
/// and validation) dispatch with exhaustive matches, so adding a kind is a
/// compile-enforced change.
#[derive(Debug, Clone)]
pub enum Parameter {
    String(StringParameter),
    Boolean(BooleanParameter),
}

impl Parameter {
    pub fn name(&self) -> &str {
        match self {
            Self::String(p) => &p.name,
            Self::Boolean(p) => &p.name,
        }
    }

    pub fn help(&self) -> Option<&str> {
        match self {
            Self::String(p) => p.help.as_deref(),
            Self::Boolean(p) => p.help.as_deref(),
        }
    }

    pub fn visible(&self, ctx: &WizardContext) -> bool {
        match self {
            Self::String(p) => p.visible(ctx),
            Self::Boolean(p) => p.visible(ctx),
        }
    }

    pub fn enabled(&self, ctx: &WizardContext) -> bool {
        match self {
            Self::String(p) => p.enabled(ctx),
            Self::Boolean(p) => p.enabled(ctx),
        }
    }

    /// Parameters that are disabled or hidden are skipped by validation but
    /// still filled with data and handed to the recipe.
    pub fn is_visible_and_enabled(&self, ctx: &WizardContext) -> bool {
        self.visible(ctx) && self.enabled(ctx)
    }

    pub fn value(&self) -> ParamValue {
        match self {
            Self::String(p) => ParamValue::Str(p.value.clone()),
            Self::Boolean(p) => ParamValue::Bool(p.value),
        }
    }

    /// Push a value into the parameter. The kinds must agree.
    pub fn set_value(&mut self, value: ParamValue) -> Result<(), crate::domain::DomainError> {
        match (self, value) {
            (Self::String(p), ParamValue::Str(s)) => {
                p.value = s;
                Ok(())
            }
            (Self::Boolean(p), ParamValue::Bool(b)) => {
                p.value = b;
                Ok(())
            }
            (p, v) => Err(crate::domain::DomainError::ValueKindMismatch {
                parameter: p.name().to_owned(),
                expected: match v {
                    ParamValue::Str(_) => "boolean",
                    ParamValue::Bool(_) => "string",
                },
            }),
        }
    }

    pub fn as_string(&self) -> Option<&StringParameter> {
        match self {
            Self::String(p) => Some(p),
            Self::Boolean(_) => None,
        }
    }
}

impl From<StringParameter> for Parameter {
    fn from(p: StringParameter) -> Self {
        Self::String(p)
    }
}

impl From<BooleanParameter> for Parameter {
    fn from(p: BooleanParameter) -> Self {
        Self::Boolean(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_builder_seeds_value_from_default() {
        let p = StringParameter::builder("Project name")
            .default_value("flutter_app")
            .build();
        assert_eq!(p.value, "flutter_app");
        assert_eq!(p.default_value, "flutter_app");
    }

    #[test]
    fn predicates_default_to_true() {
        let ctx = WizardContext::default();
        let p = Parameter::from(BooleanParameter::builder("Offline").build());
        assert!(p.visible(&ctx));
        assert!(p.enabled(&ctx));
        assert!(p.is_visible_and_enabled(&ctx));
    }

    #[test]
    fn visibility_reads_the_context() {
        let p = Parameter::from(
            BooleanParameter::builder("Use Kotlin")
                .visible(|w| !w.is_new_module)
                .build(),
        );
        assert!(p.visible(&WizardContext::new("", false, "com.example")));
        assert!(!p.visible(&WizardContext::new("", true, "com.example")));
    }

    #[test]
    fn suggestion_reads_sibling_values() {
        let wizard = WizardContext::default();
        let siblings = vec![("Class name".to_owned(), ParamValue::from("FlutterApp"))];
        let ctx = SuggestContext::new(&wizard, &siblings);

        let p = StringParameter::builder("Project name")
            .suggest(|ctx| {
                ctx.value_of("Class name")
                    .map(crate::domain::naming::camel_case_to_underlines)
            })
            .build();
        assert_eq!(p.suggest(&ctx).as_deref(), Some("flutter_app"));
    }

    #[test]
    fn set_value_rejects_kind_mismatch() {
        let mut p = Parameter::from(StringParameter::builder("Project name").build());
        assert!(p.set_value(ParamValue::Bool(true)).is_err());
        assert!(p.set_value(ParamValue::from("ok")).is_ok());
        assert_eq!(p.value().as_str(), Some("ok"));
    }
}
