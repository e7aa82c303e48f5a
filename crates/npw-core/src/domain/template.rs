//! Template aggregate: a named, self-describing bundle of widgets plus the
//! recipe descriptor used to generate its output.
//!
//! Built via [`TemplateBuilder`], which is where cross-field configuration
//! rules are enforced. A template that survives `build()` is internally
//! consistent; downstream code never re-checks.

use crate::domain::catalog::ProjectType;
use crate::domain::constraint::Constraint;
use crate::domain::error::DomainError;
use crate::domain::parameter::Parameter;
use crate::domain::template_data::Language;
use crate::domain::widget::Widget;

/// Context a template may be offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiContext {
    NewProject,
    NewModule,
}

/// Environmental conditions under which a template may be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateConstraint {
    AndroidX,
    Kotlin,
    Swift,
}

/// What the generator should do with a finished template. The actual
/// generation bodies live behind the `ProjectGenerator` port; this is only
/// the dispatch descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    /// Sentinel for [`Template::none`]; running it is a generator error.
    None,
    CreateProject(ProjectType),
    CreateModule(ProjectType),
}

/// A project or module template.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub description: String,
    /// Address of an external website with more details about the template.
    pub documentation_url: Option<String>,
    pub widgets: Vec<Widget>,
    pub recipe: Recipe,
    pub ui_contexts: Vec<UiContext>,
    pub constraints: Vec<TemplateConstraint>,
}

impl Template {
    pub fn builder(name: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder::new(name)
    }

    /// The "no template" sentinel shown as the empty gallery entry when
    /// adding a module. Has no widgets and no recipe.
    pub fn none() -> Self {
        Self {
            name: "None".into(),
            description: "Creates a new empty project".into(),
            documentation_url: None,
            widgets: Vec::new(),
            recipe: Recipe::None,
            ui_contexts: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self.recipe, Recipe::None)
    }

    /// Derived projection: the parameters behind the widgets, in widget
    /// order. Chrome widgets contribute nothing.
    pub fn parameters(&self) -> Vec<Parameter> {
        self.widgets.iter().filter_map(Widget::parameter).collect()
    }

    pub fn supports(&self, ctx: UiContext) -> bool {
        self.ui_contexts.contains(&ctx)
    }

    /// Check the environmental gates for this template. Returns the first
    /// gating message, or `None` when the template can be rendered.
    ///
    /// The [`Template::none`] sentinel is acceptable only when adding a
    /// module; selecting it for a new project is reported as "not found".
    pub fn check_constraints(
        &self,
        is_new_module: bool,
        androidx_project: bool,
        android_language: Language,
        ios_language: Language,
    ) -> Option<String> {
        if self.is_none() {
            return if is_new_module {
                None
            } else {
                Some(format!("Template {} was not found", self.name))
            };
        }
        if self.constraints.contains(&TemplateConstraint::AndroidX) && !androidx_project {
            return Some(format!("Template {} requires an AndroidX project", self.name));
        }
        if self.constraints.contains(&TemplateConstraint::Kotlin)
            && android_language != Language::Kotlin
            && is_new_module
        {
            return Some(format!("Template {} requires Kotlin", self.name));
        }
        if self.constraints.contains(&TemplateConstraint::Swift)
            && ios_language != Language::Swift
            && is_new_module
        {
            return Some(format!("Template {} requires Swift", self.name));
        }
        None
    }
}

/// Builder for [`Template`].
///
/// `build()` rejects a string parameter declaring both `unique` and `exists`:
/// the pair can never be satisfied simultaneously, so the template would be
/// permanently invalid. Catching it here turns a latent dead end into an
/// immediate configuration error.
pub struct TemplateBuilder {
    name: String,
    description: Option<String>,
    documentation_url: Option<String>,
    widgets: Vec<Widget>,
    recipe: Option<Recipe>,
    ui_contexts: Vec<UiContext>,
    constraints: Vec<TemplateConstraint>,
}

impl TemplateBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            documentation_url: None,
            widgets: Vec::new(),
            recipe: None,
            ui_contexts: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Set the entire widget list at once (replaces any previous widgets).
    pub fn widgets(mut self, widgets: impl IntoIterator<Item = Widget>) -> Self {
        self.widgets = widgets.into_iter().collect();
        self
    }

    /// Add a single widget (accumulates).
    pub fn add_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn ui_contexts(mut self, contexts: impl IntoIterator<Item = UiContext>) -> Self {
        self.ui_contexts = contexts.into_iter().collect();
        self
    }

    pub fn constraints(
        mut self,
        constraints: impl IntoIterator<Item = TemplateConstraint>,
    ) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Consume builder and construct `Template`.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` if description/recipe not set
    /// - `InvalidTemplate` if the widget list is empty
    /// - `ConflictingConstraints` if a parameter declares unique + exists
    pub fn build(self) -> Result<Template, DomainError> {
        if self.widgets.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template widget list cannot be empty".into(),
            ));
        }

        for widget in &self.widgets {
            if let Some(p) = widget.string_parameter() {
                if p.has_constraint(Constraint::Unique) && p.has_constraint(Constraint::Exists) {
                    return Err(DomainError::ConflictingConstraints {
                        parameter: p.name.clone(),
                    });
                }
            }
        }

        Ok(Template {
            name: self.name,
            description: self
                .description
                .ok_or(DomainError::MissingRequiredField { field: "description" })?,
            documentation_url: self.documentation_url,
            widgets: self.widgets,
            recipe: self
                .recipe
                .ok_or(DomainError::MissingRequiredField { field: "recipe" })?,
            ui_contexts: self.ui_contexts,
            constraints: self.constraints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameter::StringParameter;

    fn text(name: &str, constraints: Vec<Constraint>) -> Widget {
        Widget::TextField(
            StringParameter::builder(name)
                .constraints(constraints)
                .build(),
        )
    }

    #[test]
    fn builder_rejects_unique_plus_exists() {
        let err = Template::builder("Broken")
            .description("A template that can never validate")
            .recipe(Recipe::CreateProject(ProjectType::App))
            .add_widget(text("Class name", vec![Constraint::Unique, Constraint::Exists]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::ConflictingConstraints { parameter: "Class name".into() }
        );
    }

    #[test]
    fn builder_requires_widgets_and_recipe() {
        let err = Template::builder("Empty")
            .description("No widgets")
            .recipe(Recipe::CreateProject(ProjectType::App))
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTemplate(_)));

        let err = Template::builder("No recipe")
            .description("Missing recipe")
            .add_widget(text("Project name", vec![Constraint::Nonempty]))
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "recipe" });
    }

    #[test]
    fn parameters_projection_skips_chrome() {
        let t = Template::builder("Demo")
            .description("d")
            .recipe(Recipe::CreateProject(ProjectType::App))
            .widgets([
                Widget::Label("Settings".into()),
                text("Project name", vec![Constraint::Nonempty]),
                Widget::Separator,
            ])
            .build()
            .unwrap();
        let names: Vec<_> = t.parameters().iter().map(|p| p.name().to_owned()).collect();
        assert_eq!(names, ["Project name"]);
    }

    #[test]
    fn none_sentinel_passes_only_for_modules() {
        let none = Template::none();
        assert!(none
            .check_constraints(true, true, Language::Kotlin, Language::Swift)
            .is_none());
        assert!(none
            .check_constraints(false, true, Language::Kotlin, Language::Swift)
            .is_some());
    }

    #[test]
    fn language_gates_apply_to_modules_only() {
        let t = Template::builder("Kotlin only")
            .description("d")
            .recipe(Recipe::CreateModule(ProjectType::Module))
            .constraints([TemplateConstraint::Kotlin])
            .add_widget(text("Project name", vec![Constraint::Nonempty]))
            .build()
            .unwrap();
        assert!(t
            .check_constraints(true, true, Language::Java, Language::Swift)
            .is_some());
        // Same mismatch, but in a new-project context the gate does not apply.
        assert!(t
            .check_constraints(false, true, Language::Java, Language::Swift)
            .is_none());
    }
}
