//! The built-in template catalog.
//!
//! Assembles the project-level and module-level templates for every Flutter
//! archetype, wires the class-name ⇆ project-name suggestion pair, and maps
//! a finished wizard's values into the data records the generator consumes.

use crate::domain::constraint::Constraint;
use crate::domain::error::DomainError;
use crate::domain::naming;
use crate::domain::parameter::{BooleanParameter, ParamValue, StringParameter};
use crate::domain::template::{Recipe, Template, UiContext};
use crate::domain::template_data::{ModuleTemplateData, ProjectTemplateData, TemplateData};
use crate::domain::widget::Widget;

/// Canonical display names of the catalog's parameters. The orchestrator
/// locates the project-name and package-name rows by these labels, and
/// [`resolve_template_data`] reads every collected value through them.
pub mod labels {
    pub const CLASS_NAME: &str = "Class name";
    pub const PROJECT_NAME: &str = "Project name";
    pub const FLUTTER_SDK: &str = "Flutter SDK path";
    pub const LOCATION: &str = "Project location";
    pub const PACKAGE_NAME: &str = "Package name";
    pub const USE_KOTLIN: &str = "Use Kotlin for Android code";
    pub const USE_SWIFT: &str = "Use Swift for iOS code";
    pub const USE_LEGACY_LIBRARIES: &str = "Use legacy android.support libraries";
    pub const OFFLINE: &str = "Create project offline";
}

/// The Flutter archetypes the wizard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    App,
    Plugin,
    Package,
    Module,
    /// Import an existing module into a project. Module granularity only.
    Import,
}

impl ProjectType {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::App => "Application",
            Self::Plugin => "Plugin",
            Self::Package => "Package",
            Self::Module => "Module",
            Self::Import => "Import module",
        }
    }

    /// The `flutter create` argument for this archetype.
    pub const fn arg(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Plugin => "plugin",
            Self::Package => "package",
            Self::Module | Self::Import => "module",
        }
    }

    /// Extra description text appended after the lowercase title.
    pub const fn aux(&self) -> &'static str {
        match self {
            Self::App | Self::Import => "",
            Self::Plugin => " with an example app",
            Self::Package => " of re-usable Dart code",
            Self::Module => " for add-to-app projects",
        }
    }

    /// Whether this archetype generates platform shells (and so shows the
    /// package-name and language toggles).
    const fn has_package(&self) -> bool {
        matches!(self, Self::App | Self::Module | Self::Plugin)
    }

    const fn has_platform_languages(&self) -> bool {
        matches!(self, Self::App | Self::Plugin)
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Build the "new project" template for an archetype. `base_package` seeds
/// the package parameter's default and suggestion.
pub fn project_template(ty: ProjectType, base_package: &str) -> Result<Template, DomainError> {
    build_template(ty, base_package, UiContext::NewProject)
}

/// Build the "new module" variant: same parameters, module recipe, and a
/// package row that records recents history.
pub fn module_template(ty: ProjectType, base_package: &str) -> Result<Template, DomainError> {
    build_template(ty, base_package, UiContext::NewModule)
}

fn build_template(
    ty: ProjectType,
    base_package: &str,
    ctx: UiContext,
) -> Result<Template, DomainError> {
    let class_suffix = naming::extract_class_name(ty.arg()).unwrap_or_default();

    let class_name = StringParameter::builder(labels::CLASS_NAME)
        .constraints([Constraint::Nonempty, Constraint::Class, Constraint::Unique])
        .default_value(format!("Flutter{class_suffix}"))
        .suggest(|ctx| {
            ctx.value_of(labels::PROJECT_NAME)
                .and_then(naming::extract_class_name)
        })
        .visible(|_| false)
        .build();

    let project_name = StringParameter::builder(labels::PROJECT_NAME)
        .help(format!(
            "Creates a new Flutter {}{}",
            ty.title().to_lowercase(),
            ty.aux()
        ))
        .constraints([Constraint::Nonempty, Constraint::Project])
        .default_value(format!("flutter_{}", ty.arg()))
        .suggest(|ctx| {
            ctx.value_of(labels::CLASS_NAME)
                .map(naming::camel_case_to_underlines)
        })
        .build();

    let sdk = StringParameter::builder(labels::FLUTTER_SDK)
        .help("The folder that contains the Flutter SDK")
        .constraints([Constraint::Nonempty, Constraint::Sdk])
        .build();

    let location = StringParameter::builder(labels::LOCATION)
        .help("The folder the new project is created in")
        .constraints([Constraint::Nonempty])
        .build();

    let package = StringParameter::builder(labels::PACKAGE_NAME)
        .help("Identifies the generated Android and iOS shells")
        .constraints([Constraint::Nonempty])
        .default_value(base_package)
        .suggest(|ctx| Some(ctx.wizard.base_package.clone()))
        .visible(move |_| ty.has_package())
        .build();

    let use_kotlin = BooleanParameter::builder(labels::USE_KOTLIN)
        .default_value(true)
        .visible(move |_| ty.has_platform_languages())
        .build();

    let use_swift = BooleanParameter::builder(labels::USE_SWIFT)
        .default_value(true)
        .visible(move |_| ty.has_platform_languages())
        .build();

    let use_legacy = BooleanParameter::builder(labels::USE_LEGACY_LIBRARIES)
        .default_value(false)
        .visible(move |_| ty.has_package())
        .build();

    let offline = BooleanParameter::builder(labels::OFFLINE)
        .help("Create the project without downloading package dependencies")
        .default_value(false)
        .build();

    let package_widget = match ctx {
        UiContext::NewProject => Widget::TextField(package),
        UiContext::NewModule => Widget::PackageName(package),
    };

    let (name, recipe) = match ctx {
        UiContext::NewProject => (
            format!("Flutter {}", ty.title()),
            Recipe::CreateProject(ty),
        ),
        UiContext::NewModule => (
            format!("Flutter {}", ty.title()),
            Recipe::CreateModule(ty),
        ),
    };

    Template::builder(name)
        .description(format!(
            "Creates a new Flutter {}{}.",
            ty.title().to_lowercase(),
            ty.aux()
        ))
        .documentation_url("https://docs.flutter.dev/get-started")
        .ui_contexts([ctx])
        .recipe(recipe)
        .widgets([
            Widget::TextField(project_name),
            Widget::SdkSelector(sdk),
            Widget::TextField(location),
            package_widget,
            Widget::Checkbox(use_kotlin),
            Widget::Checkbox(use_swift),
            Widget::Checkbox(use_legacy),
            Widget::Checkbox(offline),
            // Not shown; exists to drive the project-name suggestion and
            // uniqueness deduplication.
            Widget::TextField(class_name),
        ])
        .build()
}

/// The gallery shown when creating a new project.
pub fn project_templates(base_package: &str) -> Result<Vec<Template>, DomainError> {
    [
        ProjectType::App,
        ProjectType::Module,
        ProjectType::Package,
        ProjectType::Plugin,
    ]
    .into_iter()
    .map(|ty| project_template(ty, base_package))
    .collect()
}

/// The gallery shown when adding a module to an existing project, led by
/// the empty [`Template::none`] entry.
pub fn module_templates(base_package: &str) -> Result<Vec<Template>, DomainError> {
    let mut out = vec![Template::none()];
    for ty in [
        ProjectType::App,
        ProjectType::Module,
        ProjectType::Package,
        ProjectType::Plugin,
        ProjectType::Import,
    ] {
        out.push(module_template(ty, base_package)?);
    }
    Ok(out)
}

/// Pick the gallery entry selected by default: the entry whose name matches
/// `empty_item_label` when present, otherwise the first entry that is a real
/// template (not the `None` sentinel).
pub fn default_selected_template_index(
    entries: &[Template],
    empty_item_label: &str,
) -> Result<usize, DomainError> {
    entries
        .iter()
        .position(|t| t.name == empty_item_label)
        .or_else(|| entries.iter().position(|t| !t.is_none()))
        .ok_or(DomainError::NoValidTemplate)
}

/// Map a finished wizard's parameter values into the generator payload.
///
/// `lookup` resolves a catalog label to the committed value; the template's
/// name is used for error reporting only.
pub fn resolve_template_data(
    template: &Template,
    lookup: &dyn Fn(&str) -> Option<ParamValue>,
) -> Result<TemplateData, DomainError> {
    let string = |label: &'static str| -> Result<String, DomainError> {
        match lookup(label) {
            Some(ParamValue::Str(s)) => Ok(s),
            Some(ParamValue::Bool(_)) => Err(DomainError::ValueKindMismatch {
                parameter: label.to_owned(),
                expected: "string",
            }),
            None => Err(DomainError::UnknownParameter {
                name: label.to_owned(),
                template: template.name.clone(),
            }),
        }
    };
    let boolean = |label: &'static str| -> Result<bool, DomainError> {
        match lookup(label) {
            Some(ParamValue::Bool(b)) => Ok(b),
            Some(ParamValue::Str(_)) => Err(DomainError::ValueKindMismatch {
                parameter: label.to_owned(),
                expected: "boolean",
            }),
            None => Err(DomainError::UnknownParameter {
                name: label.to_owned(),
                template: template.name.clone(),
            }),
        }
    };

    let is_new_project = matches!(template.recipe, Recipe::CreateProject(_));
    let project_name = string(labels::PROJECT_NAME)?;
    let location = string(labels::LOCATION)?;

    let project = ProjectTemplateData {
        project_name: project_name.clone(),
        sdk_path: string(labels::FLUTTER_SDK)?.into(),
        project_path: location.clone().into(),
        package_name: string(labels::PACKAGE_NAME)?,
        use_kotlin: boolean(labels::USE_KOTLIN)?,
        use_swift: boolean(labels::USE_SWIFT)?,
        androidx_support: !boolean(labels::USE_LEGACY_LIBRARIES)?,
        is_offline: boolean(labels::OFFLINE)?,
        is_new_project,
    };

    Ok(match template.recipe {
        Recipe::CreateModule(_) => TemplateData::Module(ModuleTemplateData {
            project,
            name: project_name,
            path: location,
        }),
        _ => TemplateData::Project(project),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameter::{SuggestContext, WizardContext};

    #[test]
    fn every_archetype_builds() {
        for ty in [
            ProjectType::App,
            ProjectType::Plugin,
            ProjectType::Package,
            ProjectType::Module,
            ProjectType::Import,
        ] {
            assert!(project_template(ty, "com.example").is_ok());
            assert!(module_template(ty, "com.example").is_ok());
        }
    }

    #[test]
    fn app_template_names_and_defaults() {
        let t = project_template(ProjectType::App, "com.example").unwrap();
        assert_eq!(t.name, "Flutter Application");
        assert_eq!(t.description, "Creates a new Flutter application.");

        let params = t.parameters();
        let project = params
            .iter()
            .find(|p| p.name() == labels::PROJECT_NAME)
            .and_then(|p| p.as_string().cloned())
            .unwrap();
        assert_eq!(project.default_value, "flutter_app");

        let class = params
            .iter()
            .find(|p| p.name() == labels::CLASS_NAME)
            .and_then(|p| p.as_string().cloned())
            .unwrap();
        assert_eq!(class.default_value, "FlutterApp");
        assert!(!class.visible(&WizardContext::default()));
    }

    #[test]
    fn class_and_project_names_suggest_each_other() {
        let t = project_template(ProjectType::App, "com.example").unwrap();
        let wizard = WizardContext::default();
        let siblings = vec![
            (labels::PROJECT_NAME.to_owned(), ParamValue::from("my_shop")),
            (labels::CLASS_NAME.to_owned(), ParamValue::from("MyShop")),
        ];
        let ctx = SuggestContext::new(&wizard, &siblings);

        let params = t.parameters();
        let class = params
            .iter()
            .find(|p| p.name() == labels::CLASS_NAME)
            .and_then(|p| p.as_string().cloned())
            .unwrap();
        assert_eq!(class.suggest(&ctx).as_deref(), Some("MyShop"));

        let project = params
            .iter()
            .find(|p| p.name() == labels::PROJECT_NAME)
            .and_then(|p| p.as_string().cloned())
            .unwrap();
        assert_eq!(project.suggest(&ctx).as_deref(), Some("my_shop"));
    }

    #[test]
    fn package_visibility_tracks_the_archetype() {
        let ctx = WizardContext::default();
        for (ty, expected) in [
            (ProjectType::App, true),
            (ProjectType::Module, true),
            (ProjectType::Plugin, true),
            (ProjectType::Package, false),
            (ProjectType::Import, false),
        ] {
            let t = project_template(ty, "com.example").unwrap();
            let visible = t
                .parameters()
                .iter()
                .find(|p| p.name() == labels::PACKAGE_NAME)
                .map(|p| p.visible(&ctx))
                .unwrap();
            assert_eq!(visible, expected, "package visibility for {ty:?}");
        }
    }

    #[test]
    fn module_gallery_leads_with_the_empty_entry() {
        let gallery = module_templates("com.example").unwrap();
        assert!(gallery[0].is_none());
        assert_eq!(gallery.len(), 6);
    }

    #[test]
    fn default_selection_prefers_the_named_entry() {
        let gallery = module_templates("com.example").unwrap();
        let by_label =
            default_selected_template_index(&gallery, "Flutter Package").unwrap();
        assert_eq!(gallery[by_label].name, "Flutter Package");

        // No entry carries the label; the first real template wins over the
        // leading None sentinel.
        let fallback = default_selected_template_index(&gallery, "Empty Activity").unwrap();
        assert_eq!(fallback, 1);

        let only_none = vec![Template::none()];
        assert_eq!(
            default_selected_template_index(&only_none, "Empty Activity"),
            Err(DomainError::NoValidTemplate)
        );
    }

    #[test]
    fn resolve_builds_project_and_module_payloads() {
        let t = project_template(ProjectType::App, "com.example").unwrap();
        let lookup = |label: &str| -> Option<ParamValue> {
            Some(match label {
                labels::PROJECT_NAME => ParamValue::from("my_shop"),
                labels::FLUTTER_SDK => ParamValue::from("/opt/flutter"),
                labels::LOCATION => ParamValue::from("/work"),
                labels::PACKAGE_NAME => ParamValue::from("com.example.my_shop"),
                labels::USE_KOTLIN => ParamValue::Bool(true),
                labels::USE_SWIFT => ParamValue::Bool(false),
                labels::USE_LEGACY_LIBRARIES => ParamValue::Bool(false),
                labels::OFFLINE => ParamValue::Bool(true),
                _ => return None,
            })
        };

        let data = resolve_template_data(&t, &lookup).unwrap();
        let TemplateData::Project(p) = data else {
            panic!("expected project payload");
        };
        assert_eq!(p.project_name, "my_shop");
        assert!(p.androidx_support);
        assert!(p.is_offline);
        assert!(p.is_new_project);

        let t = module_template(ProjectType::Module, "com.example").unwrap();
        let data = resolve_template_data(&t, &lookup).unwrap();
        let TemplateData::Module(m) = data else {
            panic!("expected module payload");
        };
        assert_eq!(m.name, "my_shop");
        assert_eq!(m.path, "/work");
        assert!(!m.project.is_new_project);
    }

    #[test]
    fn resolve_reports_missing_parameters() {
        let t = project_template(ProjectType::App, "com.example").unwrap();
        let err = resolve_template_data(&t, &|_| None).unwrap_err();
        assert!(matches!(err, DomainError::UnknownParameter { .. }));
    }
}
