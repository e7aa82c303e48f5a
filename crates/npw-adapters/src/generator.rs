//! The project generator adapter.
//!
//! Translates a recipe and its collected data into the `flutter create`
//! invocation that produces the project. Execution is a recording stub: the
//! command line is computed, logged and kept for inspection, but the SDK is
//! not launched from here.

use std::path::PathBuf;

use tracing::info;

use npw_core::application::ports::ProjectGenerator;
use npw_core::application::ApplicationError;
use npw_core::domain::{Recipe, TemplateData};

/// Generator dispatching to the Flutter SDK's `create` tool.
#[derive(Debug, Default)]
pub struct FlutterCreateGenerator {
    invocations: Vec<Vec<String>>,
}

impl FlutterCreateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command lines produced so far, oldest first.
    pub fn invocations(&self) -> &[Vec<String>] {
        &self.invocations
    }
}

/// The full `flutter create` command line for a recipe.
pub fn command_line(recipe: Recipe, data: &TemplateData) -> Result<Vec<String>, ApplicationError> {
    let ty = match recipe {
        Recipe::CreateProject(ty) | Recipe::CreateModule(ty) => ty,
        Recipe::None => {
            return Err(ApplicationError::GenerationFailed {
                reason: "the empty template has no recipe".into(),
            });
        }
    };

    let project = data.project();
    let flutter: PathBuf = project.sdk_path.join("bin").join("flutter");
    let target = project.project_path.join(&project.project_name);

    let mut args = vec![
        flutter.to_string_lossy().into_owned(),
        "create".into(),
        "--template".into(),
        ty.arg().into(),
        "--project-name".into(),
        project.project_name.clone(),
        "--org".into(),
        organization(&project.package_name, &project.project_name),
        "--android-language".into(),
        if project.use_kotlin { "kotlin" } else { "java" }.into(),
        "--ios-language".into(),
        if project.use_swift { "swift" } else { "objc" }.into(),
    ];
    if project.is_offline {
        args.push("--offline".into());
    }
    if !project.androidx_support {
        args.push("--no-androidx".into());
    }
    args.push(target.to_string_lossy().into_owned());
    Ok(args)
}

/// `flutter create` takes the organization, not the full package: strip the
/// trailing project segment when the package follows the synced shape.
fn organization(package_name: &str, project_name: &str) -> String {
    package_name
        .strip_suffix(&format!(".{project_name}"))
        .unwrap_or(package_name)
        .to_owned()
}

impl ProjectGenerator for FlutterCreateGenerator {
    fn generate(&mut self, recipe: Recipe, data: &TemplateData) -> Result<(), ApplicationError> {
        let args = command_line(recipe, data)?;
        info!(command = %args.join(" "), "flutter create prepared");
        self.invocations.push(args);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npw_core::domain::{ProjectTemplateData, ProjectType};

    fn data() -> TemplateData {
        TemplateData::Project(ProjectTemplateData {
            project_name: "corner_shop".into(),
            sdk_path: "/opt/flutter".into(),
            project_path: "/work".into(),
            package_name: "com.example.corner_shop".into(),
            use_kotlin: true,
            use_swift: false,
            androidx_support: true,
            is_offline: true,
            is_new_project: true,
        })
    }

    #[test]
    fn command_line_reflects_the_data() {
        let args = command_line(Recipe::CreateProject(ProjectType::App), &data()).unwrap();
        assert_eq!(args[0], "/opt/flutter/bin/flutter");
        assert!(args.contains(&"--template".to_owned()));
        assert!(args.contains(&"app".to_owned()));
        assert!(args.contains(&"--offline".to_owned()));
        assert!(args.contains(&"kotlin".to_owned()));
        assert!(args.contains(&"objc".to_owned()));
        assert_eq!(args.last().map(String::as_str), Some("/work/corner_shop"));
        // Synced package collapses back to the organization.
        let org_idx = args.iter().position(|a| a == "--org").unwrap() + 1;
        assert_eq!(args[org_idx], "com.example");
    }

    #[test]
    fn empty_recipe_is_rejected() {
        let err = command_line(Recipe::None, &data()).unwrap_err();
        assert!(matches!(err, ApplicationError::GenerationFailed { .. }));
    }

    #[test]
    fn generator_records_invocations() {
        let mut generator = FlutterCreateGenerator::new();
        generator
            .generate(Recipe::CreateProject(ProjectType::App), &data())
            .unwrap();
        assert_eq!(generator.invocations().len(), 1);
    }
}
