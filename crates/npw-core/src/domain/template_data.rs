//! Data records handed to the generator once the wizard finishes.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source language for the generated platform shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Java,
    Kotlin,
    Swift,
    ObjC,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
            Self::Swift => "Swift",
            Self::ObjC => "Objective-C",
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
            Self::Swift => "swift",
            Self::ObjC => "objc",
        }
    }

    /// Finds a language matching the requested name. Returns `default` when
    /// nothing matches.
    pub fn from_name(name: &str, default: Language) -> Language {
        [Self::Java, Self::Kotlin, Self::Swift, Self::ObjC]
            .into_iter()
            .find(|l| l.as_str() == name)
            .unwrap_or(default)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a project recipe needs to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTemplateData {
    pub project_name: String,
    pub sdk_path: PathBuf,
    pub project_path: PathBuf,
    pub package_name: String,
    pub use_kotlin: bool,
    pub use_swift: bool,
    pub androidx_support: bool,
    pub is_offline: bool,
    pub is_new_project: bool,
}

/// Everything a module recipe needs to run. Wraps the enclosing project's
/// data because module generation reuses most of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleTemplateData {
    pub project: ProjectTemplateData,
    pub name: String,
    pub path: String,
}

/// The payload dispatched with a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateData {
    Project(ProjectTemplateData),
    Module(ModuleTemplateData),
}

impl TemplateData {
    pub fn project(&self) -> &ProjectTemplateData {
        match self {
            Self::Project(p) => p,
            Self::Module(m) => &m.project,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_name_matches_display_names() {
        assert_eq!(Language::from_name("Kotlin", Language::Java), Language::Kotlin);
        assert_eq!(Language::from_name("Objective-C", Language::Java), Language::ObjC);
        assert_eq!(Language::from_name("Rust", Language::Java), Language::Java);
    }

    #[test]
    fn module_data_exposes_the_enclosing_project() {
        let project = ProjectTemplateData {
            project_name: "flutter_app".into(),
            sdk_path: PathBuf::from("/opt/flutter"),
            project_path: PathBuf::from("/work"),
            package_name: "com.example.flutter_app".into(),
            use_kotlin: true,
            use_swift: true,
            androidx_support: true,
            is_offline: false,
            is_new_project: false,
        };
        let data = TemplateData::Module(ModuleTemplateData {
            project: project.clone(),
            name: "payments".into(),
            path: "modules/payments".into(),
        });
        assert_eq!(data.project(), &project);
    }
}
