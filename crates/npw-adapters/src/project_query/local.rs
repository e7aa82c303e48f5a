//! Filesystem-backed environment probes.

use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use npw_core::domain::ProjectQuery;

/// Directories never worth descending into when scanning a project tree.
const SKIPPED_DIRS: [&str; 5] = [".git", ".dart_tool", "build", "node_modules", "target"];

/// Depth cap for project scans. Source trees relevant to the probes sit well
/// within this; without a cap a probe pointed at a home directory crawls
/// forever.
const MAX_SCAN_DEPTH: usize = 12;

/// Probes the real filesystem: an open project's tree for modules, classes
/// and packages, and arbitrary paths for Flutter SDK roots.
#[derive(Debug, Clone, Default)]
pub struct LocalProjectQuery {
    project_root: Option<PathBuf>,
}

impl LocalProjectQuery {
    /// Probe with no open project: only path and SDK checks answer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe the project rooted at `root`.
    pub fn with_project_root(root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: Some(root.into()),
        }
    }

    fn scan(&self) -> Option<impl Iterator<Item = walkdir::DirEntry>> {
        let root = self.project_root.as_ref()?;
        Some(
            WalkDir::new(root)
                .max_depth(MAX_SCAN_DEPTH)
                .into_iter()
                .filter_entry(|e| {
                    e.file_name()
                        .to_str()
                        .map(|name| !SKIPPED_DIRS.contains(&name))
                        .unwrap_or(true)
                })
                .filter_map(Result::ok),
        )
    }
}

impl ProjectQuery for LocalProjectQuery {
    /// A module is a direct subdirectory of the project carrying its own
    /// `pubspec.yaml`.
    fn module_exists(&self, name: &str) -> bool {
        let Some(root) = self.project_root.as_ref() else {
            return false;
        };
        let candidate = root.join(name);
        candidate.is_dir() && candidate.join("pubspec.yaml").is_file()
    }

    /// A class exists when a source file named after its simple name is
    /// found anywhere in the project tree.
    fn class_exists(&self, fq_name: &str) -> bool {
        let simple = fq_name.rsplit('.').next().unwrap_or(fq_name);
        let Some(entries) = self.scan() else {
            return false;
        };
        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let stem_matches = path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s == simple);
            let source_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| matches!(e, "dart" | "java" | "kt"));
            if stem_matches && source_ext {
                trace!(fq_name, path = %path.display(), "class found");
                return true;
            }
        }
        false
    }

    /// A package exists when a directory chain matching its dotted path is
    /// found in the project tree.
    fn package_exists(&self, name: &str) -> bool {
        let suffix: PathBuf = name.split('.').collect();
        let Some(entries) = self.scan() else {
            return false;
        };
        entries
            .filter(|e| e.path().is_dir())
            .any(|e| e.path().ends_with(&suffix))
    }

    fn path_exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    /// An SDK root carries `bin/flutter` and the SDK `version` marker file.
    fn is_sdk_root(&self, path: &str) -> bool {
        let root = Path::new(path);
        root.join("bin").join("flutter").is_file() && root.join("version").is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, b"").expect("write");
    }

    #[test]
    fn sdk_root_needs_both_markers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        let query = LocalProjectQuery::new();
        let root_str = root.to_str().expect("utf8 path");

        assert!(!query.is_sdk_root(root_str));
        touch(&root.join("bin").join("flutter"));
        assert!(!query.is_sdk_root(root_str));
        touch(&root.join("version"));
        assert!(query.is_sdk_root(root_str));
    }

    #[test]
    fn module_probe_requires_a_pubspec() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("payments")).expect("mkdir");
        let query = LocalProjectQuery::with_project_root(dir.path());

        assert!(!query.module_exists("payments"));
        touch(&dir.path().join("payments").join("pubspec.yaml"));
        assert!(query.module_exists("payments"));
        assert!(!query.module_exists("billing"));
    }

    #[test]
    fn class_probe_matches_source_files_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("lib").join("MainView.dart"));
        touch(&dir.path().join("docs").join("OtherView.txt"));
        let query = LocalProjectQuery::with_project_root(dir.path());

        assert!(query.class_exists("com.example.MainView"));
        assert!(query.class_exists("MainView"));
        assert!(!query.class_exists("com.example.OtherView"));
    }

    #[test]
    fn package_probe_follows_the_dotted_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(
            dir.path()
                .join("android/app/src/main/java/com/example/shop"),
        )
        .expect("mkdir");
        let query = LocalProjectQuery::with_project_root(dir.path());

        assert!(query.package_exists("com.example.shop"));
        assert!(!query.package_exists("com.example.cart"));
    }

    #[test]
    fn no_project_means_nothing_exists() {
        let query = LocalProjectQuery::new();
        assert!(!query.module_exists("anything"));
        assert!(!query.class_exists("com.example.Anything"));
        assert!(!query.package_exists("com.example"));
    }
}
