//! In-memory environment probe for tests and dry runs.

use std::collections::HashSet;

use npw_core::domain::ProjectQuery;

/// A probe answering from fixed sets instead of the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryProjectQuery {
    modules: HashSet<String>,
    classes: HashSet<String>,
    packages: HashSet<String>,
    paths: HashSet<String>,
    sdk_roots: HashSet<String>,
}

impl MemoryProjectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modules(mut self, modules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.modules.extend(modules.into_iter().map(Into::into));
        self
    }

    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn with_packages(mut self, packages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.packages.extend(packages.into_iter().map(Into::into));
        self
    }

    pub fn with_paths(mut self, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_sdk_roots(mut self, roots: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sdk_roots.extend(roots.into_iter().map(Into::into));
        self
    }
}

impl ProjectQuery for MemoryProjectQuery {
    fn module_exists(&self, name: &str) -> bool {
        self.modules.contains(name)
    }
    fn class_exists(&self, fq_name: &str) -> bool {
        self.classes.contains(fq_name)
    }
    fn package_exists(&self, name: &str) -> bool {
        self.packages.contains(name)
    }
    fn path_exists(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
    fn is_sdk_root(&self, path: &str) -> bool {
        self.sdk_roots.contains(path)
    }
}
