// Module catalog construction
//
// Walks the project tree once and maps every eligible Python file to its
// dotted module name and to the document identity its note is addressed by.

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const SOURCE_EXTENSION: &str = "py";
const PACKAGE_INIT: &str = "__init__.py";
const RESERVED_PREFIX: &str = "__";

/// A discovered source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the project root
    pub relative_path: PathBuf,
    /// Dotted module name, e.g. `base.constant`
    pub module_name: String,
    /// Relative path without extension, e.g. `base/constant`
    pub document_id: String,
}

impl ProjectFile {
    /// Derive names for a file below `root`.
    ///
    /// `root_name` is used as the module name of a package initializer that
    /// sits directly in the project root.
    pub fn new(root: &Path, root_name: &str, path: &Path) -> Self {
        let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let parts = path_parts(&relative_path);

        let is_package_init = relative_path
            .file_name()
            .map_or(false, |name| name == PACKAGE_INIT);

        let module_name = if is_package_init {
            let parent = &parts[..parts.len().saturating_sub(1)];
            if parent.is_empty() {
                root_name.to_string()
            } else {
                parent.join(".")
            }
        } else {
            strip_extension(&parts).join(".")
        };

        Self {
            path: path.to_path_buf(),
            document_id: strip_extension(&parts).join("/"),
            relative_path,
            module_name,
        }
    }

    /// First directory below the root, or `None` for files in the root itself
    pub fn top_level_dir(&self) -> Option<String> {
        let parts = path_parts(&self.relative_path);
        if parts.len() > 1 {
            parts.into_iter().next()
        } else {
            None
        }
    }

    /// Relative path with forward slashes
    pub fn display_path(&self) -> String {
        path_parts(&self.relative_path).join("/")
    }
}

/// Normal components of a relative path as strings
fn path_parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Drop the source extension from the last component
fn strip_extension(parts: &[String]) -> Vec<String> {
    let mut parts = parts.to_vec();
    if let Some(last) = parts.last_mut() {
        let suffix = format!(".{}", SOURCE_EXTENSION);
        if let Some(stem) = last.strip_suffix(&suffix) {
            *last = stem.to_string();
        }
    }
    parts
}

/// Mapping from dotted module name to document identity.
///
/// Keys are kept sorted so that suffix lookups are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleCatalog {
    modules: BTreeMap<String, String>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from files in discovery order; later files win on collision
    pub fn from_files(files: &[ProjectFile]) -> Self {
        let mut catalog = Self::new();
        for file in files {
            catalog.insert(&file.module_name, &file.document_id);
        }
        catalog
    }

    /// Insert a module, replacing any previous entry with the same name
    pub fn insert(&mut self, module_name: &str, document_id: &str) {
        if let Some(previous) = self
            .modules
            .insert(module_name.to_string(), document_id.to_string())
        {
            debug!(
                module = module_name,
                replaced = %previous,
                by = document_id,
                "module name collision"
            );
        }
    }

    pub fn contains(&self, module_name: &str) -> bool {
        self.modules.contains_key(module_name)
    }

    /// The stored key equal to `module_name`
    pub fn key(&self, module_name: &str) -> Option<&str> {
        self.modules
            .get_key_value(module_name)
            .map(|(key, _)| key.as_str())
    }

    /// Document identity for a module
    pub fn document_id(&self, module_name: &str) -> Option<&str> {
        self.modules.get(module_name).map(String::as_str)
    }

    /// Module names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Discovers eligible source files under a project root
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    exclude_dirs: Vec<String>,
    exclude: Vec<glob::Pattern>,
    include_package_init: bool,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            exclude_dirs: vec![".venv".to_string()],
            exclude: Vec::new(),
            include_package_init: false,
        }
    }
}

impl CatalogBuilder {
    /// Create a builder from analysis settings
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            exclude_dirs: config.exclude_dirs.clone(),
            exclude,
            include_package_init: config.include_package_init,
        })
    }

    /// Exempt `__init__.py` from the reserved-prefix rule
    pub fn with_package_init(mut self, include: bool) -> Self {
        self.include_package_init = include;
        self
    }

    /// Find every eligible file, sorted by relative path
    pub fn discover(&self, root: &Path) -> Result<Vec<ProjectFile>> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_excluded_dir(e.path(), e.file_type().is_dir()));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable path");
                    continue;
                }
            };
            // Links to files count; links to directories are not followed.
            if !entry.file_type().is_file() && !(entry.path_is_symlink() && entry.path().is_file()) {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.is_eligible(relative) {
                files.push(ProjectFile::new(root, &root_name, entry.path()));
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    /// Discover files and build the catalog in one pass
    pub fn build(&self, root: &Path) -> Result<(Vec<ProjectFile>, ModuleCatalog)> {
        let files = self.discover(root)?;
        let catalog = ModuleCatalog::from_files(&files);
        Ok((files, catalog))
    }

    fn is_excluded_dir(&self, path: &Path, is_dir: bool) -> bool {
        is_dir
            && path
                .file_name()
                .map_or(false, |name| self.exclude_dirs.iter().any(|d| name == d.as_str()))
    }

    /// Check a path relative to the project root against the eligibility rules
    fn is_eligible(&self, relative: &Path) -> bool {
        if relative.extension().map_or(true, |ext| ext != SOURCE_EXTENSION) {
            return false;
        }

        let parts = path_parts(relative);
        let Some((file_name, dirs)) = parts.split_last() else {
            return false;
        };

        if dirs.iter().any(|d| self.exclude_dirs.contains(d)) {
            return false;
        }

        let is_package_init = file_name == PACKAGE_INIT;
        if file_name.starts_with(RESERVED_PREFIX) && !(is_package_init && self.include_package_init) {
            return false;
        }

        let posix = parts.join("/");
        !self.exclude.iter().any(|p| p.matches(&posix))
    }
}
