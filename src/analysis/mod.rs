// Analysis pipeline: module catalog first, then per-file import resolution

pub mod imports;
pub mod modules;

pub use imports::*;
pub use modules::*;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::parser::PythonParser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Dependencies of one project file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
    pub file: ProjectFile,
    pub dependencies: DependencyRecord,
}

/// A file that could not be read or parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Path relative to the project root
    pub path: PathBuf,
    pub message: String,
}

/// Result of analyzing a project
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Canonical project root
    pub root: PathBuf,
    /// Module name to document identity
    pub catalog: ModuleCatalog,
    /// One entry per eligible file, sorted by relative path
    pub files: Vec<FileAnalysis>,
    /// Files that contributed no dependencies because they failed to load
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    /// Look up a file by its path relative to the root
    pub fn file(&self, relative: &Path) -> Option<&FileAnalysis> {
        self.files.iter().find(|f| f.file.relative_path == relative)
    }
}

/// Main analyzer that orchestrates the analysis pipeline
pub struct Analyzer {
    builder: CatalogBuilder,
    parser: PythonParser,
    verbose: bool,
}

impl Analyzer {
    /// Create a new analyzer with the given settings
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            builder: CatalogBuilder::from_config(config)?,
            parser: PythonParser::new()?,
            verbose: false,
        })
    }

    /// Show a progress bar while resolving files
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Analyze the project at the given path.
    ///
    /// A missing or unreadable root is fatal. Files that cannot be read or
    /// parsed get an empty record and a diagnostic.
    pub fn analyze(&mut self, root: &Path) -> Result<AnalysisResult> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize()?;

        let (files, catalog) = self.builder.build(&root)?;
        debug!(files = files.len(), modules = catalog.len(), "module catalog built");

        let progress = self.progress_bar(files.len());
        let mut results = Vec::with_capacity(files.len());
        let mut diagnostics = Vec::new();

        for file in files {
            if let Some(ref pb) = progress {
                pb.set_message(file.display_path());
                pb.inc(1);
            }

            let dependencies = match self.parser.parse_file(&file.path) {
                Ok(parsed) => ImportResolver::new(&catalog).resolve(&parsed.imports),
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "skipping imports");
                    diagnostics.push(Diagnostic {
                        path: file.relative_path.clone(),
                        message: e.to_string(),
                    });
                    DependencyRecord::default()
                }
            };

            results.push(FileAnalysis { file, dependencies });
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Resolution complete");
        }

        Ok(AnalysisResult {
            root,
            catalog,
            files: results,
            diagnostics,
        })
    }

    fn progress_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.verbose {
            return None;
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }
}
