//! Vaultmap - Generate Obsidian dependency notes from Python codebases
//!
//! Builds a catalog of the modules in a Python project, classifies every
//! import of every file as internal or external, and writes one Markdown
//! note per file linking to the notes of its internal dependencies.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{
    AnalysisResult, Analyzer, CatalogBuilder, DependencyRecord, Diagnostic, FileAnalysis,
    ImportResolver, ModuleCatalog, ProjectFile,
};
pub use config::{ColorConfig, Config, OutputFormat};
pub use error::{Error, Result};
pub use output::{write_json, NoteConfig, NoteContext, NoteWriter, TemplateEngine};
pub use parser::{ImportStatement, ImportedName, ParsedFile, PythonParser};
