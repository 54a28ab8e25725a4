// Note writer
//
// Writes one Markdown note per analyzed file into the vault, mirroring the
// project's directory layout, plus an optional JSON dump of the analysis.

use crate::analysis::{AnalysisResult, FileAnalysis, ModuleCatalog};
use crate::config::ColorConfig;
use crate::error::Result;
use crate::output::templates::{NoteContext, TemplateEngine};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Folder key used for files directly in the project root
pub const ROOT_FOLDER: &str = "root";

/// File name of the JSON dump inside the vault
pub const JSON_FILE: &str = "dependencies.json";

/// Configuration for note generation
#[derive(Debug, Clone)]
pub struct NoteConfig {
    /// Vault directory notes are written into
    pub vault_root: PathBuf,
    /// Extension of note files, without the dot
    pub extension: String,
    pub colors: ColorConfig,
}

/// Summary of a generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Paths of notes written, in write order
    pub notes: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!("Generated {} notes", self.notes.len())
    }
}

/// Renders and writes dependency notes
pub struct NoteWriter {
    config: NoteConfig,
    engine: TemplateEngine,
}

impl NoteWriter {
    /// Create a writer using the embedded note template
    pub fn new(config: NoteConfig) -> Result<Self> {
        Ok(Self {
            config,
            engine: TemplateEngine::new()?,
        })
    }

    /// Use a different template engine, e.g. one loaded from a file
    pub fn with_engine(mut self, engine: TemplateEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Write one note per analyzed file.
    ///
    /// Two files mapping to the same note path overwrite each other.
    pub fn write_all(&self, analysis: &AnalysisResult) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        for entry in &analysis.files {
            let path = self.note_path(entry);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let content = self.render(entry, &analysis.catalog)?;
            fs::write(&path, content)?;
            info!(note = %path.display(), "generated note");
            report.notes.push(path);
        }

        Ok(report)
    }

    /// Render the note for one file
    pub fn render(&self, entry: &FileAnalysis, catalog: &ModuleCatalog) -> Result<String> {
        let deps = &entry.dependencies;
        let note = NoteContext {
            color: self.color_for(entry).to_string(),
            path: entry.file.display_path(),
            internal: deps
                .internal
                .iter()
                .map(|module| catalog.document_id(module).unwrap_or(module.as_str()).to_string())
                .collect(),
            external: deps.external.iter().cloned().collect(),
        };
        self.engine.render_note(&note)
    }

    /// Where the note for a file is written
    pub fn note_path(&self, entry: &FileAnalysis) -> PathBuf {
        self.config
            .vault_root
            .join(&entry.file.relative_path)
            .with_extension(&self.config.extension)
    }

    /// Color tag from the file's top-level folder
    pub fn color_for(&self, entry: &FileAnalysis) -> &str {
        match entry.file.top_level_dir() {
            Some(folder) => self.config.colors.color_for(&folder),
            None => self.config.colors.color_for(ROOT_FOLDER),
        }
    }
}

/// Write the whole analysis as pretty JSON into `dir`
pub fn write_json(analysis: &AnalysisResult, dir: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(analysis)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(JSON_FILE);
    fs::write(&path, json)?;
    info!(path = %path.display(), "wrote dependency dump");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DependencyRecord, ProjectFile};
    use tempfile::TempDir;

    fn entry(rel: &str, internal: &[&str], external: &[&str]) -> FileAnalysis {
        let root = Path::new("/proj");
        FileAnalysis {
            file: ProjectFile::new(root, "proj", &root.join(rel)),
            dependencies: DependencyRecord {
                internal: internal.iter().map(|s| s.to_string()).collect(),
                external: external.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    fn writer(vault: &Path) -> NoteWriter {
        NoteWriter::new(NoteConfig {
            vault_root: vault.to_path_buf(),
            extension: "md".to_string(),
            colors: ColorConfig::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_note_path() {
        let writer = writer(Path::new("/vault"));
        let path = writer.note_path(&entry("base/constant.py", &[], &[]));
        assert_eq!(path, PathBuf::from("/vault/base/constant.md"));
    }

    #[test]
    fn test_color_by_folder() {
        let writer = writer(Path::new("/vault"));
        assert_eq!(writer.color_for(&entry("bots/runner.py", &[], &[])), "#f67280");
        assert_eq!(writer.color_for(&entry("main.py", &[], &[])), "#355c7d");
        assert_eq!(writer.color_for(&entry("api/routes.py", &[], &[])), "#355c7d");
    }

    #[test]
    fn test_render_links_use_document_ids() {
        let mut catalog = ModuleCatalog::new();
        catalog.insert("base", "base/__init__");
        catalog.insert("base.constant", "base/constant");

        let writer = writer(Path::new("/vault"));
        let note = writer
            .render(&entry("main.py", &["base", "base.constant"], &["os"]), &catalog)
            .unwrap();
        assert!(note.contains("# main.py\n"));
        assert!(note.contains("- [[base/__init__]]\n- [[base/constant]]\n"));
        assert!(note.contains("- os\n"));
    }

    #[test]
    fn test_write_all() {
        let vault = TempDir::new().unwrap();
        let analysis = AnalysisResult {
            root: PathBuf::from("/proj"),
            catalog: ModuleCatalog::new(),
            files: vec![
                entry("main.py", &[], &["sys"]),
                entry("base/deep/util.py", &[], &[]),
            ],
            diagnostics: Vec::new(),
        };

        let report = writer(vault.path()).write_all(&analysis).unwrap();
        assert_eq!(report.notes.len(), 2);
        assert_eq!(report.summary(), "Generated 2 notes");

        let nested = vault.path().join("base/deep/util.md");
        let content = fs::read_to_string(nested).unwrap();
        assert!(content.starts_with("---\ncolor: \"#f8b195\"\n---\n"));
    }

    #[test]
    fn test_write_json() {
        let vault = TempDir::new().unwrap();
        let mut catalog = ModuleCatalog::new();
        catalog.insert("main", "main");
        let analysis = AnalysisResult {
            root: PathBuf::from("/proj"),
            catalog,
            files: vec![entry("main.py", &[], &["os"])],
            diagnostics: Vec::new(),
        };

        let path = write_json(&analysis, vault.path()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["catalog"]["main"], "main");
        assert_eq!(value["files"][0]["dependencies"]["external"][0], "os");
    }
}
