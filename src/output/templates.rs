// Template engine for rendering dependency notes

use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

const NOTE_TEMPLATE: &str = "note.md";

/// Values available to the note template
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteContext {
    /// Color tag for the front matter
    pub color: String,
    /// Source path relative to the project root
    pub path: String,
    /// Document identities of internal dependencies, ordered by module name
    pub internal: Vec<String>,
    /// External top-level names, sorted
    pub external: Vec<String>,
}

/// Template engine wrapping Tera
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a template engine with the embedded note template
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(NOTE_TEMPLATE, include_str!("../../templates/note.md.tera"))?;
        Ok(Self { tera })
    }

    /// Create a template engine from a custom note template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_template_file(path, Some(NOTE_TEMPLATE))?;
        Ok(Self { tera })
    }

    /// Render one note
    pub fn render_note(&self, note: &NoteContext) -> Result<String> {
        let context = Context::from_serialize(note)?;
        Ok(self.tera.render(NOTE_TEMPLATE, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn context(internal: &[&str], external: &[&str]) -> NoteContext {
        NoteContext {
            color: "#c06c84".to_string(),
            path: "utils/text.py".to_string(),
            internal: internal.iter().map(|s| s.to_string()).collect(),
            external: external.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_full_note() {
        let engine = TemplateEngine::new().unwrap();
        let note = engine
            .render_note(&context(&["base/constant", "bots/runner"], &["os", "requests"]))
            .unwrap();
        let expected = "---\ncolor: \"#c06c84\"\n---\n\n# utils/text.py\n\n\
                        ## Internal Dependencies\n- [[base/constant]]\n- [[bots/runner]]\n\n\
                        ## External Dependencies\n- os\n- requests\n";
        assert_eq!(note, expected);
    }

    #[test]
    fn test_render_without_dependencies() {
        let engine = TemplateEngine::new().unwrap();
        let note = engine.render_note(&context(&[], &[])).unwrap();
        assert_eq!(note, "---\ncolor: \"#c06c84\"\n---\n\n# utils/text.py\n");
    }

    #[test]
    fn test_render_external_only() {
        let engine = TemplateEngine::new().unwrap();
        let note = engine.render_note(&context(&[], &["json"])).unwrap();
        assert!(!note.contains("Internal Dependencies"));
        assert!(note.ends_with("\n## External Dependencies\n- json\n"));
    }

    #[test]
    fn test_custom_template_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{{{ path }}}}: {{{{ internal | length }}}}").unwrap();

        let engine = TemplateEngine::from_file(file.path()).unwrap();
        let note = engine.render_note(&context(&["a", "b"], &[])).unwrap();
        assert_eq!(note, "utils/text.py: 2");
    }
}
