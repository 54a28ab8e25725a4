// Import statements extracted from Python source files
//
// Only the parts of the syntax tree that matter for dependency analysis are
// kept: which modules a file imports and how it imports them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A parsed Python file, reduced to its import statements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedFile {
    /// File path as given to the parser
    pub path: PathBuf,
    /// All imports in the file, in source order
    pub imports: Vec<ImportStatement>,
}

impl ParsedFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            imports: Vec::new(),
        }
    }
}

/// A single import statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportStatement {
    /// `import a.b, c as d`
    Plain {
        names: Vec<ImportedName>,
        line: usize,
    },
    /// `from m import x, y` or `from ..m import x`
    From {
        /// Module text after the leading dots; `None` for `from . import x`
        module: Option<String>,
        names: Vec<ImportedName>,
        /// Number of leading dots (0 = absolute)
        level: usize,
        line: usize,
    },
}

impl ImportStatement {
    /// Create a `import x` style import
    pub fn plain(names: &[&str], line: usize) -> Self {
        ImportStatement::Plain {
            names: names.iter().map(|n| ImportedName::new(n)).collect(),
            line,
        }
    }

    /// Create an absolute `from x import y` style import
    pub fn from_import(module: &str, names: &[&str], line: usize) -> Self {
        ImportStatement::From {
            module: Some(module.to_string()),
            names: names.iter().map(|n| ImportedName::new(n)).collect(),
            level: 0,
            line,
        }
    }

    /// Create a relative import; an empty module means `from . import y`
    pub fn relative(module: &str, names: &[&str], level: usize, line: usize) -> Self {
        ImportStatement::From {
            module: if module.is_empty() {
                None
            } else {
                Some(module.to_string())
            },
            names: names.iter().map(|n| ImportedName::new(n)).collect(),
            level,
            line,
        }
    }

    /// Line number of the statement
    pub fn line(&self) -> usize {
        match self {
            ImportStatement::Plain { line, .. } | ImportStatement::From { line, .. } => *line,
        }
    }

    /// Names listed by the statement
    pub fn names(&self) -> &[ImportedName] {
        match self {
            ImportStatement::Plain { names, .. } | ImportStatement::From { names, .. } => names,
        }
    }
}

/// A single imported name with optional alias
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportedName {
    /// Original name (`*` for a wildcard import)
    pub name: String,
    /// Alias (from `as` clause)
    pub alias: Option<String>,
}

impl ImportedName {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
        }
    }

    pub fn with_alias(name: &str, alias: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: Some(alias.to_string()),
        }
    }

    pub fn wildcard() -> Self {
        Self::new("*")
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == "*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_with_empty_module() {
        let import = ImportStatement::relative("", &["sibling"], 1, 3);
        match import {
            ImportStatement::From { module, level, .. } => {
                assert!(module.is_none());
                assert_eq!(level, 1);
            }
            _ => panic!("Expected From import"),
        }
    }

    #[test]
    fn test_accessors() {
        let import = ImportStatement::plain(&["os", "sys"], 7);
        assert_eq!(import.line(), 7);
        assert_eq!(import.names().len(), 2);
        assert_eq!(import.names()[1].name, "sys");
    }

    #[test]
    fn test_wildcard() {
        assert!(ImportedName::wildcard().is_wildcard());
        assert!(!ImportedName::with_alias("numpy", "np").is_wildcard());
    }

    #[test]
    fn test_serialization_tag() {
        let import = ImportStatement::from_import("pkg", &["mod"], 1);
        let json = serde_json::to_string(&import).unwrap();
        assert!(json.contains("\"kind\":\"from\""));
    }
}
