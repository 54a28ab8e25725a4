// Python import extraction using tree-sitter

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser.set_language(&language).map_err(|e| {
            Error::Parser(format!("Failed to set Python language: {}", e))
        })?;
        Ok(Self { parser })
    }

    /// Parse a Python file.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedFile> {
        let bytes = std::fs::read(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;
        let source = String::from_utf8_lossy(&bytes);
        self.parse_source(&source, path.to_path_buf())
    }

    /// Parse Python source code and collect every import statement.
    ///
    /// Fails if the tree contains any syntax error.
    pub fn parse_source(&mut self, source: &str, path: PathBuf) -> Result<ParsedFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse source"))?;

        if let Some(message) = syntax_error(&tree) {
            return Err(Error::syntax(path, message));
        }

        let mut file = ParsedFile::new(path);
        let bytes = source.as_bytes();

        // Imports can appear anywhere: function bodies, try blocks, if guards.
        for node in preorder(&tree) {
            let import = match node.kind() {
                "import_statement" => parse_import(&node, bytes),
                "import_from_statement" => parse_import_from(&node, bytes),
                "future_import_statement" => parse_future_import(&node, bytes),
                _ => None,
            };
            if let Some(import) = import {
                file.imports.push(import);
            }
        }

        Ok(file)
    }
}

/// Python 2 statement forms the grammar still accepts but Python 3 rejects
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Describe the first syntax error in the tree, if any
fn syntax_error(tree: &Tree) -> Option<String> {
    let root = tree.root_node();
    let found = preorder(tree)
        .find(|n| n.is_error() || n.is_missing() || LEGACY_STATEMENTS.contains(&n.kind()));

    let node = match found {
        Some(node) => node,
        None if root.has_error() => root,
        None => return None,
    };

    let pos = node.start_position();
    let what = if node.is_missing() {
        format!("missing {}", node.kind())
    } else if let Some(keyword) = node.kind().strip_suffix("_statement") {
        format!("Python 2 {} statement", keyword)
    } else {
        "invalid syntax".to_string()
    };
    Some(format!("{} at line {}, column {}", what, pos.row + 1, pos.column + 1))
}

/// All nodes of the tree in source order
fn preorder(tree: &Tree) -> impl Iterator<Item = Node<'_>> {
    let mut cursor = tree.walk();
    let mut done = false;

    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let node = cursor.node();

        if !cursor.goto_first_child() {
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    done = true;
                    break;
                }
            }
        }

        Some(node)
    })
}

/// Parse `name` or `name as alias` inside an import list
fn parse_aliased(node: &Node, source: &[u8]) -> Option<ImportedName> {
    let mut cursor = node.walk();
    let mut name = String::new();
    let mut alias = None;

    for inner in node.children(&mut cursor) {
        match inner.kind() {
            "dotted_name" | "identifier" => {
                if name.is_empty() {
                    name = inner.utf8_text(source).ok()?.to_string();
                } else {
                    alias = Some(inner.utf8_text(source).ok()?.to_string());
                }
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return None;
    }

    Some(match alias {
        Some(a) => ImportedName::with_alias(&name, &a),
        None => ImportedName::new(&name),
    })
}

/// Parse an import statement: `import x` or `import x.y as z`
fn parse_import(node: &Node, source: &[u8]) -> Option<ImportStatement> {
    let line = node.start_position().row + 1;
    let mut names = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                names.push(ImportedName::new(child.utf8_text(source).ok()?));
            }
            "aliased_import" => {
                if let Some(name) = parse_aliased(&child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    if names.is_empty() {
        return None;
    }

    Some(ImportStatement::Plain { names, line })
}

/// Parse an import-from statement: `from x import y`, `from ..x import y`
fn parse_import_from(node: &Node, source: &[u8]) -> Option<ImportStatement> {
    let line = node.start_position().row + 1;
    let mut module = None;
    let mut names = Vec::new();
    let mut level = 0;
    let mut seen_import_keyword = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "relative_import" => {
                let mut inner_cursor = child.walk();
                for inner in child.children(&mut inner_cursor) {
                    match inner.kind() {
                        "import_prefix" => {
                            level = inner
                                .utf8_text(source)
                                .ok()?
                                .chars()
                                .filter(|c| *c == '.')
                                .count();
                        }
                        "dotted_name" => {
                            module = Some(inner.utf8_text(source).ok()?.to_string());
                        }
                        _ => {}
                    }
                }
            }
            "dotted_name" => {
                let text = child.utf8_text(source).ok()?;
                if !seen_import_keyword {
                    module = Some(text.to_string());
                } else {
                    names.push(ImportedName::new(text));
                }
            }
            "import" => {
                seen_import_keyword = true;
            }
            "wildcard_import" => {
                names.push(ImportedName::wildcard());
            }
            "aliased_import" => {
                if let Some(name) = parse_aliased(&child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    Some(ImportStatement::From {
        module,
        names,
        level,
        line,
    })
}

/// Parse `from __future__ import x`, which has its own node kind
fn parse_future_import(node: &Node, source: &[u8]) -> Option<ImportStatement> {
    let line = node.start_position().row + 1;
    let mut names = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "dotted_name" => names.push(ImportedName::new(child.utf8_text(source).ok()?)),
            "aliased_import" => {
                if let Some(name) = parse_aliased(&child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    Some(ImportStatement::From {
        module: Some("__future__".to_string()),
        names,
        level: 0,
        line,
    })
}
