// Import classification for Python modules
//
// Decides for every imported name whether it refers to a file in the project
// (internal, resolved against the module catalog) or to something else
// (external, recorded by its top-level name only).

use crate::analysis::modules::ModuleCatalog;
use crate::parser::ImportStatement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Resolved dependencies of one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Catalog keys of imported project modules
    pub internal: BTreeSet<String>,
    /// Top-level names of everything else
    pub external: BTreeSet<String>,
}

impl DependencyRecord {
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// Classifies imports against a module catalog
pub struct ImportResolver<'a> {
    catalog: &'a ModuleCatalog,
}

impl<'a> ImportResolver<'a> {
    pub fn new(catalog: &'a ModuleCatalog) -> Self {
        Self { catalog }
    }

    /// Find the catalog key a dotted name refers to.
    ///
    /// An exact key wins. Otherwise the first key (in sorted order) that ends
    /// with `.name` is taken, so `bots` can match `base.bots`.
    pub fn is_internal(&self, name: &str) -> Option<&'a str> {
        if name.is_empty() {
            return None;
        }

        let catalog: &'a ModuleCatalog = self.catalog;
        if let Some(key) = catalog.key(name) {
            return Some(key);
        }

        let suffix = format!(".{}", name);
        let mut matches = catalog.names().filter(|key| key.ends_with(&suffix));
        let first = matches.next()?;

        let others: Vec<&str> = matches.collect();
        if !others.is_empty() {
            debug!(name, chosen = first, ?others, "ambiguous module suffix match");
        }

        Some(first)
    }

    /// Classify every import of one file
    pub fn resolve(&self, imports: &[ImportStatement]) -> DependencyRecord {
        let mut record = DependencyRecord::default();

        for import in imports {
            match import {
                ImportStatement::Plain { names, .. } => {
                    for imported in names {
                        self.classify(&imported.name, &mut record);
                    }
                }
                ImportStatement::From { module, names, .. } => {
                    // The level is not used: relative imports resolve through
                    // the same rules as absolute ones.
                    let module = module.as_deref().unwrap_or("");

                    for imported in names.iter().filter(|n| !n.is_wildcard()) {
                        let candidate = if module.is_empty() {
                            imported.name.clone()
                        } else {
                            format!("{}.{}", module, imported.name)
                        };

                        if let Some(found) = self.is_internal(&candidate) {
                            record.internal.insert(found.to_string());
                        } else if module.is_empty() {
                            record.external.insert(top_level(&imported.name).to_string());
                        } else {
                            self.classify(module, &mut record);
                        }
                    }
                }
            }
        }

        // A top-level name can be external for one clause and a catalog key
        // for another; internal takes precedence.
        let DependencyRecord { internal, external } = &mut record;
        external.retain(|name| !internal.contains(name));

        record
    }

    /// Record a dotted name as internal if it resolves, else by its top-level part
    fn classify(&self, name: &str, record: &mut DependencyRecord) {
        match self.is_internal(name) {
            Some(found) => {
                record.internal.insert(found.to_string());
            }
            None => {
                record.external.insert(top_level(name).to_string());
            }
        }
    }
}

/// Text before the first dot
fn top_level(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
