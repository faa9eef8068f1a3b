//! Core [`RuleLoader`] struct: filesystem-backed rule loading with `extends` resolution.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::schema::{RuleDocument, RuleEnvelope, RuleKind};

use super::error::{LoadResult, LoadStatus, Result, RuleError};
use super::extends::resolve_extends;

/// Filesystem-backed rule loader.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` files, resolves
/// `extends` chains (against other files and any registered parent
/// documents), and deserializes them into [`RuleDocument`] instances via
/// two-pass deserialization. Documents are keyed by `metadata.id`.
pub struct RuleLoader {
    /// Root directory containing rule YAML files.
    rules_dir: PathBuf,
    /// Documents that may be extended but are not loaded themselves.
    parents: HashMap<String, serde_yaml::Value>,
    /// Loaded documents keyed by `metadata.id`.
    documents: HashMap<String, RuleDocument>,
}

impl RuleLoader {
    pub fn new(rules_dir: PathBuf) -> Self {
        Self {
            rules_dir,
            parents: HashMap::new(),
            documents: HashMap::new(),
        }
    }

    /// Register a YAML document that files in the directory may `extends`.
    pub fn with_parent(mut self, yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let id = document_id(&value)
            .ok_or_else(|| RuleError::Validation("parent document has no metadata.id".to_string()))?;
        self.parents.insert(id, value);
        Ok(self)
    }

    /// Recursively scan the rules directory and load all YAML files.
    ///
    /// Dotfiles and non-YAML files are skipped, as are documents with
    /// `enabled: false`. Parse errors are reported per file and do not abort
    /// the scan. A broken `extends` chain fails the whole load.
    pub fn load_all(&mut self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        let mut raw: Vec<(PathBuf, String, serde_yaml::Value)> = Vec::new();
        let rules_dir = self.rules_dir.clone();
        self.scan_dir_recursive(&rules_dir, &mut raw, &mut results)?;

        let mut by_id = self.parents.clone();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut accepted = Vec::new();
        for (path, id, value) in raw {
            if let Some(first) = seen.get(&id) {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Failed {
                        error: format!("duplicate document id '{}' (first in {})", id, first.display()),
                    },
                });
                continue;
            }
            seen.insert(id.clone(), path.clone());
            by_id.insert(id.clone(), value);
            accepted.push((path, id));
        }

        let resolved = resolve_extends(&by_id)?;

        for (path, id) in accepted {
            let Some(value) = resolved.get(&id) else {
                continue;
            };
            match parse_document(value.clone()) {
                Ok(doc) if !doc.metadata().enabled => {
                    debug!(rule_id = %id, path = %path.display(), "skipping disabled document");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Skipped {
                            reason: "disabled".to_string(),
                        },
                    });
                }
                Ok(doc) => {
                    info!(rule_id = %id, kind = %doc.kind(), path = %path.display(), "loaded rule");
                    self.documents.insert(id.clone(), doc);
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Loaded { rule_id: id },
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load rule file");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(results)
    }

    /// Recursively collect raw YAML values, keyed by document ID.
    fn scan_dir_recursive(
        &self,
        dir: &Path,
        raw: &mut Vec<(PathBuf, String, serde_yaml::Value)>,
        results: &mut Vec<LoadResult>,
    ) -> Result<()> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        // Stable order so duplicate-ID reports do not depend on the filesystem.
        entries.sort();

        for path in entries {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, raw, results)?;
                continue;
            }

            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == "yml" || e == "yaml")
                .unwrap_or(false);

            if !is_yaml {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML file".to_string(),
                    },
                });
                continue;
            }

            let parsed = fs::read_to_string(&path)
                .map_err(RuleError::from)
                .and_then(|contents| serde_yaml::from_str::<serde_yaml::Value>(&contents).map_err(RuleError::from));
            match parsed {
                Ok(value) => match document_id(&value) {
                    Some(id) if !id.is_empty() => raw.push((path, id, value)),
                    _ => results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: "rule metadata.id must not be empty".to_string(),
                        },
                    }),
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read rule file");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse a single YAML file into a [`RuleDocument`] via two-pass deserialization.
    ///
    /// `extends` is not resolved; use [`load_all`](Self::load_all) for that.
    pub fn load_file(&self, path: &Path) -> Result<RuleDocument> {
        let contents = fs::read_to_string(path)?;
        parse_document(serde_yaml::from_str(&contents)?)
    }

    /// Get the rules directory path.
    pub fn rules_dir(&self) -> &Path {
        &self.rules_dir
    }

    /// All loaded documents keyed by ID.
    pub fn documents(&self) -> &HashMap<String, RuleDocument> {
        &self.documents
    }

    /// Loaded documents of one kind, sorted by ID.
    pub fn documents_of_kind(&self, kind: RuleKind) -> Vec<&RuleDocument> {
        let mut docs: Vec<&RuleDocument> = self
            .documents
            .values()
            .filter(|d| d.kind() == kind)
            .collect();
        docs.sort_by(|a, b| a.metadata().id.cmp(&b.metadata().id));
        docs
    }
}

/// Two-pass parse of a single (already merged) YAML value.
fn parse_document(value: serde_yaml::Value) -> Result<RuleDocument> {
    // First pass: extract envelope (kind + metadata).
    let envelope: RuleEnvelope = serde_yaml::from_value(value)?;

    if envelope.metadata.id.is_empty() {
        return Err(RuleError::Validation(
            "rule metadata.id must not be empty".to_string(),
        ));
    }

    // Second pass: deserialize into kind-specific type.
    envelope.parse_full().map_err(|e| {
        RuleError::Validation(format!("failed to parse rule '{}': {}", envelope.metadata.id, e))
    })
}

fn document_id(value: &serde_yaml::Value) -> Option<String> {
    value
        .get("metadata")
        .and_then(|m| m.get("id"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
