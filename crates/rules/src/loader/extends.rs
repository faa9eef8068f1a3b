//! `extends` inheritance between rule documents.
//!
//! A document naming `metadata.extends: <id>` is deep-merged over its parent:
//! mappings merge key by key, anything else (scalars, sequences) is replaced
//! by the child. The child's `metadata` block is kept as written.

use std::collections::HashMap;

use serde_yaml::Value;

/// Longest parent chain accepted below a document.
const MAX_EXTENDS_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtendsError {
    #[error("document '{child}' extends '{parent}', which was not found")]
    MissingParent { child: String, parent: String },
    #[error("circular extends chain: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },
    #[error("extends chain below '{id}' is deeper than {}", MAX_EXTENDS_DEPTH)]
    TooDeep { id: String },
}

/// Merge `child` over `parent`. Sequences replace, so a child's marker list
/// is never appended to its parent's.
pub fn deep_merge(parent: &Value, child: &Value) -> Value {
    let (Value::Mapping(base), Value::Mapping(over)) = (parent, child) else {
        return child.clone();
    };
    let mut merged = base.clone();
    for (key, value) in over {
        let next = match base.get(key) {
            Some(inherited) => deep_merge(inherited, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Mapping(merged)
}

fn parent_of(doc: &Value) -> Option<&str> {
    doc.get("metadata")?.get("extends")?.as_str()
}

struct Resolver<'a> {
    raw: &'a HashMap<String, Value>,
    done: HashMap<String, Value>,
    /// IDs currently being resolved, outermost first.
    chain: Vec<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, id: &str) -> Result<Value, ExtendsError> {
        if let Some(doc) = self.done.get(id) {
            return Ok(doc.clone());
        }
        if self.chain.iter().any(|c| c == id) {
            let mut chain = self.chain.clone();
            chain.push(id.to_string());
            return Err(ExtendsError::Cycle { chain });
        }
        if self.chain.len() > MAX_EXTENDS_DEPTH {
            return Err(ExtendsError::TooDeep {
                id: self.chain[0].clone(),
            });
        }

        let Some(doc) = self.raw.get(id) else {
            // Only reachable through a parent link; top-level ids come from `raw`.
            return Err(ExtendsError::MissingParent {
                child: self.chain.last().cloned().unwrap_or_default(),
                parent: id.to_string(),
            });
        };

        let resolved = match parent_of(doc) {
            None => doc.clone(),
            Some(parent_id) => {
                self.chain.push(id.to_string());
                let parent = self.resolve(parent_id);
                self.chain.pop();
                let mut merged = deep_merge(&parent?, doc);
                if let (Some(map), Some(meta)) = (merged.as_mapping_mut(), doc.get("metadata")) {
                    map.insert(Value::from("metadata"), meta.clone());
                }
                merged
            }
        };

        self.done.insert(id.to_string(), resolved.clone());
        Ok(resolved)
    }
}

/// Resolve every document's `extends` chain. IDs are visited in sorted order
/// so the reported error does not depend on hash order.
pub fn resolve_extends(raw: &HashMap<String, Value>) -> Result<HashMap<String, Value>, ExtendsError> {
    let mut ids: Vec<&String> = raw.keys().collect();
    ids.sort();

    let mut resolver = Resolver {
        raw,
        done: HashMap::with_capacity(raw.len()),
        chain: Vec::new(),
    };
    for id in ids {
        resolver.resolve(id)?;
    }
    Ok(resolver.done)
}
