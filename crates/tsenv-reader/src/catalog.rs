//! Named-type catalogs.
//!
//! Two input grammars are accepted: a flat array of `{type, qName}` entries,
//! and a nested object tree whose leaves are ids. Both normalize to one flat
//! list of qualified paths, in input order.

use crate::decode::required_id;
use crate::error::SpecError;
use crate::raw::RawNamedType;
use indexmap::{Equivalent, IndexMap};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use tsenv_types::{SpecId, TypeId, TypeResolver};

// =============================================================================
// Unresolved catalog
// =============================================================================

/// A catalog whose entries still name spec ids.
#[derive(Debug, Default)]
pub(crate) struct RawCatalog {
    pub(crate) entries: Vec<(Vec<String>, SpecId)>,
}

impl RawCatalog {
    /// Normalize either catalog grammar found at `at`.
    pub(crate) fn parse(value: &Value, at: &str) -> Result<Self, SpecError> {
        match value {
            Value::Array(_) => Self::parse_flat(value, at),
            Value::Object(_) => Self::parse_tree(value, at),
            _ => Err(SpecError::malformed(
                at,
                "catalog is neither an array nor an object",
            )),
        }
    }

    fn parse_flat(value: &Value, at: &str) -> Result<Self, SpecError> {
        let raw = Vec::<RawNamedType>::deserialize(value)
            .map_err(|err| SpecError::malformed(at, err.to_string()))?;
        let mut entries = Vec::with_capacity(raw.len());
        for (index, entry) in raw.into_iter().enumerate() {
            let entry_at = format!("{at}[{index}]");
            if entry.q_name.is_empty() {
                return Err(SpecError::malformed(entry_at, "empty qualified name"));
            }
            let id = required_id(entry.type_id, &entry_at)?;
            entries.push((entry.q_name, id));
        }
        Ok(Self { entries })
    }

    fn parse_tree(value: &Value, at: &str) -> Result<Self, SpecError> {
        let mut entries = Vec::new();
        // Children are pushed in reverse so leaves come out in document order.
        let mut stack: Vec<(Vec<String>, &Value)> = vec![(Vec::new(), value)];
        while let Some((path, node)) = stack.pop() {
            match node {
                Value::Object(children) => {
                    for (name, child) in children.iter().rev() {
                        let mut child_path = path.clone();
                        child_path.push(name.clone());
                        stack.push((child_path, child));
                    }
                }
                Value::Number(number) => {
                    let leaf_at = format!("{at}.{}", path.join("."));
                    let raw = number.as_i64().ok_or_else(|| {
                        SpecError::malformed(&leaf_at, format!("`{number}` is not a valid type id"))
                    })?;
                    let id = required_id(raw, &leaf_at)?;
                    entries.push((path, id));
                }
                _ => {
                    return Err(SpecError::malformed(
                        format!("{at}.{}", path.join(".")),
                        "catalog leaf is not a type id",
                    ));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Look up every entry in a resolved registry.
    pub(crate) fn resolve(
        self,
        resolver: &mut TypeResolver,
        name: &str,
    ) -> Result<NamedTypes, SpecError> {
        let mut resolved = NamedTypes::default();
        for (path, id) in self.entries {
            let type_id = resolver.resolve(id)?;
            if let Some(previous) = resolved.entries.insert(path, type_id) {
                debug!(
                    catalog = name,
                    previous = previous.0,
                    replacement = type_id.0,
                    "duplicate qualified name, keeping the last entry"
                );
            }
        }
        Ok(resolved)
    }
}

// =============================================================================
// Resolved catalog
// =============================================================================

/// Qualified name paths mapped to resolved nodes, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedTypes {
    entries: IndexMap<Vec<String>, TypeId>,
}

impl NamedTypes {
    pub fn get(&self, path: &[&str]) -> Option<TypeId> {
        self.entries.get(&PathRef(path)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[String], TypeId)> {
        self.entries
            .iter()
            .map(|(path, &type_id)| (path.as_slice(), type_id))
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.entries.values().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A borrowed qualified path. `[&str]` hashes exactly like `[String]`, so it
/// looks up the owned keys without building a `Vec<String>`.
#[derive(Hash)]
struct PathRef<'a, 'b>(&'a [&'b str]);

impl Equivalent<Vec<String>> for PathRef<'_, '_> {
    fn equivalent(&self, key: &Vec<String>) -> bool {
        self.0.len() == key.len()
            && self
                .0
                .iter()
                .zip(key)
                .all(|(segment, owned)| *segment == owned.as_str())
    }
}

#[cfg(test)]
#[path = "../tests/catalog_tests.rs"]
mod tests;
