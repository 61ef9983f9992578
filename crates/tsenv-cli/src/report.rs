//! Human and JSON renderings of a loaded spec.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;
use tsenv_reader::{NamedTypes, Spec};
use tsenv_types::{TypeGraph, TypeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecSummary {
    pub nodes: usize,
    pub signatures: usize,
    pub registered: usize,
    pub globals: usize,
    pub types: usize,
    pub ambient: usize,
    pub location_files: usize,
    pub locations: usize,
    /// Node count per kind, in first-seen order.
    pub kinds: IndexMap<String, usize>,
}

impl SpecSummary {
    pub fn of(spec: &Spec) -> Self {
        let graph = spec.graph();
        let mut kinds = IndexMap::new();
        for (_, ty) in graph.iter() {
            if let Some(kind) = ty.kind() {
                *kinds.entry(kind.to_string()).or_insert(0) += 1;
            }
        }
        Self {
            nodes: graph.len(),
            signatures: graph.signature_count(),
            registered: graph.registered_count(),
            globals: spec.globals().len(),
            types: spec.types().len(),
            ambient: spec.ambient().len(),
            location_files: spec.locations().len(),
            locations: spec.locations().values().map(|file| file.len()).sum(),
            kinds,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} nodes ({} registered), {} signatures",
            self.nodes, self.registered, self.signatures
        );
        let _ = writeln!(
            out,
            "globals: {}, types: {}, ambient: {}",
            self.globals, self.types, self.ambient
        );
        let _ = writeln!(
            out,
            "locations: {} in {} files",
            self.locations, self.location_files
        );
        for (kind, count) in &self.kinds {
            let _ = writeln!(out, "  {kind:<16} {count}");
        }
        out
    }
}

/// One `name<TAB>kind<TAB>id` line per catalog entry.
pub fn catalog_lines(graph: &TypeGraph, catalog: &NamedTypes) -> Vec<String> {
    catalog
        .iter()
        .map(|(path, type_id)| {
            format!(
                "{}\t{}\t{type_id}",
                path.join("."),
                describe(graph, type_id)
            )
        })
        .collect()
}

pub fn describe(graph: &TypeGraph, type_id: TypeId) -> String {
    match graph.try_get(type_id).and_then(|ty| ty.kind()) {
        Some(kind) => kind.to_string(),
        None => "?".to_string(),
    }
}

/// Split `NodeJS.Process` into its segments.
pub fn split_path(dotted: &str) -> Vec<&str> {
    dotted.split('.').collect()
}

#[cfg(test)]
#[path = "../tests/report_tests.rs"]
mod tests;
