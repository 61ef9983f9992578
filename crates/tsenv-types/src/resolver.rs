//! Two-phase reference resolution.
//!
//! The serialized format cannot express identity or cycles, so every
//! cross-reference is a spec id. Decoding proceeds in two phases:
//!
//! 1. **Collecting**: each record is decoded into a node and registered under
//!    its spec id. Every reference it holds is obtained from [`TypeResolver::resolve`],
//!    which hands out the handle of a `Type::Placeholder(id)` node.
//! 2. **Resolved**: [`TypeResolver::resolve_all`] maps every placeholder to the
//!    node registered for its id and rewrites every reference field in place.
//!
//! Placeholder chains (a placeholder whose registered node is itself a
//! placeholder) are collapsed with a bounded loop. Cycles through real nodes
//! are preserved by identity: an interface that lists itself as a base type
//! ends up holding its own `TypeId`.

use crate::graph::TypeGraph;
use crate::rewrite::RewriteRefs;
use crate::types::{Signature, SignatureId, SpecId, Type, TypeId};
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::{debug, trace};

// =============================================================================
// Errors
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// A spec id was registered twice.
    DuplicateId { id: SpecId },
    /// A reference names a spec id with no registered node.
    UnresolvedId { id: SpecId },
    /// The two-phase discipline was broken, or placeholders form a loop.
    InvariantViolation { message: String },
}

impl ResolveError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        ResolveError::InvariantViolation {
            message: message.into(),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::DuplicateId { id } => write!(f, "id {id} is already registered"),
            ResolveError::UnresolvedId { id } => write!(f, "id {id} does not exist"),
            ResolveError::InvariantViolation { message } => {
                write!(f, "invariant violation: {message}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

// =============================================================================
// Resolver
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    Resolved,
}

/// Registry of spec ids, private to one load.
///
/// ```ignore
/// let mut resolver = TypeResolver::new();
/// let base = resolver.resolve(SpecId(0))?;
/// resolver.register(SpecId(0), Type::Interface(InterfaceShape {
///     base_types: vec![base],
///     ..InterfaceShape::default()
/// }))?;
/// resolver.resolve_all()?;
/// let graph = resolver.into_graph()?;
/// ```
#[derive(Debug)]
pub struct TypeResolver {
    phase: Phase,
    graph: TypeGraph,
    /// One placeholder node per referenced spec id.
    placeholders: FxHashMap<SpecId, TypeId>,
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeResolver {
    pub fn new() -> Self {
        Self {
            phase: Phase::Collecting,
            graph: TypeGraph::new(),
            placeholders: FxHashMap::default(),
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of registered spec ids.
    pub fn registered_count(&self) -> usize {
        self.graph.registry.len()
    }

    pub fn is_registered(&self, id: SpecId) -> bool {
        self.graph.registry.contains_key(&id)
    }

    /// Register the node decoded from the record at `id`.
    pub fn register(&mut self, id: SpecId, ty: Type) -> Result<TypeId, ResolveError> {
        if self.phase == Phase::Resolved {
            return Err(ResolveError::invariant(format!(
                "cannot register id {id} after resolution"
            )));
        }
        if self.graph.registry.contains_key(&id) {
            return Err(ResolveError::DuplicateId { id });
        }
        let kind = ty.kind();
        let node = self.graph.alloc(ty);
        self.graph.registry.insert(id, node);
        trace!(spec_id = id.0, node = node.0, kind = ?kind, "TypeResolver::register");
        Ok(node)
    }

    /// A handle for the node at `id`.
    ///
    /// While collecting this is a placeholder; the same placeholder is returned
    /// for repeated requests of the same id. Once resolved it is the
    /// registered node.
    pub fn resolve(&mut self, id: SpecId) -> Result<TypeId, ResolveError> {
        match self.phase {
            Phase::Collecting => {
                if let Some(&placeholder) = self.placeholders.get(&id) {
                    return Ok(placeholder);
                }
                let placeholder = self.graph.alloc(Type::Placeholder(id));
                self.placeholders.insert(id, placeholder);
                Ok(placeholder)
            }
            Phase::Resolved => self
                .graph
                .by_spec_id(id)
                .ok_or(ResolveError::UnresolvedId { id }),
        }
    }

    /// Store a signature decoded alongside a node.
    pub fn alloc_signature(&mut self, signature: Signature) -> Result<SignatureId, ResolveError> {
        if self.phase == Phase::Resolved {
            return Err(ResolveError::invariant(
                "cannot add signatures after resolution",
            ));
        }
        Ok(self.graph.alloc_signature(signature))
    }

    /// Replace every placeholder reference with the node registered for its id.
    ///
    /// Valid exactly once.
    pub fn resolve_all(&mut self) -> Result<(), ResolveError> {
        if self.phase == Phase::Resolved {
            return Err(ResolveError::invariant("resolve_all called twice"));
        }
        // A failed collapse leaves the resolver collecting, so no graph with
        // placeholders can be handed out.
        let terminals = self.collapse_placeholders()?;
        self.phase = Phase::Resolved;
        debug!(
            nodes = self.graph.len(),
            registered = self.graph.registry.len(),
            placeholders = terminals.len(),
            signatures = self.graph.signature_count(),
            "TypeResolver::resolve_all"
        );

        let mut map = |id: TypeId| terminals.get(&id).copied().unwrap_or(id);
        for node in &mut self.graph.nodes {
            node.rewrite_refs(&mut map);
        }
        for signature in &mut self.graph.signatures {
            signature.rewrite_refs(&mut map);
        }

        // A registered placeholder is an alias; point its registry entry at the end of its chain.
        for node in self.graph.registry.values_mut() {
            if let Some(&terminal) = terminals.get(node) {
                *node = terminal;
            }
        }
        Ok(())
    }

    /// Map every placeholder node to the first non-placeholder node on its chain.
    fn collapse_placeholders(&self) -> Result<FxHashMap<TypeId, TypeId>, ResolveError> {
        let limit = self.graph.registry.len() + 1;
        let mut terminals = FxHashMap::default();

        for (index, node) in self.graph.nodes.iter().enumerate() {
            let Type::Placeholder(first) = node else {
                continue;
            };
            let start = TypeId(index as u32);
            let mut current = *first;
            let mut steps = 0usize;
            let terminal = loop {
                let target = self
                    .graph
                    .by_spec_id(current)
                    .ok_or(ResolveError::UnresolvedId { id: current })?;
                match self.graph.get(target) {
                    Type::Placeholder(next) => {
                        steps += 1;
                        if steps > limit {
                            return Err(ResolveError::invariant(format!(
                                "placeholder chain starting at id {first} does not reach a type"
                            )));
                        }
                        current = *next;
                    }
                    _ => break target,
                }
            };
            trace!(
                placeholder = start.0,
                spec_id = first.0,
                terminal = terminal.0,
                "TypeResolver::collapse"
            );
            terminals.insert(start, terminal);
        }
        Ok(terminals)
    }

    /// Hand over the resolved arena.
    pub fn into_graph(self) -> Result<TypeGraph, ResolveError> {
        if self.phase != Phase::Resolved {
            return Err(ResolveError::invariant(
                "graph requested before resolve_all",
            ));
        }
        Ok(self.graph)
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
