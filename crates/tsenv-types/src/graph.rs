//! Arena of type nodes and signatures.
//!
//! A `TypeGraph` is produced by [`TypeResolver::into_graph`](crate::TypeResolver::into_graph)
//! once every placeholder has been rewritten. Consumers read it through
//! [`TypeGraph::get`] and [`TypeGraph::signature`]. The only mutation left after
//! resolution is the memoized derivation of views such as `TypeGraph::instance_type`.

use crate::rewrite::for_each_ref;
use crate::types::{Signature, SignatureId, SpecId, Type, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    pub(crate) nodes: Vec<Type>,
    pub(crate) signatures: Vec<Signature>,
    /// Spec id to node, for every registered record.
    pub(crate) registry: FxHashMap<SpecId, TypeId>,
    pub(crate) views: ViewCache,
}

/// Memo tables for derived views, keyed by source node.
#[derive(Clone, Debug, Default)]
pub(crate) struct ViewCache {
    pub(crate) class_instance: FxHashMap<TypeId, TypeId>,
    pub(crate) instance_type: FxHashMap<TypeId, TypeId>,
    pub(crate) generic_interface: FxHashMap<TypeId, TypeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its handle.
    pub fn alloc(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(ty);
        id
    }

    pub fn alloc_signature(&mut self, signature: Signature) -> SignatureId {
        let id = SignatureId(self.signatures.len() as u32);
        self.signatures.push(signature);
        id
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this graph.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.nodes[id.index()]
    }

    pub fn try_get(&self, id: TypeId) -> Option<&Type> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.nodes[id.index()]
    }

    /// Look up a signature.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this graph.
    pub fn signature(&self, id: SignatureId) -> &Signature {
        &self.signatures[id.index()]
    }

    pub fn try_signature(&self, id: SignatureId) -> Option<&Signature> {
        self.signatures.get(id.index())
    }

    /// The node registered for a spec id.
    pub fn by_spec_id(&self, id: SpecId) -> Option<TypeId> {
        self.registry.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, ty)| (TypeId(index as u32), ty))
    }

    /// Walk everything reachable from `roots` and return the first placeholder
    /// found, if any.
    ///
    /// Uses an explicit worklist so cyclic graphs terminate.
    pub fn find_placeholder(&self, roots: impl IntoIterator<Item = TypeId>) -> Option<TypeId> {
        let mut seen_types = FxHashSet::default();
        let mut seen_signatures = FxHashSet::default();
        let mut worklist: Vec<TypeId> = roots.into_iter().collect();
        let mut signature_worklist: Vec<SignatureId> = Vec::new();

        loop {
            if let Some(id) = worklist.pop() {
                if !seen_types.insert(id) {
                    continue;
                }
                let Some(ty) = self.try_get(id) else {
                    continue;
                };
                if ty.is_placeholder() {
                    return Some(id);
                }
                for_each_ref(
                    ty,
                    &mut |child| worklist.push(child),
                    &mut |sig| signature_worklist.push(sig),
                );
            } else if let Some(sig) = signature_worklist.pop() {
                if !seen_signatures.insert(sig) {
                    continue;
                }
                let Some(signature) = self.try_signature(sig) else {
                    continue;
                };
                signature.for_each_ref(&mut |child| worklist.push(child), &mut |next| {
                    signature_worklist.push(next)
                });
            } else {
                return None;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/graph_tests.rs"]
mod tests;
