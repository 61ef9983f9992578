//! The assembled result of one load.

use crate::catalog::NamedTypes;
use indexmap::IndexMap;
use tsenv_types::{TypeGraph, TypeId};

/// Where a type was declared, keyed by file path and then location key.
pub type Locations = IndexMap<String, IndexMap<String, TypeLocation>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeLocation {
    pub type_id: TypeId,
    pub kind: String,
    pub debug: String,
}

/// A fully resolved type environment.
///
/// Owns the node arena; every `TypeId` handed out by the accessors indexes
/// into [`Spec::graph`].
#[derive(Debug)]
pub struct Spec {
    pub(crate) graph: TypeGraph,
    pub(crate) global: TypeId,
    pub(crate) globals: NamedTypes,
    pub(crate) types: NamedTypes,
    pub(crate) ambient: NamedTypes,
    pub(crate) locations: Locations,
}

impl Spec {
    /// The synthetic interface whose properties are the global names.
    pub const fn global(&self) -> TypeId {
        self.global
    }

    pub const fn globals(&self) -> &NamedTypes {
        &self.globals
    }

    pub const fn types(&self) -> &NamedTypes {
        &self.types
    }

    pub const fn ambient(&self) -> &NamedTypes {
        &self.ambient
    }

    pub const fn locations(&self) -> &Locations {
        &self.locations
    }

    pub const fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    /// Mutable access for the memoized derived views.
    pub fn graph_mut(&mut self) -> &mut TypeGraph {
        &mut self.graph
    }

    /// Look up a named type by qualified path.
    pub fn lookup(&self, path: &[&str]) -> Option<TypeId> {
        self.types.get(path)
    }
}
