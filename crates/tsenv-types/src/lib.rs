//! Type graph for decoded TypeScript environment specs.
//!
//! This crate holds the in-memory side of a spec load:
//! - The closed type model (`Type`, `Signature`, `Parameter`)
//! - The node arena (`TypeGraph`) whose `TypeId` handles carry identity
//! - The two-phase reference resolver (`TypeResolver`)
//! - The per-variant reference rewriting used by the resolver (`RewriteRefs`)
//! - Memoized derived views (class instance types, erased generics)

pub mod graph;
pub mod resolver;
pub mod rewrite;
pub mod types;
mod views;

pub use graph::TypeGraph;
pub use resolver::{Phase, ResolveError, TypeResolver};
pub use rewrite::{RewriteRefs, for_each_ref};
pub use types::{
    ClassInstanceType, ClassType, GenericType, IndexType, IndexedAccessType, InterfaceShape,
    Parameter, PropertyMap, ReferenceType, Signature, SignatureId, SimpleKind, SpecId, ThisType,
    TupleType, Type, TypeId, TypeKind, TypeParameterType, UnknownKind,
};
