//! Per-variant enumeration of reference-bearing fields.
//!
//! [`RewriteRefs`] mutates every `TypeId` a node holds through a mapping
//! function; [`for_each_ref`] is its read-only twin. Both match on [`Type`]
//! exhaustively, so adding a variant without deciding which of its fields are
//! references fails to compile.
//!
//! Signatures referenced from a node are separate arena entries. They are
//! reported to the caller instead of being walked here, which keeps the
//! traversal flat even when a signature's `target` is the signature itself.

use crate::types::{
    ClassInstanceType, ClassType, GenericType, IndexType, IndexedAccessType, InterfaceShape,
    Parameter, PropertyMap, ReferenceType, Signature, SignatureId, ThisType, TupleType, Type,
    TypeId, TypeParameterType,
};

/// Rewrite every type reference held by `self` through `map`.
pub trait RewriteRefs {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F);
}

fn rewrite_list<F: FnMut(TypeId) -> TypeId>(list: &mut [TypeId], map: &mut F) {
    for id in list {
        *id = map(*id);
    }
}

fn rewrite_option<F: FnMut(TypeId) -> TypeId>(slot: &mut Option<TypeId>, map: &mut F) {
    if let Some(id) = slot {
        *id = map(*id);
    }
}

fn rewrite_properties<F: FnMut(TypeId) -> TypeId>(properties: &mut PropertyMap, map: &mut F) {
    for id in properties.values_mut() {
        *id = map(*id);
    }
}

impl RewriteRefs for InterfaceShape {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F) {
        rewrite_list(&mut self.type_parameters, map);
        rewrite_list(&mut self.base_types, map);
        rewrite_properties(&mut self.declared_properties, map);
        rewrite_option(&mut self.declared_string_index_type, map);
        rewrite_option(&mut self.declared_number_index_type, map);
    }
}

impl RewriteRefs for ClassType {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F) {
        self.shape.rewrite_refs(map);
        rewrite_properties(&mut self.instance_properties, map);
        rewrite_properties(&mut self.static_properties, map);
        rewrite_option(&mut self.target, map);
        rewrite_list(&mut self.type_arguments, map);
    }
}

impl RewriteRefs for GenericType {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F) {
        self.shape.rewrite_refs(map);
        self.target = map(self.target);
        rewrite_list(&mut self.type_arguments, map);
    }
}

impl RewriteRefs for ReferenceType {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F) {
        self.target = map(self.target);
        rewrite_list(&mut self.type_arguments, map);
    }
}

impl RewriteRefs for Parameter {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F) {
        self.type_id = map(self.type_id);
    }
}

impl RewriteRefs for Signature {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F) {
        rewrite_list(&mut self.type_parameters, map);
        for parameter in &mut self.parameters {
            parameter.rewrite_refs(map);
        }
        self.resolved_return_type = map(self.resolved_return_type);
        rewrite_option(&mut self.isolated_signature_type, map);
    }
}

impl RewriteRefs for Type {
    fn rewrite_refs<F: FnMut(TypeId) -> TypeId>(&mut self, map: &mut F) {
        match self {
            Type::Simple(_)
            | Type::StringLiteral(_)
            | Type::BooleanLiteral(_)
            | Type::NumberLiteral(_)
            | Type::Anonymous
            | Type::Placeholder(_) => {}
            Type::Interface(shape) => shape.rewrite_refs(map),
            Type::Class(class) => class.rewrite_refs(map),
            Type::ClassInstance(ClassInstanceType { class_type }) => {
                *class_type = map(*class_type);
            }
            Type::Generic(generic) => generic.rewrite_refs(map),
            Type::Reference(reference) => reference.rewrite_refs(map),
            Type::Tuple(TupleType { element_types, .. }) => rewrite_list(element_types, map),
            Type::Union(elements) | Type::Intersection(elements) => rewrite_list(elements, map),
            Type::TypeParameter(TypeParameterType { constraint })
            | Type::ThisType(ThisType { constraint }) => rewrite_option(constraint, map),
            Type::Index(IndexType { type_id }) => *type_id = map(*type_id),
            Type::IndexedAccess(IndexedAccessType {
                object_type,
                index_type,
            }) => {
                *object_type = map(*object_type);
                *index_type = map(*index_type);
            }
        }
    }
}

// =============================================================================
// Read-only traversal
// =============================================================================

fn shape_refs(
    shape: &InterfaceShape,
    on_type: &mut impl FnMut(TypeId),
    on_signature: &mut impl FnMut(SignatureId),
) {
    shape.type_parameters.iter().copied().for_each(&mut *on_type);
    shape.base_types.iter().copied().for_each(&mut *on_type);
    shape
        .declared_properties
        .values()
        .copied()
        .for_each(&mut *on_type);
    shape
        .declared_call_signatures
        .iter()
        .copied()
        .for_each(&mut *on_signature);
    shape
        .declared_construct_signatures
        .iter()
        .copied()
        .for_each(&mut *on_signature);
    shape
        .declared_string_index_type
        .into_iter()
        .chain(shape.declared_number_index_type)
        .for_each(on_type);
}

/// Report every type and signature directly referenced by `ty`.
pub fn for_each_ref(
    ty: &Type,
    on_type: &mut impl FnMut(TypeId),
    on_signature: &mut impl FnMut(SignatureId),
) {
    match ty {
        Type::Simple(_)
        | Type::StringLiteral(_)
        | Type::BooleanLiteral(_)
        | Type::NumberLiteral(_)
        | Type::Anonymous
        | Type::Placeholder(_) => {}
        Type::Interface(shape) => shape_refs(shape, on_type, on_signature),
        Type::Class(class) => {
            shape_refs(&class.shape, on_type, on_signature);
            class
                .instance_properties
                .values()
                .chain(class.static_properties.values())
                .chain(class.target.iter())
                .chain(class.type_arguments.iter())
                .copied()
                .for_each(on_type);
        }
        Type::ClassInstance(instance) => on_type(instance.class_type),
        Type::Generic(generic) => {
            shape_refs(&generic.shape, on_type, on_signature);
            on_type(generic.target);
            generic.type_arguments.iter().copied().for_each(on_type);
        }
        Type::Reference(reference) => {
            on_type(reference.target);
            reference.type_arguments.iter().copied().for_each(on_type);
        }
        Type::Tuple(tuple) => tuple.element_types.iter().copied().for_each(on_type),
        Type::Union(elements) | Type::Intersection(elements) => {
            elements.iter().copied().for_each(on_type)
        }
        Type::TypeParameter(TypeParameterType { constraint })
        | Type::ThisType(ThisType { constraint }) => constraint.iter().copied().for_each(on_type),
        Type::Index(index) => on_type(index.type_id),
        Type::IndexedAccess(access) => {
            on_type(access.object_type);
            on_type(access.index_type);
        }
    }
}

impl Signature {
    /// Report every type and signature directly referenced by this signature,
    /// including its `target` and union members.
    pub fn for_each_ref(
        &self,
        on_type: &mut impl FnMut(TypeId),
        on_signature: &mut impl FnMut(SignatureId),
    ) {
        self.type_parameters.iter().copied().for_each(&mut *on_type);
        self.parameters
            .iter()
            .map(|parameter| parameter.type_id)
            .for_each(&mut *on_type);
        on_type(self.resolved_return_type);
        self.isolated_signature_type.iter().copied().for_each(on_type);
        self.target
            .iter()
            .chain(self.union_signatures.iter())
            .copied()
            .for_each(on_signature);
    }
}

#[cfg(test)]
#[path = "../tests/rewrite_tests.rs"]
mod tests;
