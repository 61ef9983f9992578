//! Derived views over resolved nodes.
//!
//! Consumers cache analysis results by `TypeId`, so every view is memoized per
//! source node: asking twice returns the same handle.

use crate::graph::TypeGraph;
use crate::types::{ClassInstanceType, InterfaceShape, ReferenceType, Type, TypeId};
use tracing::trace;

impl TypeGraph {
    /// Allocate a fresh interface with no members.
    pub fn empty_interface(&mut self) -> TypeId {
        self.alloc(Type::Interface(InterfaceShape::default()))
    }

    /// The `ClassInstance` node for `class`, or `None` if `class` is not a class.
    pub fn class_instance(&mut self, class: TypeId) -> Option<TypeId> {
        if let Some(&cached) = self.views.class_instance.get(&class) {
            return Some(cached);
        }
        self.try_get(class)?.as_class()?;
        let instance = self.alloc(Type::ClassInstance(ClassInstanceType { class_type: class }));
        self.views.class_instance.insert(class, instance);
        Some(instance)
    }

    /// The interface seen by instances of `class`.
    ///
    /// Built from the instance properties, index types and type parameters.
    /// Base classes are replaced by their own instance types, and references
    /// to base classes by references to those instance types. Returns `None`
    /// if `class` is not a class.
    pub fn instance_type(&mut self, class: TypeId) -> Option<TypeId> {
        if let Some(&cached) = self.views.instance_type.get(&class) {
            return Some(cached);
        }
        self.try_get(class)?.as_class()?;

        // Allocate every view in the inheritance closure before filling in base
        // types, so cycles between classes terminate.
        let mut pending = Vec::new();
        let mut worklist = vec![class];
        while let Some(current) = worklist.pop() {
            if self.views.instance_type.contains_key(&current) {
                continue;
            }
            let Some(source) = self.get(current).as_class() else {
                continue;
            };
            let view = InterfaceShape {
                type_parameters: source.shape.type_parameters.clone(),
                declared_properties: source.instance_properties.clone(),
                declared_string_index_type: source.shape.declared_string_index_type,
                declared_number_index_type: source.shape.declared_number_index_type,
                ..InterfaceShape::default()
            };
            for &base in &source.shape.base_types {
                if let Some(base_class) = self.class_behind(base) {
                    worklist.push(base_class);
                }
            }
            let view = self.alloc(Type::Interface(view));
            self.views.instance_type.insert(current, view);
            pending.push((current, view));
        }

        for (source, view) in pending {
            let bases = match self.get(source).as_class() {
                Some(class) => class.shape.base_types.clone(),
                None => continue,
            };
            let mut view_bases = Vec::with_capacity(bases.len());
            for base in bases {
                view_bases.push(self.instance_base(base));
            }
            if let Type::Interface(shape) = self.get_mut(view) {
                shape.base_types = view_bases;
            }
            trace!(class = source.0, view = view.0, "TypeGraph::instance_type");
        }

        self.views.instance_type.get(&class).copied()
    }

    /// The erased interface part of a generic instantiation, without its
    /// target and type arguments. Returns `None` if `generic` is not a generic.
    pub fn generic_as_interface(&mut self, generic: TypeId) -> Option<TypeId> {
        if let Some(&cached) = self.views.generic_interface.get(&generic) {
            return Some(cached);
        }
        let Type::Generic(source) = self.try_get(generic)? else {
            return None;
        };
        let shape = source.shape.clone();
        let view = self.alloc(Type::Interface(shape));
        self.views.generic_interface.insert(generic, view);
        Some(view)
    }

    /// The class a base type names directly or through a reference.
    fn class_behind(&self, base: TypeId) -> Option<TypeId> {
        match self.get(base) {
            Type::Class(_) => Some(base),
            Type::Reference(reference) => self
                .get(reference.target)
                .as_class()
                .map(|_| reference.target),
            _ => None,
        }
    }

    /// Map one base type of a class onto the instance side.
    fn instance_base(&mut self, base: TypeId) -> TypeId {
        let (target, type_arguments) = match self.get(base) {
            Type::Class(_) => {
                return self.views.instance_type.get(&base).copied().unwrap_or(base);
            }
            Type::Reference(reference) => (reference.target, reference.type_arguments.clone()),
            _ => return base,
        };
        let target_view = match self.get(target) {
            Type::Class(_) => self.views.instance_type.get(&target).copied(),
            _ => None,
        };
        match target_view {
            Some(target) => self.alloc(Type::Reference(ReferenceType {
                target,
                type_arguments,
            })),
            None => base,
        }
    }
}

#[cfg(test)]
#[path = "../tests/views_tests.rs"]
mod tests;
