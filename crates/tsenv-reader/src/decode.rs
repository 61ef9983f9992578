//! Kind dispatcher: one raw record in, one `Type` node out.
//!
//! Every embedded reference is obtained from the resolver, so a freshly
//! decoded node holds placeholders until `resolve_all` runs.

use crate::error::SpecError;
use crate::raw::{
    RawBooleanLiteral, RawClass, RawClassInstance, RawConstrained, RawElements, RawGeneric, RawId,
    RawIndex, RawIndexedAccess, RawInterface, RawNumberLiteral, RawReference, RawSignature,
    RawStringLiteral, RawTuple,
};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tsenv_types::{
    ClassInstanceType, ClassType, GenericType, IndexType, IndexedAccessType, InterfaceShape,
    Parameter, PropertyMap, ReferenceType, Signature, SignatureId, SimpleKind, SpecId, ThisType,
    TupleType, Type, TypeId, TypeKind, TypeParameterType, TypeResolver, UnknownKind,
};

/// Convert a raw id that must be present.
pub(crate) fn required_id(raw: RawId, at: &str) -> Result<SpecId, SpecError> {
    u32::try_from(raw)
        .map(SpecId)
        .map_err(|_| SpecError::malformed(at, format!("`{raw}` is not a valid type id")))
}

/// Convert a raw id where any negative value means "no type".
pub(crate) fn optional_id(raw: Option<RawId>, at: &str) -> Result<Option<SpecId>, SpecError> {
    match raw {
        Some(raw) if raw >= 0 => required_id(raw, at).map(Some),
        _ => Ok(None),
    }
}

/// Decode the record stored at `id`.
pub(crate) fn decode_record(
    resolver: &mut TypeResolver,
    id: SpecId,
    record: &Value,
) -> Result<Type, SpecError> {
    let at = format!("data[{id}]");
    let Value::Object(fields) = record else {
        return Err(SpecError::malformed(at, "record is not an object"));
    };
    let tag = match fields.get("kind") {
        Some(Value::String(tag)) => tag.as_str(),
        Some(_) => return Err(SpecError::malformed(at, "`kind` is not a string")),
        None => return Err(SpecError::malformed(at, "missing `kind`")),
    };
    let kind: TypeKind = tag
        .parse()
        .map_err(|UnknownKind(kind)| SpecError::UnknownKind { id, kind })?;

    let mut decoder = RecordDecoder {
        resolver,
        at: &at,
        record,
    };
    decoder.decode(kind)
}

struct RecordDecoder<'a> {
    resolver: &'a mut TypeResolver,
    at: &'a str,
    record: &'a Value,
}

impl RecordDecoder<'_> {
    fn decode(&mut self, kind: TypeKind) -> Result<Type, SpecError> {
        let ty = match kind {
            TypeKind::Any => Type::Simple(SimpleKind::Any),
            TypeKind::String => Type::Simple(SimpleKind::String),
            TypeKind::Number => Type::Simple(SimpleKind::Number),
            TypeKind::Boolean => Type::Simple(SimpleKind::Boolean),
            TypeKind::Void => Type::Simple(SimpleKind::Void),
            TypeKind::Undefined => Type::Simple(SimpleKind::Undefined),
            TypeKind::Null => Type::Simple(SimpleKind::Null),
            TypeKind::Never => Type::Simple(SimpleKind::Never),
            TypeKind::Symbol => Type::Simple(SimpleKind::Symbol),
            TypeKind::Object => Type::Simple(SimpleKind::Object),
            TypeKind::Enum => Type::Simple(SimpleKind::Enum),
            TypeKind::StringLiteral => {
                let raw: RawStringLiteral = self.fields()?;
                Type::StringLiteral(raw.text)
            }
            TypeKind::BooleanLiteral => {
                let raw: RawBooleanLiteral = self.fields()?;
                Type::BooleanLiteral(raw.value)
            }
            TypeKind::NumberLiteral => {
                let raw: RawNumberLiteral = self.fields()?;
                Type::NumberLiteral(raw.value)
            }
            TypeKind::Interface => {
                let raw: RawInterface = self.fields()?;
                Type::Interface(self.interface(raw)?)
            }
            TypeKind::Class => {
                let raw: RawClass = self.fields()?;
                Type::Class(self.class(raw)?)
            }
            TypeKind::ClassInstance => {
                let raw: RawClassInstance = self.fields()?;
                Type::ClassInstance(ClassInstanceType {
                    class_type: self.reference(raw.class_type, "classType")?,
                })
            }
            TypeKind::Generic => {
                let raw: RawGeneric = self.fields()?;
                Type::Generic(GenericType {
                    shape: self.interface(raw.interface)?,
                    target: self.reference(raw.target, "target")?,
                    type_arguments: self.references(&raw.type_arguments, "typeArguments")?,
                })
            }
            TypeKind::Reference => {
                let raw: RawReference = self.fields()?;
                Type::Reference(ReferenceType {
                    target: self.reference(raw.target, "target")?,
                    type_arguments: self.references(&raw.type_arguments, "typeArguments")?,
                })
            }
            TypeKind::Tuple => {
                let raw: RawTuple = self.fields()?;
                let element_types = self.references(&raw.element_types, "elementTypes")?;
                let min_length = match raw.min_length {
                    Some(min_length) => min_length,
                    None => u32::try_from(element_types.len()).map_err(|_| {
                        SpecError::malformed(self.at, "tuple has too many elements")
                    })?,
                };
                Type::Tuple(TupleType {
                    element_types,
                    min_length,
                })
            }
            TypeKind::Union => {
                let raw: RawElements = self.fields()?;
                Type::Union(self.references(&raw.elements, "elements")?)
            }
            TypeKind::Intersection => {
                let raw: RawElements = self.fields()?;
                Type::Intersection(self.references(&raw.elements, "elements")?)
            }
            TypeKind::TypeParameter => {
                let raw: RawConstrained = self.fields()?;
                Type::TypeParameter(TypeParameterType {
                    constraint: self.optional(raw.constraint, "constraint")?,
                })
            }
            TypeKind::ThisType => {
                let raw: RawConstrained = self.fields()?;
                Type::ThisType(ThisType {
                    constraint: self.optional(raw.constraint, "constraint")?,
                })
            }
            TypeKind::Index => {
                let raw: RawIndex = self.fields()?;
                Type::Index(IndexType {
                    type_id: self.reference(raw.type_id, "type")?,
                })
            }
            TypeKind::IndexedAccess => {
                let raw: RawIndexedAccess = self.fields()?;
                Type::IndexedAccess(IndexedAccessType {
                    object_type: self.reference(raw.object_type, "objectType")?,
                    index_type: self.reference(raw.index_type, "indexType")?,
                })
            }
            TypeKind::Anonymous => Type::Anonymous,
        };
        Ok(ty)
    }

    /// Deserialize the variant-specific fields of the record.
    fn fields<T>(&self) -> Result<T, SpecError>
    where
        T: for<'de> Deserialize<'de>,
    {
        T::deserialize(self.record)
            .map_err(|err| SpecError::malformed(self.at, err.to_string()))
    }

    fn field_path(&self, field: &str) -> String {
        format!("{}.{field}", self.at)
    }

    fn reference(&mut self, raw: RawId, field: &str) -> Result<TypeId, SpecError> {
        let id = required_id(raw, &self.field_path(field))?;
        Ok(self.resolver.resolve(id)?)
    }

    fn optional(&mut self, raw: Option<RawId>, field: &str) -> Result<Option<TypeId>, SpecError> {
        match optional_id(raw, &self.field_path(field))? {
            Some(id) => Ok(Some(self.resolver.resolve(id)?)),
            None => Ok(None),
        }
    }

    fn references(&mut self, raw: &[RawId], field: &str) -> Result<Vec<TypeId>, SpecError> {
        raw.iter().map(|&id| self.reference(id, field)).collect()
    }

    fn properties(
        &mut self,
        raw: IndexMap<String, RawId>,
        field: &str,
    ) -> Result<PropertyMap, SpecError> {
        let mut properties = PropertyMap::with_capacity(raw.len());
        for (name, id) in raw {
            let type_id = self.reference(id, &format!("{field}.{name}"))?;
            properties.insert(name, type_id);
        }
        Ok(properties)
    }

    fn interface(&mut self, raw: RawInterface) -> Result<InterfaceShape, SpecError> {
        Ok(InterfaceShape {
            type_parameters: self.references(&raw.type_parameters, "typeParameters")?,
            base_types: self.references(&raw.base_types, "baseTypes")?,
            declared_properties: self.properties(raw.declared_properties, "declaredProperties")?,
            declared_call_signatures: self.signatures(raw.declared_call_signatures)?,
            declared_construct_signatures: self.signatures(raw.declared_construct_signatures)?,
            declared_string_index_type: self
                .optional(raw.declared_string_index_type, "declaredStringIndexType")?,
            declared_number_index_type: self
                .optional(raw.declared_number_index_type, "declaredNumberIndexType")?,
        })
    }

    fn class(&mut self, raw: RawClass) -> Result<ClassType, SpecError> {
        let mut shape = self.interface(raw.interface)?;
        if let Some(constructors) = raw.signatures {
            let constructors = self.signatures(constructors)?;
            shape.declared_construct_signatures.extend(constructors);
        }
        let instance_properties = match raw.instance_properties {
            Some(properties) => self.properties(properties, "instanceProperties")?,
            None => shape.declared_properties.clone(),
        };
        Ok(ClassType {
            shape,
            instance_properties,
            static_properties: self.properties(raw.static_properties, "staticProperties")?,
            target: self.optional(raw.target, "target")?,
            type_arguments: self.references(&raw.type_arguments, "typeArguments")?,
        })
    }

    fn signatures(&mut self, raw: Vec<RawSignature>) -> Result<Vec<SignatureId>, SpecError> {
        raw.into_iter()
            .map(|signature| self.signature(signature))
            .collect()
    }

    fn signature(&mut self, raw: RawSignature) -> Result<SignatureId, SpecError> {
        let target = match raw.target {
            Some(target) => Some(self.signature(*target)?),
            None => None,
        };
        let union_signatures = self.signatures(raw.union_signatures)?;
        let mut parameters = Vec::with_capacity(raw.parameters.len());
        for parameter in raw.parameters {
            let type_id = self.reference(
                parameter.type_id,
                &format!("parameters.{}", parameter.name),
            )?;
            parameters.push(Parameter {
                name: parameter.name,
                type_id,
            });
        }
        let signature = Signature {
            type_parameters: self.references(&raw.type_parameters, "typeParameters")?,
            parameters,
            resolved_return_type: self.reference(raw.resolved_return_type, "resolvedReturnType")?,
            min_argument_count: raw.min_argument_count,
            has_rest_parameter: raw.has_rest_parameter,
            has_string_literals: raw.has_string_literals,
            target,
            union_signatures,
            isolated_signature_type: self
                .optional(raw.isolated_signature_type, "isolatedSignatureType")?,
        };
        Ok(self.resolver.alloc_signature(signature)?)
    }
}

#[cfg(test)]
#[path = "../tests/decode_tests.rs"]
mod tests;
