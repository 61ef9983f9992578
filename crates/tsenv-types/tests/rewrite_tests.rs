use super::*;
use crate::types::{SimpleKind, SpecId};

/// Shifts every reference by 100 so rewritten fields are easy to spot.
fn shift(id: TypeId) -> TypeId {
    TypeId(id.0 + 100)
}

fn refs_of(ty: &Type) -> (Vec<TypeId>, Vec<SignatureId>) {
    let mut types = Vec::new();
    let mut signatures = Vec::new();
    for_each_ref(ty, &mut |id| types.push(id), &mut |sig| signatures.push(sig));
    (types, signatures)
}

fn full_shape() -> InterfaceShape {
    let mut declared_properties = PropertyMap::default();
    declared_properties.insert("a".to_string(), TypeId(3));
    InterfaceShape {
        type_parameters: vec![TypeId(1)],
        base_types: vec![TypeId(2)],
        declared_properties,
        declared_call_signatures: vec![SignatureId(0)],
        declared_construct_signatures: vec![SignatureId(1)],
        declared_string_index_type: Some(TypeId(4)),
        declared_number_index_type: None,
    }
}

#[test]
fn test_leaf_nodes_have_no_references() {
    for ty in [
        Type::Simple(SimpleKind::Any),
        Type::StringLiteral("abc".to_string()),
        Type::BooleanLiteral(true),
        Type::NumberLiteral(3.5),
        Type::Anonymous,
        Type::Placeholder(SpecId(1)),
    ] {
        let mut rewritten = ty.clone();
        rewritten.rewrite_refs(&mut shift);
        assert_eq!(rewritten, ty);
        assert_eq!(refs_of(&ty), (vec![], vec![]));
    }
}

#[test]
fn test_interface_fields_are_rewritten() {
    let mut ty = Type::Interface(full_shape());
    ty.rewrite_refs(&mut shift);

    let shape = ty.interface_shape().unwrap();
    assert_eq!(shape.type_parameters, vec![TypeId(101)]);
    assert_eq!(shape.base_types, vec![TypeId(102)]);
    assert_eq!(shape.declared_properties["a"], TypeId(103));
    assert_eq!(shape.declared_string_index_type, Some(TypeId(104)));
    assert_eq!(shape.declared_number_index_type, None);
    // Signature handles are not type references.
    assert_eq!(shape.declared_call_signatures, vec![SignatureId(0)]);
}

#[test]
fn test_class_fields_are_rewritten() {
    let mut instance_properties = PropertyMap::default();
    instance_properties.insert("x".to_string(), TypeId(5));
    let mut static_properties = PropertyMap::default();
    static_properties.insert("create".to_string(), TypeId(6));
    let mut ty = Type::Class(ClassType {
        shape: full_shape(),
        instance_properties,
        static_properties,
        target: Some(TypeId(7)),
        type_arguments: vec![TypeId(8)],
    });
    ty.rewrite_refs(&mut shift);

    let Type::Class(class) = &ty else {
        panic!("expected class");
    };
    assert_eq!(class.shape.base_types, vec![TypeId(102)]);
    assert_eq!(class.instance_properties["x"], TypeId(105));
    assert_eq!(class.static_properties["create"], TypeId(106));
    assert_eq!(class.target, Some(TypeId(107)));
    assert_eq!(class.type_arguments, vec![TypeId(108)]);
}

#[test]
fn test_structural_variants_are_rewritten() {
    let cases = vec![
        (
            Type::ClassInstance(ClassInstanceType {
                class_type: TypeId(1),
            }),
            Type::ClassInstance(ClassInstanceType {
                class_type: TypeId(101),
            }),
        ),
        (
            Type::Generic(GenericType {
                shape: InterfaceShape::default(),
                target: TypeId(1),
                type_arguments: vec![TypeId(2)],
            }),
            Type::Generic(GenericType {
                shape: InterfaceShape::default(),
                target: TypeId(101),
                type_arguments: vec![TypeId(102)],
            }),
        ),
        (
            Type::Reference(ReferenceType {
                target: TypeId(1),
                type_arguments: vec![TypeId(2), TypeId(3)],
            }),
            Type::Reference(ReferenceType {
                target: TypeId(101),
                type_arguments: vec![TypeId(102), TypeId(103)],
            }),
        ),
        (
            Type::Tuple(TupleType {
                element_types: vec![TypeId(1), TypeId(2)],
                min_length: 1,
            }),
            Type::Tuple(TupleType {
                element_types: vec![TypeId(101), TypeId(102)],
                min_length: 1,
            }),
        ),
        (
            Type::Union(vec![TypeId(1), TypeId(2)]),
            Type::Union(vec![TypeId(101), TypeId(102)]),
        ),
        (
            Type::Intersection(vec![TypeId(3)]),
            Type::Intersection(vec![TypeId(103)]),
        ),
        (
            Type::TypeParameter(TypeParameterType {
                constraint: Some(TypeId(1)),
            }),
            Type::TypeParameter(TypeParameterType {
                constraint: Some(TypeId(101)),
            }),
        ),
        (
            Type::ThisType(ThisType { constraint: None }),
            Type::ThisType(ThisType { constraint: None }),
        ),
        (
            Type::Index(IndexType { type_id: TypeId(4) }),
            Type::Index(IndexType {
                type_id: TypeId(104),
            }),
        ),
        (
            Type::IndexedAccess(IndexedAccessType {
                object_type: TypeId(1),
                index_type: TypeId(2),
            }),
            Type::IndexedAccess(IndexedAccessType {
                object_type: TypeId(101),
                index_type: TypeId(102),
            }),
        ),
    ];

    for (mut before, after) in cases {
        before.rewrite_refs(&mut shift);
        assert_eq!(before, after);
    }
}

#[test]
fn test_signature_fields_are_rewritten() {
    let mut signature = Signature {
        type_parameters: vec![TypeId(1)],
        parameters: vec![Parameter {
            name: "value".to_string(),
            type_id: TypeId(2),
        }],
        resolved_return_type: TypeId(3),
        min_argument_count: 1,
        has_rest_parameter: true,
        has_string_literals: false,
        target: Some(SignatureId(0)),
        union_signatures: vec![SignatureId(4)],
        isolated_signature_type: Some(TypeId(5)),
    };
    signature.rewrite_refs(&mut shift);

    assert_eq!(signature.type_parameters, vec![TypeId(101)]);
    assert_eq!(signature.parameters[0].type_id, TypeId(102));
    assert_eq!(signature.parameters[0].name, "value");
    assert_eq!(signature.resolved_return_type, TypeId(103));
    assert_eq!(signature.isolated_signature_type, Some(TypeId(105)));
    assert_eq!(signature.min_argument_count, 1);
    assert!(signature.has_rest_parameter);
    assert_eq!(signature.target, Some(SignatureId(0)));
}

#[test]
fn test_for_each_ref_reports_interface_members() {
    let (types, signatures) = refs_of(&Type::Interface(full_shape()));
    assert_eq!(types, vec![TypeId(1), TypeId(2), TypeId(3), TypeId(4)]);
    assert_eq!(signatures, vec![SignatureId(0), SignatureId(1)]);
}

#[test]
fn test_signature_for_each_ref_reports_target_and_union_members() {
    let mut signature = Signature::returning(TypeId(9));
    signature.target = Some(SignatureId(2));
    signature.union_signatures = vec![SignatureId(3)];
    let mut types = Vec::new();
    let mut signatures = Vec::new();
    signature.for_each_ref(&mut |id| types.push(id), &mut |sig| signatures.push(sig));

    assert_eq!(types, vec![TypeId(9)]);
    assert_eq!(signatures, vec![SignatureId(2), SignatureId(3)]);
}
