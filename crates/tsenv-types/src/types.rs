//! Type model for decoded TypeScript environment specs.
//!
//! Every node lives in a [`TypeGraph`](crate::TypeGraph) arena and is addressed by a
//! [`TypeId`]. Reference-valued fields hold `TypeId`s, never owned nodes, so
//! recursive and mutually recursive types are expressed without copies:
//! two fields point at the same node exactly when they hold the same `TypeId`.
//!
//! Signatures are stored in a second arena and addressed by [`SignatureId`].

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Handle of a node in the type arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a signature in the signature arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureId(pub u32);

impl SignatureId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a raw record in the serialized `data` array.
///
/// This is the only addressing mechanism the serialized format has; it is
/// mapped to a [`TypeId`] by the resolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecId(pub u32);

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Property name to type mapping, in declaration order.
pub type PropertyMap = IndexMap<String, TypeId>;

// =============================================================================
// Discriminator
// =============================================================================

/// The closed set of `kind` tags a serialized record may carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Any,
    String,
    Number,
    Boolean,
    Void,
    Undefined,
    Null,
    Never,
    Symbol,
    Object,
    Enum,
    StringLiteral,
    BooleanLiteral,
    NumberLiteral,
    Interface,
    Class,
    ClassInstance,
    Generic,
    Reference,
    Tuple,
    Union,
    Intersection,
    TypeParameter,
    ThisType,
    Index,
    IndexedAccess,
    Anonymous,
}

impl TypeKind {
    pub const ALL: [TypeKind; 27] = [
        TypeKind::Any,
        TypeKind::String,
        TypeKind::Number,
        TypeKind::Boolean,
        TypeKind::Void,
        TypeKind::Undefined,
        TypeKind::Null,
        TypeKind::Never,
        TypeKind::Symbol,
        TypeKind::Object,
        TypeKind::Enum,
        TypeKind::StringLiteral,
        TypeKind::BooleanLiteral,
        TypeKind::NumberLiteral,
        TypeKind::Interface,
        TypeKind::Class,
        TypeKind::ClassInstance,
        TypeKind::Generic,
        TypeKind::Reference,
        TypeKind::Tuple,
        TypeKind::Union,
        TypeKind::Intersection,
        TypeKind::TypeParameter,
        TypeKind::ThisType,
        TypeKind::Index,
        TypeKind::IndexedAccess,
        TypeKind::Anonymous,
    ];

    /// The tag as it appears in serialized records.
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeKind::Any => "Any",
            TypeKind::String => "String",
            TypeKind::Number => "Number",
            TypeKind::Boolean => "Boolean",
            TypeKind::Void => "Void",
            TypeKind::Undefined => "Undefined",
            TypeKind::Null => "Null",
            TypeKind::Never => "Never",
            TypeKind::Symbol => "Symbol",
            TypeKind::Object => "Object",
            TypeKind::Enum => "Enum",
            TypeKind::StringLiteral => "StringLiteral",
            TypeKind::BooleanLiteral => "BooleanLiteral",
            TypeKind::NumberLiteral => "NumberLiteral",
            TypeKind::Interface => "Interface",
            TypeKind::Class => "Class",
            TypeKind::ClassInstance => "ClassInstance",
            TypeKind::Generic => "Generic",
            TypeKind::Reference => "Reference",
            TypeKind::Tuple => "Tuple",
            TypeKind::Union => "Union",
            TypeKind::Intersection => "Intersection",
            TypeKind::TypeParameter => "TypeParameter",
            TypeKind::ThisType => "ThisType",
            TypeKind::Index => "Index",
            TypeKind::IndexedAccess => "IndexedAccess",
            TypeKind::Anonymous => "Anonymous",
        }
    }

    /// The primitive kind for simple tags, `None` for structured ones.
    pub const fn simple_kind(self) -> Option<SimpleKind> {
        Some(match self {
            TypeKind::Any => SimpleKind::Any,
            TypeKind::String => SimpleKind::String,
            TypeKind::Number => SimpleKind::Number,
            TypeKind::Boolean => SimpleKind::Boolean,
            TypeKind::Void => SimpleKind::Void,
            TypeKind::Undefined => SimpleKind::Undefined,
            TypeKind::Null => SimpleKind::Null,
            TypeKind::Never => SimpleKind::Never,
            TypeKind::Symbol => SimpleKind::Symbol,
            TypeKind::Object => SimpleKind::Object,
            TypeKind::Enum => SimpleKind::Enum,
            _ => return None,
        })
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `kind` tag is outside [`TypeKind::ALL`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for TypeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Primitive types that carry no data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Any,
    String,
    Number,
    Boolean,
    Void,
    Undefined,
    Null,
    Never,
    Symbol,
    Object,
    Enum,
}

impl SimpleKind {
    pub const fn kind(self) -> TypeKind {
        match self {
            SimpleKind::Any => TypeKind::Any,
            SimpleKind::String => TypeKind::String,
            SimpleKind::Number => TypeKind::Number,
            SimpleKind::Boolean => TypeKind::Boolean,
            SimpleKind::Void => TypeKind::Void,
            SimpleKind::Undefined => TypeKind::Undefined,
            SimpleKind::Null => TypeKind::Null,
            SimpleKind::Never => TypeKind::Never,
            SimpleKind::Symbol => TypeKind::Symbol,
            SimpleKind::Object => TypeKind::Object,
            SimpleKind::Enum => TypeKind::Enum,
        }
    }
}

// =============================================================================
// Structured payloads
// =============================================================================

/// The members shared by interfaces, classes and generic interfaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterfaceShape {
    pub type_parameters: Vec<TypeId>,
    pub base_types: Vec<TypeId>,
    pub declared_properties: PropertyMap,
    pub declared_call_signatures: Vec<SignatureId>,
    pub declared_construct_signatures: Vec<SignatureId>,
    pub declared_string_index_type: Option<TypeId>,
    pub declared_number_index_type: Option<TypeId>,
}

/// A class declaration.
///
/// The interface-shaped part holds the construct signatures (constructors)
/// and, for older producers, the declared properties. Instance and static
/// members are kept apart so the instance view can be derived.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassType {
    pub shape: InterfaceShape,
    pub instance_properties: PropertyMap,
    pub static_properties: PropertyMap,
    pub target: Option<TypeId>,
    pub type_arguments: Vec<TypeId>,
}

impl ClassType {
    /// Constructors of the class.
    pub fn constructors(&self) -> &[SignatureId] {
        &self.shape.declared_construct_signatures
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassInstanceType {
    pub class_type: TypeId,
}

/// An interface that is also an instantiation of a generic target.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericType {
    pub shape: InterfaceShape,
    pub target: TypeId,
    pub type_arguments: Vec<TypeId>,
}

/// `Target<Args...>`
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceType {
    pub target: TypeId,
    pub type_arguments: Vec<TypeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleType {
    pub element_types: Vec<TypeId>,
    pub min_length: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeParameterType {
    pub constraint: Option<TypeId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThisType {
    pub constraint: Option<TypeId>,
}

/// `keyof T`
#[derive(Clone, Debug, PartialEq)]
pub struct IndexType {
    pub type_id: TypeId,
}

/// `T[K]`
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedAccessType {
    pub object_type: TypeId,
    pub index_type: TypeId,
}

// =============================================================================
// Type
// =============================================================================

/// One node of the type graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Simple(SimpleKind),
    StringLiteral(String),
    BooleanLiteral(bool),
    NumberLiteral(f64),
    Interface(InterfaceShape),
    Class(ClassType),
    ClassInstance(ClassInstanceType),
    Generic(GenericType),
    Reference(ReferenceType),
    Tuple(TupleType),
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    TypeParameter(TypeParameterType),
    ThisType(ThisType),
    Index(IndexType),
    IndexedAccess(IndexedAccessType),
    Anonymous,
    /// Stand-in for the record at a spec id that has not been resolved yet.
    /// Never reachable from a resolved graph.
    Placeholder(SpecId),
}

impl Type {
    /// The serialized discriminator of this node, `None` for placeholders.
    pub const fn kind(&self) -> Option<TypeKind> {
        Some(match self {
            Type::Simple(simple) => simple.kind(),
            Type::StringLiteral(_) => TypeKind::StringLiteral,
            Type::BooleanLiteral(_) => TypeKind::BooleanLiteral,
            Type::NumberLiteral(_) => TypeKind::NumberLiteral,
            Type::Interface(_) => TypeKind::Interface,
            Type::Class(_) => TypeKind::Class,
            Type::ClassInstance(_) => TypeKind::ClassInstance,
            Type::Generic(_) => TypeKind::Generic,
            Type::Reference(_) => TypeKind::Reference,
            Type::Tuple(_) => TypeKind::Tuple,
            Type::Union(_) => TypeKind::Union,
            Type::Intersection(_) => TypeKind::Intersection,
            Type::TypeParameter(_) => TypeKind::TypeParameter,
            Type::ThisType(_) => TypeKind::ThisType,
            Type::Index(_) => TypeKind::Index,
            Type::IndexedAccess(_) => TypeKind::IndexedAccess,
            Type::Anonymous => TypeKind::Anonymous,
            Type::Placeholder(_) => return None,
        })
    }

    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Type::Placeholder(_))
    }

    /// The interface-shaped members of interfaces, classes and generics.
    pub const fn interface_shape(&self) -> Option<&InterfaceShape> {
        match self {
            Type::Interface(shape) => Some(shape),
            Type::Class(class) => Some(&class.shape),
            Type::Generic(generic) => Some(&generic.shape),
            _ => None,
        }
    }

    pub const fn as_class(&self) -> Option<&ClassType> {
        match self {
            Type::Class(class) => Some(class),
            _ => None,
        }
    }
}

// =============================================================================
// Signatures
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_id: TypeId,
}

/// A call or construct signature.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub type_parameters: Vec<TypeId>,
    pub parameters: Vec<Parameter>,
    pub resolved_return_type: TypeId,
    pub min_argument_count: u32,
    pub has_rest_parameter: bool,
    pub has_string_literals: bool,
    /// The signature this one was instantiated from. May be the signature itself.
    pub target: Option<SignatureId>,
    pub union_signatures: Vec<SignatureId>,
    pub isolated_signature_type: Option<TypeId>,
}

impl Signature {
    /// A signature with no parameters returning `return_type`.
    pub const fn returning(return_type: TypeId) -> Self {
        Self {
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            resolved_return_type: return_type,
            min_argument_count: 0,
            has_rest_parameter: false,
            has_string_literals: false,
            target: None,
            union_signatures: Vec::new(),
            isolated_signature_type: None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
