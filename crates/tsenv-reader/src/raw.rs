//! Serialized record layouts.
//!
//! Each struct mirrors the fields one `kind` carries. References are raw
//! integer ids; the dispatcher turns them into handles through the resolver.
//! Producers write `-1` for an absent optional reference.

use indexmap::IndexMap;
use serde::Deserialize;

pub(crate) type RawId = i64;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawInterface {
    #[serde(default)]
    pub type_parameters: Vec<RawId>,
    #[serde(default)]
    pub base_types: Vec<RawId>,
    #[serde(default)]
    pub declared_properties: IndexMap<String, RawId>,
    #[serde(default)]
    pub declared_call_signatures: Vec<RawSignature>,
    #[serde(default)]
    pub declared_construct_signatures: Vec<RawSignature>,
    #[serde(default)]
    pub declared_string_index_type: Option<RawId>,
    #[serde(default)]
    pub declared_number_index_type: Option<RawId>,
}

/// Both historical class layouts: interface-shaped, and split into instance
/// and static members with constructors under `signatures`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawClass {
    #[serde(flatten)]
    pub interface: RawInterface,
    #[serde(default)]
    pub instance_properties: Option<IndexMap<String, RawId>>,
    #[serde(default)]
    pub static_properties: IndexMap<String, RawId>,
    #[serde(default)]
    pub signatures: Option<Vec<RawSignature>>,
    #[serde(default)]
    pub target: Option<RawId>,
    #[serde(default)]
    pub type_arguments: Vec<RawId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawGeneric {
    #[serde(flatten)]
    pub interface: RawInterface,
    pub target: RawId,
    #[serde(default)]
    pub type_arguments: Vec<RawId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawReference {
    pub target: RawId,
    #[serde(default)]
    pub type_arguments: Vec<RawId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawClassInstance {
    pub class_type: RawId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTuple {
    #[serde(default)]
    pub element_types: Vec<RawId>,
    #[serde(default)]
    pub min_length: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawElements {
    #[serde(default)]
    pub elements: Vec<RawId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawConstrained {
    #[serde(default)]
    pub constraint: Option<RawId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIndex {
    #[serde(rename = "type")]
    pub type_id: RawId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawIndexedAccess {
    pub object_type: RawId,
    pub index_type: RawId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStringLiteral {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBooleanLiteral {
    pub value: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNumberLiteral {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSignature {
    #[serde(default)]
    pub type_parameters: Vec<RawId>,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    pub resolved_return_type: RawId,
    #[serde(default)]
    pub min_argument_count: u32,
    #[serde(default)]
    pub has_rest_parameter: bool,
    #[serde(default)]
    pub has_string_literals: bool,
    #[serde(default)]
    pub target: Option<Box<RawSignature>>,
    #[serde(default)]
    pub union_signatures: Vec<RawSignature>,
    #[serde(default)]
    pub isolated_signature_type: Option<RawId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_id: RawId,
}

/// One entry of a flat named-type catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNamedType {
    #[serde(rename = "type")]
    pub type_id: RawId,
    pub q_name: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLocation {
    pub kind: String,
    #[serde(rename = "type")]
    pub type_id: RawId,
    #[serde(default)]
    pub debug: String,
}
