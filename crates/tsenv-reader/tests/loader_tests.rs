use super::*;
use serde_json::json;
use std::io::Write;
use tsenv_types::TypeId;

fn load(value: Value) -> Result<Spec, SpecError> {
    SpecReader::default().read_value(&value)
}

fn spec_with(data: Value, globals: Value) -> Value {
    json!({"data": data, "globals": globals, "types": []})
}

fn base_types(spec: &Spec, id: TypeId) -> Vec<TypeId> {
    spec.graph()
        .get(id)
        .interface_shape()
        .unwrap()
        .base_types
        .clone()
}

#[test]
fn test_self_reference_keeps_identity() {
    let spec = load(spec_with(
        json!([{"kind": "Interface", "baseTypes": [0]}]),
        json!({"X": 0}),
    ))
    .unwrap();
    let x = spec.globals().get(&["X"]).unwrap();
    assert_eq!(base_types(&spec, x), vec![x]);

    let global = spec.graph().get(spec.global()).interface_shape().unwrap();
    assert_eq!(global.declared_properties["X"], x);
    assert!(global.base_types.is_empty());
    assert!(global.declared_call_signatures.is_empty());
    assert_eq!(global.declared_string_index_type, None);
}

#[test]
fn test_mutual_cycle_terminates() {
    let spec = load(spec_with(
        json!([
            {"kind": "Interface", "baseTypes": [1]},
            {"kind": "Interface", "baseTypes": [0]},
        ]),
        json!({"A": 0, "B": 1}),
    ))
    .unwrap();
    let a = spec.globals().get(&["A"]).unwrap();
    let b = spec.globals().get(&["B"]).unwrap();
    assert_eq!(base_types(&spec, a), vec![b]);
    assert_eq!(base_types(&spec, b), vec![a]);
}

#[test]
fn test_literals_round_trip_through_load() {
    let spec = load(spec_with(
        json!([
            {"kind": "StringLiteral", "text": "abc"},
            {"kind": "NumberLiteral", "value": 3.5},
        ]),
        json!({"s": 0, "n": 1}),
    ))
    .unwrap();
    let s = spec.globals().get(&["s"]).unwrap();
    let n = spec.globals().get(&["n"]).unwrap();
    assert_eq!(spec.graph().get(s), &Type::StringLiteral("abc".to_string()));
    assert_eq!(spec.graph().get(n), &Type::NumberLiteral(3.5));
}

fn six_records() -> Value {
    json!([
        {"kind": "Any"},
        {"kind": "Any"},
        {"kind": "Any"},
        {"kind": "Any"},
        {"kind": "Any"},
        {"kind": "Interface"},
    ])
}

#[test]
fn test_qualified_global_is_an_invariant_violation() {
    let err = load(spec_with(six_records(), json!({"a": {"b": 5}}))).unwrap_err();
    assert!(
        matches!(err, SpecError::InvariantViolation { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn test_qualified_global_allowed_by_options() {
    let reader = SpecReader::new(ReaderOptions {
        require_flat_globals: false,
        ..ReaderOptions::default()
    });
    let spec = reader
        .read_value(&spec_with(six_records(), json!({"a": {"b": 5}, "c": 0})))
        .unwrap();
    assert_eq!(spec.globals().len(), 2);
    assert!(spec.globals().get(&["a", "b"]).is_some());
    let global = spec.graph().get(spec.global()).interface_shape().unwrap();
    assert_eq!(
        global.declared_properties.keys().collect::<Vec<_>>(),
        vec!["c"]
    );
}

#[test]
fn test_types_tree_is_flattened() {
    let spec = load(json!({
        "data": six_records(),
        "globals": [],
        "types": {"a": {"b": 5}},
    }))
    .unwrap();
    let entries: Vec<Vec<String>> = spec.types().iter().map(|(path, _)| path.to_vec()).collect();
    assert_eq!(entries, vec![vec!["a".to_string(), "b".to_string()]]);
    assert_eq!(spec.lookup(&["a", "b"]), spec.graph().by_spec_id(SpecId(5)));
}

#[test]
fn test_duplicate_qualified_name_keeps_last() {
    let spec = load(json!({
        "data": [{"kind": "String"}, {"kind": "Number"}],
        "globals": [],
        "types": [
            {"type": 0, "qName": ["T"]},
            {"type": 1, "qName": ["T"]},
        ],
    }))
    .unwrap();
    assert_eq!(spec.types().len(), 1);
    let t = spec.lookup(&["T"]).unwrap();
    assert_eq!(spec.graph().get(t), &Type::Simple(tsenv_types::SimpleKind::Number));
}

#[test]
fn test_null_record_is_rejected_by_default() {
    let err = load(spec_with(json!([{"kind": "Any"}, null]), json!({}))).unwrap_err();
    match err {
        SpecError::MalformedSpec { at, .. } => assert_eq!(at, "data[1]"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_skipped_null_record_stays_unresolved() {
    let reader = SpecReader::new(ReaderOptions {
        null_records: NullRecordPolicy::Skip,
        ..ReaderOptions::default()
    });
    let spec = reader
        .read_value(&spec_with(json!([{"kind": "Any"}, null]), json!({"x": 0})))
        .unwrap();
    assert_eq!(spec.graph().by_spec_id(SpecId(1)), None);

    let err = reader
        .read_value(&spec_with(
            json!([{"kind": "Union", "elements": [1]}, null]),
            json!({}),
        ))
        .unwrap_err();
    assert!(matches!(err, SpecError::UnresolvedId { id: SpecId(1) }));
}

#[test]
fn test_dangling_reference_fails_the_load() {
    let err = load(spec_with(
        json!([{"kind": "Interface", "baseTypes": [9]}]),
        json!({"X": 0}),
    ))
    .unwrap_err();
    assert!(matches!(err, SpecError::UnresolvedId { id: SpecId(9) }));

    let err = load(spec_with(json!([{"kind": "Any"}]), json!({"X": 4}))).unwrap_err();
    assert!(matches!(err, SpecError::UnresolvedId { id: SpecId(4) }));
}

#[test]
fn test_unknown_kind_fails_the_load() {
    let err = load(spec_with(
        json!([{"kind": "Any"}, {"kind": "Conditional"}]),
        json!({}),
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        SpecError::UnknownKind { id: SpecId(1), ref kind } if kind == "Conditional"
    ));
}

#[test]
fn test_required_sections() {
    for missing in ["data", "globals", "types"] {
        let mut value = json!({"data": [], "globals": [], "types": []});
        value.as_object_mut().unwrap().remove(missing);
        match load(value) {
            Err(SpecError::MalformedSpec { at, .. }) => assert_eq!(at, missing),
            other => panic!("missing {missing}: unexpected result {other:?}"),
        }
    }
    assert!(matches!(
        load(json!({"data": {}, "globals": [], "types": []})),
        Err(SpecError::MalformedSpec { .. })
    ));
    assert!(matches!(
        load(json!([])),
        Err(SpecError::MalformedSpec { .. })
    ));
}

#[test]
fn test_optional_sections_default_to_empty() {
    let spec = load(json!({"data": [], "globals": [], "types": [], "ambient": null})).unwrap();
    assert!(spec.ambient().is_empty());
    assert!(spec.locations().is_empty());
    assert!(spec.types().is_empty());
}

#[test]
fn test_ambient_and_locations() {
    let spec = load(json!({
        "data": [{"kind": "Class"}, {"kind": "Interface"}],
        "globals": [],
        "types": [],
        "ambient": {"fs": {"Stats": 0}},
        "locations": {
            "lib/a.ts": {
                "1:4": {"kind": "class", "type": 0, "debug": "class A"},
                "9:2": {"kind": "interface", "type": 1},
            },
        },
    }))
    .unwrap();
    let stats = spec.ambient().get(&["fs", "Stats"]).unwrap();
    assert!(spec.graph().get(stats).as_class().is_some());

    let file = &spec.locations()["lib/a.ts"];
    assert_eq!(file.len(), 2);
    assert_eq!(file["1:4"].type_id, stats);
    assert_eq!(file["1:4"].kind, "class");
    assert_eq!(file["1:4"].debug, "class A");
    assert_eq!(file["9:2"].debug, "");
}

#[test]
fn test_no_placeholder_reachable_after_load() {
    let spec = load(json!({
        "data": [
            {"kind": "Interface", "baseTypes": [2], "declaredProperties": {"self": 0}},
            {"kind": "Class", "signatures": [{
                "resolvedReturnType": 3,
                "parameters": [{"name": "a", "type": 0}],
                "target": {"resolvedReturnType": 1},
            }]},
            {"kind": "Reference", "target": 1, "typeArguments": [3]},
            {"kind": "Tuple", "elementTypes": [0, 1, 2]},
        ],
        "globals": {"I": 0},
        "types": [{"type": 1, "qName": ["C"]}],
        "ambient": {"T": 3},
    }))
    .unwrap();
    let roots = spec
        .globals()
        .type_ids()
        .chain(spec.types().type_ids())
        .chain(spec.ambient().type_ids())
        .chain([spec.global()]);
    assert_eq!(spec.graph().find_placeholder(roots), None);
}

#[test]
fn test_derived_views_through_spec() {
    let mut spec = load(spec_with(
        json!([
            {"kind": "Class", "instanceProperties": {"x": 1}, "staticProperties": {"make": 1}},
            {"kind": "Number"},
        ]),
        json!({"C": 0}),
    ))
    .unwrap();
    let class = spec.globals().get(&["C"]).unwrap();
    let view = spec.graph_mut().instance_type(class).unwrap();
    assert_eq!(spec.graph_mut().instance_type(class), Some(view));
    let shape = spec.graph().get(view).interface_shape().unwrap();
    assert_eq!(shape.declared_properties.keys().collect::<Vec<_>>(), vec!["x"]);
}

#[test]
fn test_load_from_str_and_invalid_json() {
    let text = r#"{"data": [{"kind": "Boolean"}], "globals": {"b": 0}, "types": []}"#;
    let spec = load_from_str(text).unwrap();
    assert!(spec.globals().get(&["b"]).is_some());

    match load_from_str("{\"data\": [") {
        Err(SpecError::MalformedSpec { at, .. }) => assert_eq!(at, "$"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        spec_with(json!([{"kind": "Symbol"}]), json!({"sym": 0}))
    )
    .unwrap();
    let spec = load_from_path(file.path()).unwrap();
    let sym = spec.globals().get(&["sym"]).unwrap();
    assert_eq!(spec.graph().get(sym), &Type::Simple(tsenv_types::SimpleKind::Symbol));
}

#[test]
fn test_load_from_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    match load_from_path(&path) {
        Err(SpecError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_reader_options_from_json() {
    let options = ReaderOptions::from_json(r#"{"nullRecords": "skip"}"#).unwrap();
    assert_eq!(
        options,
        ReaderOptions {
            require_flat_globals: true,
            null_records: NullRecordPolicy::Skip,
        }
    );
    let options = ReaderOptions::from_json(r#"{"requireFlatGlobals": false}"#).unwrap();
    assert!(!options.require_flat_globals);
    assert_eq!(options.null_records, NullRecordPolicy::Reject);
    assert!(ReaderOptions::from_json(r#"{"nullRecords": "ignore"}"#).is_err());
}

#[test]
fn test_load_under_trace_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    let spec = tracing::subscriber::with_default(subscriber, || {
        load(json!({
            "data": [{"kind": "Interface", "baseTypes": [0]}, {"kind": "Any"}],
            "globals": {"X": 0},
            "types": [{"type": 1, "qName": ["A"]}, {"type": 0, "qName": ["A"]}],
        }))
    })
    .unwrap();
    assert_eq!(spec.lookup(&["A"]), spec.globals().get(&["X"]));
}
