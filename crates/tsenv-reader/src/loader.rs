//! Load entry points.
//!
//! A load is one batch: parse the top-level object, decode and register every
//! record, resolve once, then assemble the catalogs and the global node.

use crate::catalog::RawCatalog;
use crate::decode::{decode_record, required_id};
use crate::error::SpecError;
use crate::options::{NullRecordPolicy, ReaderOptions};
use crate::raw::RawLocation;
use crate::spec::{Locations, Spec, TypeLocation};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{Level, debug, span, trace};
use tsenv_types::{InterfaceShape, PropertyMap, SpecId, Type, TypeResolver};

/// Load a spec from its JSON text with default options.
pub fn load_from_str(text: &str) -> Result<Spec, SpecError> {
    SpecReader::default().read_str(text)
}

/// Load a spec from a JSON file with default options.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Spec, SpecError> {
    SpecReader::default().read_path(path)
}

#[derive(Clone, Debug, Default)]
pub struct SpecReader {
    options: ReaderOptions,
}

impl SpecReader {
    pub const fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Spec, SpecError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "SpecReader::read_path");
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Spec, SpecError> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| SpecError::malformed("$", err.to_string()))?;
        self.read_value(&value)
    }

    pub fn read_value(&self, value: &Value) -> Result<Spec, SpecError> {
        let Value::Object(top) = value else {
            return Err(SpecError::malformed("$", "top level is not an object"));
        };
        let Some(data) = top.get("data") else {
            return Err(SpecError::malformed("data", "missing required field"));
        };
        let Value::Array(records) = data else {
            return Err(SpecError::malformed("data", "not an array"));
        };
        let _span = span!(Level::DEBUG, "read_spec", records = records.len()).entered();

        let globals = RawCatalog::parse(required(top, "globals")?, "globals")?;
        let types = RawCatalog::parse(required(top, "types")?, "types")?;
        let ambient = match present(top, "ambient") {
            Some(value) => RawCatalog::parse(value, "ambient")?,
            None => RawCatalog::default(),
        };
        let locations = match present(top, "locations") {
            Some(value) => raw_locations(value)?,
            None => Vec::new(),
        };

        let mut resolver = TypeResolver::new();
        self.collect(&mut resolver, records)?;
        resolver.resolve_all()?;

        let globals = globals.resolve(&mut resolver, "globals")?;
        let types = types.resolve(&mut resolver, "types")?;
        let ambient = ambient.resolve(&mut resolver, "ambient")?;
        let mut resolved_locations = Locations::new();
        for (file, key, location) in locations {
            let type_id = resolver.resolve(location.id)?;
            resolved_locations.entry(file).or_default().insert(
                key,
                TypeLocation {
                    type_id,
                    kind: location.kind,
                    debug: location.debug,
                },
            );
        }

        let mut graph = resolver.into_graph()?;

        let mut properties = PropertyMap::with_capacity(globals.len());
        for (path, type_id) in globals.iter() {
            match path {
                [name] => {
                    properties.insert(name.clone(), type_id);
                }
                _ if self.options.require_flat_globals => {
                    return Err(SpecError::invariant(format!(
                        "global `{}` has a qualified name of length {}, expected 1",
                        path.join("."),
                        path.len()
                    )));
                }
                _ => trace!(name = %path.join("."), "qualified global left out of the global node"),
            }
        }
        let global = graph.alloc(Type::Interface(InterfaceShape {
            declared_properties: properties,
            ..InterfaceShape::default()
        }));

        let roots = globals
            .type_ids()
            .chain(types.type_ids())
            .chain(ambient.type_ids())
            .chain(
                resolved_locations
                    .values()
                    .flat_map(|file| file.values().map(|location| location.type_id)),
            )
            .chain(std::iter::once(global));
        if let Some(placeholder) = graph.find_placeholder(roots) {
            return Err(SpecError::invariant(format!(
                "node {placeholder} is still a placeholder after resolution"
            )));
        }

        debug!(
            nodes = graph.len(),
            globals = globals.len(),
            types = types.len(),
            ambient = ambient.len(),
            files = resolved_locations.len(),
            "SpecReader::assemble"
        );
        Ok(Spec {
            graph,
            global,
            globals,
            types,
            ambient,
            locations: resolved_locations,
        })
    }

    /// Decode and register every record; a record's position is its id.
    fn collect(&self, resolver: &mut TypeResolver, records: &[Value]) -> Result<(), SpecError> {
        let mut skipped = 0usize;
        for (index, record) in records.iter().enumerate() {
            let id = u32::try_from(index)
                .map(SpecId)
                .map_err(|_| SpecError::malformed("data", "too many records"))?;
            if record.is_null() {
                match self.options.null_records {
                    NullRecordPolicy::Reject => {
                        return Err(SpecError::malformed(format!("data[{id}]"), "record is null"));
                    }
                    NullRecordPolicy::Skip => {
                        trace!(spec_id = id.0, "skipping null record");
                        skipped += 1;
                        continue;
                    }
                }
            }
            let ty = decode_record(resolver, id, record)?;
            resolver.register(id, ty)?;
        }
        debug!(
            registered = resolver.registered_count(),
            skipped, "SpecReader::collect"
        );
        Ok(())
    }
}

fn required<'a>(top: &'a Map<String, Value>, field: &str) -> Result<&'a Value, SpecError> {
    present(top, field).ok_or_else(|| SpecError::malformed(field, "missing required field"))
}

/// A top-level field, treating `null` as absent.
fn present<'a>(top: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    top.get(field).filter(|value| !value.is_null())
}

struct PendingLocation {
    id: SpecId,
    kind: String,
    debug: String,
}

fn raw_locations(value: &Value) -> Result<Vec<(String, String, PendingLocation)>, SpecError> {
    let raw = IndexMap::<String, IndexMap<String, RawLocation>>::deserialize(value)
        .map_err(|err| SpecError::malformed("locations", err.to_string()))?;
    let mut locations = Vec::new();
    for (file, entries) in raw {
        for (key, location) in entries {
            let id = required_id(location.type_id, &format!("locations.{file}.{key}"))?;
            locations.push((
                file.clone(),
                key,
                PendingLocation {
                    id,
                    kind: location.kind,
                    debug: location.debug,
                },
            ));
        }
    }
    Ok(locations)
}

#[cfg(test)]
#[path = "../tests/loader_tests.rs"]
mod tests;
