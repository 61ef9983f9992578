//! Reader for serialized TypeScript environment specs.
//!
//! A spec is a JSON object whose `data` array holds one type record per id,
//! plus named-type catalogs and a location map. Loading decodes every record,
//! resolves every id reference through [`tsenv_types::TypeResolver`], and
//! returns a [`Spec`] whose graph holds no placeholders.
//!
//! ```ignore
//! let spec = tsenv_reader::load_from_path("lib.d.json")?;
//! let array = spec.lookup(&["Array"]);
//! ```

mod catalog;
mod decode;
pub mod error;
mod loader;
pub mod options;
mod raw;
mod spec;

pub use catalog::NamedTypes;
pub use error::SpecError;
pub use loader::{SpecReader, load_from_path, load_from_str};
pub use options::{NullRecordPolicy, ReaderOptions};
pub use spec::{Locations, Spec, TypeLocation};
