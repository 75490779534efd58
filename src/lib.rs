//! Load small reference tables from delimited text into typed records.
//!
//! The first row names the columns; every following row becomes one record
//! keyed by the raw text of its first cell. Columns are matched to fields by
//! case-insensitive name and each cell is parsed according to the field's
//! declared type, including inline map `(k:v,...)` and list `(a,b,...)`
//! literals. A cell that does not parse leaves its field at the default.
//!
//! # Examples
//! ```
//! use reftable::Schema;
//!
//! #[derive(Default)]
//! struct Item {
//!     name: String,
//!     price: u32,
//!     tags: Vec<String>,
//! }
//!
//! let schema = Schema::<Item>::new()
//!     .field("Name", |item: &mut Item| &mut item.name)
//!     .field("Price", |item: &mut Item| &mut item.price)
//!     .field("Tags", |item: &mut Item| &mut item.tags);
//!
//! let table = reftable::from_str("id,NAME,price,tags\n7,apple,12,\"(red,green)\"\n", &schema)?;
//! let item = &table["7"];
//! assert_eq!(item.name, "apple");
//! assert_eq!(item.price, 12);
//! assert_eq!(item.tags, ["red", "green"]);
//! # Ok::<(), reftable::Error>(())
//! ```

pub mod dynamic;
pub mod error;
pub mod load;
pub mod options;
pub mod parse;
pub mod schema;
pub mod types;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use crate::dynamic::DynRecord;
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::load::{Formats, RowReader, Table};
pub use crate::options::{Delimiter, LoadOptions};
pub use crate::parse::{ParseFn, Registry};
pub use crate::schema::{Column, FieldDescriptor, Record, RecordSchema, Schema};
pub use crate::types::{FieldKind, TypeDesc, Value, ValueMap};

pub type Result<T> = std::result::Result<T, Error>;

pub fn from_reader<R: Default, In: Read>(reader: In, schema: &Schema<R>) -> Result<Table<R>> {
    from_reader_with_options(reader, schema, &LoadOptions::default())
}

pub fn from_reader_with_options<R: Default, In: Read>(
    reader: In,
    schema: &Schema<R>,
    options: &LoadOptions,
) -> Result<Table<R>> {
    load::from_reader_with_registry(reader, schema, options, Registry::global())
}

pub fn from_str<R: Default>(input: &str, schema: &Schema<R>) -> Result<Table<R>> {
    from_reader(input.as_bytes(), schema)
}

pub fn from_str_with_options<R: Default>(
    input: &str,
    schema: &Schema<R>,
    options: &LoadOptions,
) -> Result<Table<R>> {
    from_reader_with_options(input.as_bytes(), schema, options)
}

/// Load against a record described at runtime.
///
/// `target` must be a [`TypeDesc::Record`]; anything else fails with
/// [`ErrorKind::InvalidTargetSchema`] before the reader is touched.
pub fn from_reader_dynamic<In: Read>(reader: In, target: &TypeDesc) -> Result<Table<DynRecord>> {
    from_reader_dynamic_with_options(reader, target, &LoadOptions::default())
}

pub fn from_reader_dynamic_with_options<In: Read>(
    mut reader: In,
    target: &TypeDesc,
    options: &LoadOptions,
) -> Result<Table<DynRecord>> {
    let (schema, prototype) = dynamic::dynamic_schema(target)?;
    let rows = load::read_rows(&mut reader, options)?;
    Ok(load::materialize(rows, &schema, Registry::global(), || {
        prototype.clone()
    }))
}

/// Load a file, choosing the row reader by its extension.
pub fn load_path<R: Default>(path: impl AsRef<Path>, schema: &Schema<R>) -> Result<Table<R>> {
    load_path_with(path, schema, &LoadOptions::default(), &Formats::default())
}

pub fn load_path_with<R: Default>(
    path: impl AsRef<Path>,
    schema: &Schema<R>,
    options: &LoadOptions,
    formats: &Formats,
) -> Result<Table<R>> {
    let rows = read_path(path.as_ref(), options, formats)?;
    Ok(load::materialize(rows, schema, Registry::global(), R::default))
}

pub fn load_path_dynamic(
    path: impl AsRef<Path>,
    target: &TypeDesc,
    options: &LoadOptions,
    formats: &Formats,
) -> Result<Table<DynRecord>> {
    let (schema, prototype) = dynamic::dynamic_schema(target)?;
    let rows = read_path(path.as_ref(), options, formats)?;
    Ok(load::materialize(rows, &schema, Registry::global(), || {
        prototype.clone()
    }))
}

pub fn load_record_path<R: Record>(path: impl AsRef<Path>) -> Result<Table<R>> {
    load_path(path, &R::schema())
}

/// Load a file that the process cannot run without.
///
/// # Panics
///
/// Panics with the file name and the underlying error when loading fails.
pub fn must_load<R: Default>(path: impl AsRef<Path>, schema: &Schema<R>) -> Table<R> {
    let path = path.as_ref();
    match load_path(path, schema) {
        Ok(table) => table,
        Err(err) => panic!("error: data file {}, {err}", path.display()),
    }
}

/// # Panics
///
/// See [`must_load`].
pub fn must_load_record<R: Record>(path: impl AsRef<Path>) -> Table<R> {
    must_load(path, &R::schema())
}

fn read_path(
    path: &Path,
    options: &LoadOptions,
    formats: &Formats,
) -> Result<Vec<csv::StringRecord>> {
    let row_reader = formats.for_path(path)?;
    let file = File::open(path)
        .map_err(|err| Error::io(format!("failed to open {}: {err}", path.display())))?;
    tracing::debug!(path = %path.display(), "loading table");
    row_reader(&mut BufReader::new(file), options)
}
