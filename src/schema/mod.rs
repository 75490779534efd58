//! Record descriptions supplied by the caller.

mod column;
mod header;

use std::fmt;

use smol_str::SmolStr;

pub use column::Column;
pub use header::{column_index, index_header, lowercase_header, FieldDescriptor, RecordSchema};

use crate::types::{TypeDesc, Value};
use crate::Result;

type Assign<R> = Box<dyn Fn(&mut R, Value) -> Result<()> + Send + Sync>;

struct FieldSpec<R> {
    name: SmolStr,
    desc: TypeDesc,
    assign: Assign<R>,
}

/// Ordered list of a record's fields: name, declared type and setter.
///
/// # Examples
/// ```
/// use reftable::Schema;
///
/// #[derive(Default)]
/// struct Item {
///     name: String,
///     price: u32,
/// }
///
/// let schema = Schema::<Item>::new()
///     .field("Name", |item: &mut Item| &mut item.name)
///     .field("Price", |item: &mut Item| &mut item.price);
/// assert_eq!(schema.len(), 2);
/// ```
pub struct Schema<R> {
    fields: Vec<FieldSpec<R>>,
}

impl<R> Schema<R> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field whose type description comes from its Rust type.
    pub fn field<T, A>(self, name: impl Into<SmolStr>, access: A) -> Self
    where
        T: Column + 'static,
        A: Fn(&mut R) -> &mut T + Send + Sync + 'static,
    {
        self.field_with(name, T::type_desc(), move |record: &mut R, value| {
            *access(record) = T::from_value(value)?;
            Ok(())
        })
    }

    /// Add a field with an explicit type description and setter.
    pub fn field_with<F>(mut self, name: impl Into<SmolStr>, desc: TypeDesc, assign: F) -> Self
    where
        F: Fn(&mut R, Value) -> Result<()> + Send + Sync + 'static,
    {
        self.fields.push(FieldSpec {
            name: name.into(),
            desc,
            assign: Box::new(assign),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// The record as a [`TypeDesc::Record`].
    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::Record(
            self.fields
                .iter()
                .map(|field| (field.name.clone(), field.desc.clone()))
                .collect(),
        )
    }

    pub(crate) fn resolve(&self, header: &mut [String]) -> RecordSchema {
        RecordSchema::build(
            self.fields
                .iter()
                .map(|field| (field.name.as_str(), &field.desc)),
            header,
        )
    }

    pub(crate) fn assign(&self, index: usize, record: &mut R, value: Value) -> Result<()> {
        (self.fields[index].assign)(record, value)
    }
}

impl<R> Default for Schema<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|field| (&field.name, &field.desc)))
            .finish()
    }
}

/// A record type that carries its own schema.
pub trait Record: Default {
    fn schema() -> Schema<Self>;
}
