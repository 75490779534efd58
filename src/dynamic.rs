//! Records described at runtime by a [`TypeDesc::Record`].

use smol_str::SmolStr;

use crate::schema::Schema;
use crate::types::{TypeDesc, Value};
use crate::{Error, Result};

/// Field values in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynRecord {
    fields: Vec<(SmolStr, Value)>,
}

impl DynRecord {
    /// A record holding the zero value of every field.
    pub fn zeroed(fields: &[(SmolStr, TypeDesc)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(name, desc)| (name.clone(), Value::zero(desc)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect(),
        )
    }

    fn set(&mut self, index: usize, value: Value) -> Result<()> {
        match self.fields.get_mut(index) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::invalid_target(format!(
                "record has no field at position {index}"
            ))),
        }
    }
}

/// Schema and zeroed prototype for a runtime record description.
///
/// Anything other than [`TypeDesc::Record`] is rejected.
pub(crate) fn dynamic_schema(target: &TypeDesc) -> Result<(Schema<DynRecord>, DynRecord)> {
    let Some(fields) = target.record_fields() else {
        return Err(Error::invalid_target(format!(
            "invalid data input type {target}, expected a record"
        )));
    };
    let schema = fields
        .iter()
        .enumerate()
        .fold(Schema::<DynRecord>::new(), |schema, (index, (name, desc))| {
            schema.field_with(name.clone(), desc.clone(), move |record: &mut DynRecord, value| {
                record.set(index, value)
            })
        });
    Ok((schema, DynRecord::zeroed(fields)))
}
