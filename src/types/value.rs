use std::fmt;

use itoa::Buffer as ItoaBuffer;
use ryu::Buffer as RyuBuffer;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

use crate::types::TypeDesc;

/// A parsed cell.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Default for fields no cell can populate.
    #[default]
    Null,
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Map(ValueMap),
    Slice(Vec<Value>),
}

/// Insertion-ordered map of parsed values. Inserting a key that is already
/// present replaces its value in place.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ValueMap {
    entries: Vec<(Value, Value)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the previous value when `key` was already present.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl IntoIterator for ValueMap {
    type Item = (Value, Value);
    type IntoIter = std::vec::IntoIter<(Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Value {
    /// Zero value for a declared type.
    pub fn zero(desc: &TypeDesc) -> Value {
        match desc {
            TypeDesc::Bool => Value::Bool(false),
            TypeDesc::Int => Value::Int(0),
            TypeDesc::Int8 => Value::Int8(0),
            TypeDesc::Int16 => Value::Int16(0),
            TypeDesc::Int32 => Value::Int32(0),
            TypeDesc::Int64 => Value::Int64(0),
            TypeDesc::Uint => Value::Uint(0),
            TypeDesc::Uint8 => Value::Uint8(0),
            TypeDesc::Uint16 => Value::Uint16(0),
            TypeDesc::Uint32 => Value::Uint32(0),
            TypeDesc::Uint64 => Value::Uint64(0),
            TypeDesc::Float32 => Value::Float32(0.0),
            TypeDesc::Float64 => Value::Float64(0.0),
            TypeDesc::String => Value::String(String::new()),
            TypeDesc::Map(..) => Value::Map(ValueMap::new()),
            TypeDesc::Slice(_) => Value::Slice(Vec::new()),
            TypeDesc::Record(_) | TypeDesc::Unsupported(_) => Value::Null,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any signed or unsigned integer that fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i as i64),
            Value::Int8(i) => Some(i.into()),
            Value::Int16(i) => Some(i.into()),
            Value::Int32(i) => Some(i.into()),
            Value::Int64(i) => Some(i),
            Value::Uint(u) => i64::try_from(u).ok(),
            Value::Uint8(u) => Some(u.into()),
            Value::Uint16(u) => Some(u.into()),
            Value::Uint32(u) => Some(u.into()),
            Value::Uint64(u) => i64::try_from(u).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float32(f) => Some(f.into()),
            Value::Float64(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Slice(items) => Some(items),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Uint(_) => "uint",
            Value::Uint8(_) => "uint8",
            Value::Uint16(_) => "uint16",
            Value::Uint32(_) => "uint32",
            Value::Uint64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Map(_) => "map",
            Value::Slice(_) => "slice",
        }
    }

    /// Render as JSON. Map keys are rendered to their text form; non-finite
    /// floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i as i64),
            Value::Int8(i) => JsonValue::from(*i),
            Value::Int16(i) => JsonValue::from(*i),
            Value::Int32(i) => JsonValue::from(*i),
            Value::Int64(i) => JsonValue::from(*i),
            Value::Uint(u) => JsonValue::from(*u as u64),
            Value::Uint8(u) => JsonValue::from(*u),
            Value::Uint16(u) => JsonValue::from(*u),
            Value::Uint32(u) => JsonValue::from(*u),
            Value::Uint64(u) => JsonValue::from(*u),
            Value::Float32(f) => float_to_json(f64::from(*f)),
            Value::Float64(f) => float_to_json(*f),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Map(map) => {
                let mut object = JsonMap::with_capacity(map.len());
                for (key, value) in map.iter() {
                    object.insert(key.key_text(), value.to_json());
                }
                JsonValue::Object(object)
            }
            Value::Slice(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    fn key_text(&self) -> String {
        let mut ints = ItoaBuffer::new();
        let mut floats = RyuBuffer::new();
        match self {
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => ints.format(*i).to_owned(),
            Value::Int8(i) => ints.format(*i).to_owned(),
            Value::Int16(i) => ints.format(*i).to_owned(),
            Value::Int32(i) => ints.format(*i).to_owned(),
            Value::Int64(i) => ints.format(*i).to_owned(),
            Value::Uint(u) => ints.format(*u).to_owned(),
            Value::Uint8(u) => ints.format(*u).to_owned(),
            Value::Uint16(u) => ints.format(*u).to_owned(),
            Value::Uint32(u) => ints.format(*u).to_owned(),
            Value::Uint64(u) => ints.format(*u).to_owned(),
            Value::Float32(f) => floats.format(*f).to_owned(),
            Value::Float64(f) => floats.format(*f).to_owned(),
            other => other.to_json().to_string(),
        }
    }
}

fn float_to_json(f: f64) -> JsonValue {
    JsonNumber::from_f64(f)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Map(map) => {
                write!(f, "(")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                write!(f, ")")
            }
            Value::Slice(items) => {
                write!(f, "(")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            scalar => f.write_str(&scalar.key_text()),
        }
    }
}
