use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use smol_str::SmolStr;

use crate::types::{TypeDesc, Value};
use crate::{Error, Result};

/// A Rust type that can back a record field.
///
/// `type_desc` tells the loader which parser to run; `from_value` moves the
/// parsed value into the field's own type.
pub trait Column: Sized {
    fn type_desc() -> TypeDesc;

    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! scalar_column {
    ($ty:ty, $desc:ident, $variant:ident, $label:literal) => {
        impl Column for $ty {
            fn type_desc() -> TypeDesc {
                TypeDesc::$desc
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(Error::type_mismatch($label, other.type_name())),
                }
            }
        }
    };
}

scalar_column!(bool, Bool, Bool, "bool");
scalar_column!(isize, Int, Int, "int");
scalar_column!(i8, Int8, Int8, "int8");
scalar_column!(i16, Int16, Int16, "int16");
scalar_column!(i32, Int32, Int32, "int32");
scalar_column!(i64, Int64, Int64, "int64");
scalar_column!(usize, Uint, Uint, "uint");
scalar_column!(u8, Uint8, Uint8, "uint8");
scalar_column!(u16, Uint16, Uint16, "uint16");
scalar_column!(u32, Uint32, Uint32, "uint32");
scalar_column!(u64, Uint64, Uint64, "uint64");
scalar_column!(f32, Float32, Float32, "float32");
scalar_column!(f64, Float64, Float64, "float64");
scalar_column!(String, String, String, "string");

impl Column for SmolStr {
    fn type_desc() -> TypeDesc {
        TypeDesc::String
    }

    fn from_value(value: Value) -> Result<Self> {
        String::from_value(value).map(SmolStr::from)
    }
}

impl<T: Column> Column for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::slice(T::type_desc())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Slice(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(Error::type_mismatch("slice", other.type_name())),
        }
    }
}

impl<K, V, S> Column for HashMap<K, V, S>
where
    K: Column + Eq + Hash,
    V: Column,
    S: BuildHasher + Default,
{
    fn type_desc() -> TypeDesc {
        TypeDesc::map(K::type_desc(), V::type_desc())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(map) => map
                .into_iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(Error::type_mismatch("map", other.type_name())),
        }
    }
}

impl<K, V> Column for BTreeMap<K, V>
where
    K: Column + Ord,
    V: Column,
{
    fn type_desc() -> TypeDesc {
        TypeDesc::map(K::type_desc(), V::type_desc())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(map) => map
                .into_iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(Error::type_mismatch("map", other.type_name())),
        }
    }
}

/// Optional fields have no cell syntax; they always keep `None`.
impl<T: Column> Column for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Unsupported(SmolStr::new_static("Option"))
    }

    fn from_value(value: Value) -> Result<Self> {
        Err(Error::unsupported(value.type_name()))
    }
}
