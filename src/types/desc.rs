use std::fmt;

use smol_str::SmolStr;

/// Declared type of a record field.
///
/// This stands in for runtime type inspection: callers describe their record
/// up front, either by hand or through [`Column::type_desc`](crate::Column).
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    Bool,
    /// Platform-width signed integer.
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-width unsigned integer.
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Map(Box<TypeDesc>, Box<TypeDesc>),
    Slice(Box<TypeDesc>),
    /// A record: named fields in declaration order.
    Record(Vec<(SmolStr, TypeDesc)>),
    /// Any type no cell can be coerced into.
    Unsupported(SmolStr),
}

impl TypeDesc {
    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map(Box::new(key), Box::new(value))
    }

    pub fn slice(element: TypeDesc) -> Self {
        TypeDesc::Slice(Box::new(element))
    }

    pub fn record<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, TypeDesc)>,
        N: Into<SmolStr>,
    {
        TypeDesc::Record(
            fields
                .into_iter()
                .map(|(name, desc)| (name.into(), desc))
                .collect(),
        )
    }

    pub fn record_fields(&self) -> Option<&[(SmolStr, TypeDesc)]> {
        match self {
            TypeDesc::Record(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }

    /// Parse the textual type grammar used by the command line:
    /// `bool`, `int`..`int64`, `uint`..`uint64`, `float32`, `float64`,
    /// `string`, `map<K,V>`, `list<T>`. Unknown names become `Unsupported`.
    pub fn parse(text: &str) -> TypeDesc {
        let text = text.trim();
        if let Some(inner) = generic_args(text, "map") {
            if let Some((key, value)) = split_top_level(inner) {
                return TypeDesc::map(TypeDesc::parse(key), TypeDesc::parse(value));
            }
            return TypeDesc::Unsupported(SmolStr::new(text));
        }
        if let Some(inner) = generic_args(text, "list") {
            return TypeDesc::slice(TypeDesc::parse(inner));
        }
        match text.to_ascii_lowercase().as_str() {
            "bool" => TypeDesc::Bool,
            "int" => TypeDesc::Int,
            "int8" => TypeDesc::Int8,
            "int16" => TypeDesc::Int16,
            "int32" => TypeDesc::Int32,
            "int64" => TypeDesc::Int64,
            "uint" => TypeDesc::Uint,
            "uint8" => TypeDesc::Uint8,
            "uint16" => TypeDesc::Uint16,
            "uint32" => TypeDesc::Uint32,
            "uint64" => TypeDesc::Uint64,
            "float32" => TypeDesc::Float32,
            "float64" => TypeDesc::Float64,
            "string" => TypeDesc::String,
            _ => TypeDesc::Unsupported(SmolStr::new(text)),
        }
    }
}

fn generic_args<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(name)?;
    rest.strip_prefix('<')?.strip_suffix('>')
}

// Split `K,V` on the first comma that is not nested inside `<...>`.
fn split_top_level(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some((&text[..idx], &text[idx + 1..])),
            _ => {}
        }
    }
    None
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Map(key, value) => write!(f, "map<{key},{value}>"),
            TypeDesc::Slice(element) => write!(f, "list<{element}>"),
            TypeDesc::Record(fields) => {
                f.write_str("record{")?;
                for (idx, (name, desc)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{name}:{desc}")?;
                }
                f.write_str("}")
            }
            TypeDesc::Unsupported(name) => f.write_str(name),
            scalar => f.write_str(crate::FieldKind::classify(scalar).as_str()),
        }
    }
}
