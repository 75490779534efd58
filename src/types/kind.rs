use std::fmt;

use crate::types::TypeDesc;

/// Closed set of value kinds the parser registry understands.
///
/// Anything a [`TypeDesc`] can express that is not listed here collapses to
/// [`FieldKind::Invalid`]; the failure only surfaces once a cell is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Map,
    Slice,
    String,
}

impl FieldKind {
    pub const COUNT: usize = 17;

    pub const ALL: [FieldKind; Self::COUNT] = [
        FieldKind::Invalid,
        FieldKind::Bool,
        FieldKind::Int,
        FieldKind::Int8,
        FieldKind::Int16,
        FieldKind::Int32,
        FieldKind::Int64,
        FieldKind::Uint,
        FieldKind::Uint8,
        FieldKind::Uint16,
        FieldKind::Uint32,
        FieldKind::Uint64,
        FieldKind::Float32,
        FieldKind::Float64,
        FieldKind::Map,
        FieldKind::Slice,
        FieldKind::String,
    ];

    /// Resolve the kind of a declared type. Never fails.
    pub fn classify(desc: &TypeDesc) -> FieldKind {
        match desc {
            TypeDesc::Bool => FieldKind::Bool,
            TypeDesc::Int => FieldKind::Int,
            TypeDesc::Int8 => FieldKind::Int8,
            TypeDesc::Int16 => FieldKind::Int16,
            TypeDesc::Int32 => FieldKind::Int32,
            TypeDesc::Int64 => FieldKind::Int64,
            TypeDesc::Uint => FieldKind::Uint,
            TypeDesc::Uint8 => FieldKind::Uint8,
            TypeDesc::Uint16 => FieldKind::Uint16,
            TypeDesc::Uint32 => FieldKind::Uint32,
            TypeDesc::Uint64 => FieldKind::Uint64,
            TypeDesc::Float32 => FieldKind::Float32,
            TypeDesc::Float64 => FieldKind::Float64,
            TypeDesc::String => FieldKind::String,
            TypeDesc::Map(..) => FieldKind::Map,
            TypeDesc::Slice(_) => FieldKind::Slice,
            TypeDesc::Record(_) | TypeDesc::Unsupported(_) => FieldKind::Invalid,
        }
    }

    /// Map and slice kinds keep their declared type for recursive parsing.
    pub fn is_composite(self) -> bool {
        matches!(self, FieldKind::Map | FieldKind::Slice)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Invalid => "invalid",
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::Int8 => "int8",
            FieldKind::Int16 => "int16",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Uint => "uint",
            FieldKind::Uint8 => "uint8",
            FieldKind::Uint16 => "uint16",
            FieldKind::Uint32 => "uint32",
            FieldKind::Uint64 => "uint64",
            FieldKind::Float32 => "float32",
            FieldKind::Float64 => "float64",
            FieldKind::Map => "map",
            FieldKind::Slice => "slice",
            FieldKind::String => "string",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(TypeDesc::Bool, FieldKind::Bool)]
    #[case(TypeDesc::Int, FieldKind::Int)]
    #[case(TypeDesc::Int8, FieldKind::Int8)]
    #[case(TypeDesc::Int64, FieldKind::Int64)]
    #[case(TypeDesc::Uint, FieldKind::Uint)]
    #[case(TypeDesc::Uint32, FieldKind::Uint32)]
    #[case(TypeDesc::Float32, FieldKind::Float32)]
    #[case(TypeDesc::Float64, FieldKind::Float64)]
    #[case(TypeDesc::String, FieldKind::String)]
    #[case(TypeDesc::map(TypeDesc::String, TypeDesc::Bool), FieldKind::Map)]
    #[case(TypeDesc::slice(TypeDesc::Uint32), FieldKind::Slice)]
    fn test_classify_supported(#[case] desc: TypeDesc, #[case] kind: FieldKind) {
        assert_eq!(FieldKind::classify(&desc), kind);
    }

    #[rstest::rstest]
    fn test_classify_collapses_to_invalid() {
        assert_eq!(
            FieldKind::classify(&TypeDesc::Unsupported("Option".into())),
            FieldKind::Invalid
        );
        assert_eq!(
            FieldKind::classify(&TypeDesc::Record(Vec::new())),
            FieldKind::Invalid
        );
    }

    #[rstest::rstest]
    fn test_all_is_indexed_in_declaration_order() {
        for (idx, kind) in FieldKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), idx);
        }
        assert!(FieldKind::Map.is_composite());
        assert!(FieldKind::Slice.is_composite());
        assert!(!FieldKind::String.is_composite());
    }
}
