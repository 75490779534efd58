use crate::parse::Registry;
use crate::types::{TypeDesc, Value};
use crate::{Error, Result};

pub(crate) fn parse_invalid(_: &str, desc: Option<&TypeDesc>, _: &Registry) -> Result<Value> {
    match desc {
        Some(desc) => Err(Error::unsupported(desc)),
        None => Err(Error::unsupported("invalid")),
    }
}

/// One leading and one trailing quote are dropped; nothing is unescaped.
pub(crate) fn parse_string(cell: &str, _: Option<&TypeDesc>, _: &Registry) -> Result<Value> {
    let text = cell.strip_prefix('"').unwrap_or(cell);
    let text = text.strip_suffix('"').unwrap_or(text);
    Ok(Value::String(text.to_owned()))
}

pub(crate) fn parse_bool(cell: &str, _: Option<&TypeDesc>, _: &Registry) -> Result<Value> {
    const TRUE: [&str; 3] = ["true", "y", "yes"];
    const FALSE: [&str; 3] = ["false", "n", "no"];

    if TRUE.iter().any(|word| cell.eq_ignore_ascii_case(word)) {
        return Ok(Value::Bool(true));
    }
    if FALSE.iter().any(|word| cell.eq_ignore_ascii_case(word)) {
        return Ok(Value::Bool(false));
    }
    Err(Error::invalid_data(format!("invalid bool: {cell:?}")))
}

macro_rules! integer_parser {
    ($name:ident, $ty:ty, $variant:ident, $label:literal) => {
        pub(crate) fn $name(cell: &str, _: Option<&TypeDesc>, _: &Registry) -> Result<Value> {
            cell.parse::<$ty>()
                .map(Value::$variant)
                .map_err(|err| Error::invalid_data(format!("invalid {}: {cell:?}: {err}", $label)))
        }
    };
}

integer_parser!(parse_int, isize, Int, "int");
integer_parser!(parse_int8, i8, Int8, "int8");
integer_parser!(parse_int16, i16, Int16, "int16");
integer_parser!(parse_int32, i32, Int32, "int32");
integer_parser!(parse_int64, i64, Int64, "int64");
integer_parser!(parse_uint, usize, Uint, "uint");
integer_parser!(parse_uint8, u8, Uint8, "uint8");
integer_parser!(parse_uint16, u16, Uint16, "uint16");
integer_parser!(parse_uint32, u32, Uint32, "uint32");
integer_parser!(parse_uint64, u64, Uint64, "uint64");

pub(crate) fn parse_float32(cell: &str, _: Option<&TypeDesc>, _: &Registry) -> Result<Value> {
    let value = cell
        .parse::<f32>()
        .map_err(|err| Error::invalid_data(format!("invalid float32: {cell:?}: {err}")))?;
    // f32 parsing saturates to infinity instead of reporting overflow.
    if value.is_infinite() && !is_infinity_literal(cell) {
        return Err(Error::invalid_data(format!(
            "invalid float32: {cell:?}: value out of range"
        )));
    }
    Ok(Value::Float32(value))
}

pub(crate) fn parse_float64(cell: &str, _: Option<&TypeDesc>, _: &Registry) -> Result<Value> {
    let value = cell
        .parse::<f64>()
        .map_err(|err| Error::invalid_data(format!("invalid float64: {cell:?}: {err}")))?;
    if value.is_infinite() && !is_infinity_literal(cell) {
        return Err(Error::invalid_data(format!(
            "invalid float64: {cell:?}: value out of range"
        )));
    }
    Ok(Value::Float64(value))
}

fn is_infinity_literal(cell: &str) -> bool {
    let unsigned = cell
        .strip_prefix('-')
        .or_else(|| cell.strip_prefix('+'))
        .unwrap_or(cell);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn registry() -> &'static Registry {
        Registry::global()
    }

    #[rstest]
    #[case("aa", "aa")]
    #[case("\"aa\"", "aa")]
    #[case("\"\"aa\"\"", "\"aa\"")]
    #[case("a\"b", "a\"b")]
    #[case("", "")]
    fn test_string_strips_one_quote_pair(#[case] cell: &str, #[case] expected: &str) {
        assert_eq!(
            parse_string(cell, None, registry()).unwrap(),
            Value::String(expected.into())
        );
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("y", true)]
    #[case("Y", true)]
    #[case("yes", true)]
    #[case("YES", true)]
    #[case("false", false)]
    #[case("FALSE", false)]
    #[case("n", false)]
    #[case("N", false)]
    #[case("no", false)]
    #[case("NO", false)]
    fn test_bool_words(#[case] cell: &str, #[case] expected: bool) {
        assert_eq!(
            parse_bool(cell, None, registry()).unwrap(),
            Value::Bool(expected)
        );
    }

    #[rstest]
    #[case("1")]
    #[case("aaa")]
    #[case("")]
    #[case(" true")]
    fn test_bool_rejects_other_text(#[case] cell: &str) {
        let err = parse_bool(cell, None, registry()).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::InvalidDataSource);
    }

    #[rstest]
    fn test_integers_honor_width() {
        assert_eq!(
            parse_int8("-128", None, registry()).unwrap(),
            Value::Int8(-128)
        );
        assert!(parse_int8("128", None, registry()).is_err());
        assert_eq!(
            parse_uint16("65535", None, registry()).unwrap(),
            Value::Uint16(u16::MAX)
        );
        assert!(parse_uint16("65536", None, registry()).is_err());
        assert!(parse_uint32("-222", None, registry()).is_err());
        assert_eq!(
            parse_int64("-5", None, registry()).unwrap(),
            Value::Int64(-5)
        );
        assert_eq!(parse_int("1", None, registry()).unwrap(), Value::Int(1));
        assert_eq!(parse_uint("6", None, registry()).unwrap(), Value::Uint(6));
    }

    #[rstest]
    #[case("12.9")]
    #[case("1.5e3")]
    #[case(" 1")]
    #[case("0x10")]
    fn test_integers_are_strict_base_ten(#[case] cell: &str) {
        assert!(parse_int32(cell, None, registry()).is_err());
    }

    #[rstest]
    fn test_floats() {
        assert_eq!(
            parse_float32("11", None, registry()).unwrap(),
            Value::Float32(11.0)
        );
        assert_eq!(
            parse_float64("12.9", None, registry()).unwrap(),
            Value::Float64(12.9)
        );
        assert!(parse_float32("1e39", None, registry()).is_err());
        assert!(parse_float64("1e400", None, registry()).is_err());
        assert_eq!(
            parse_float32("-inf", None, registry()).unwrap(),
            Value::Float32(f32::NEG_INFINITY)
        );
        assert!(parse_float64("abc", None, registry()).is_err());
    }

    #[rstest]
    fn test_invalid_never_parses() {
        let err = parse_invalid("anything", None, registry()).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::UnsupportedFieldKind);
    }
}
