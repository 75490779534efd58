//! Inline literals packed into a single cell.
//!
//! Maps are written `(k1:v1,k2:v2)` and lists `(v1,v2,v3)`. Splitting is
//! purely positional: a `,` or `:` inside a key or value is not escaped and
//! breaks the entry. Bad pairs and elements are dropped one at a time; the
//! literal as a whole only fails when it cannot be unwrapped.

use smallvec::SmallVec;

use crate::parse::Registry;
use crate::types::{FieldKind, TypeDesc, Value, ValueMap};
use crate::{Error, Result};

pub(crate) fn parse_map(cell: &str, desc: Option<&TypeDesc>, registry: &Registry) -> Result<Value> {
    let Some(TypeDesc::Map(key_desc, value_desc)) = desc else {
        return Err(Error::invalid_data("map literal needs a map type"));
    };
    let body = literal_body(cell)?;
    let key_kind = FieldKind::classify(key_desc);
    let value_kind = FieldKind::classify(value_desc);

    let pieces = split_on(body, b',');
    let mut map = ValueMap::with_capacity(pieces.len());
    for piece in pieces {
        let pair = split_on(piece.trim(), b':');
        if pair.len() != 2 {
            tracing::trace!(piece, "map literal piece is not a key:value pair");
            continue;
        }
        let (Some(key_parser), Some(value_parser)) =
            (parser_for(registry, key_kind), parser_for(registry, value_kind))
        else {
            continue;
        };
        let key = match key_parser(pair[0], Some(key_desc), registry) {
            Ok(key) => key,
            Err(err) => {
                tracing::trace!(piece, error = %err, "dropping map pair with bad key");
                continue;
            }
        };
        let value = match value_parser(pair[1], Some(value_desc), registry) {
            Ok(value) => value,
            Err(err) => {
                tracing::trace!(piece, error = %err, "dropping map pair with bad value");
                continue;
            }
        };
        map.insert(key, value);
    }
    Ok(Value::Map(map))
}

pub(crate) fn parse_slice(
    cell: &str,
    desc: Option<&TypeDesc>,
    registry: &Registry,
) -> Result<Value> {
    let Some(TypeDesc::Slice(element_desc)) = desc else {
        return Err(Error::invalid_data("list literal needs a list type"));
    };
    let body = literal_body(cell)?;
    let element_kind = FieldKind::classify(element_desc);

    let pieces = split_on(body, b',');
    let mut items = Vec::with_capacity(pieces.len());
    let Some(parser) = parser_for(registry, element_kind) else {
        return Ok(Value::Slice(items));
    };
    for piece in pieces {
        let piece = piece.trim();
        match parser(piece, Some(element_desc), registry) {
            Ok(value) => items.push(value),
            Err(err) => tracing::trace!(piece, error = %err, "dropping list element"),
        }
    }
    Ok(Value::Slice(items))
}

// Invalid kinds are skipped outright rather than parsed into an error.
fn parser_for(registry: &Registry, kind: FieldKind) -> Option<crate::parse::ParseFn> {
    if kind == FieldKind::Invalid {
        return None;
    }
    registry.lookup(kind)
}

/// Trim surrounding whitespace, then drop the first and last character
/// without checking that they are parentheses.
fn literal_body(cell: &str) -> Result<&str> {
    let mut chars = cell.trim().chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => Ok(chars.as_str()),
        _ => Err(Error::invalid_data(format!(
            "composite literal is too short: {cell:?}"
        ))),
    }
}

fn split_on(text: &str, separator: u8) -> SmallVec<[&str; 8]> {
    let mut parts = SmallVec::new();
    let mut start = 0;
    for idx in memchr::memchr_iter(separator, text.as_bytes()) {
        parts.push(&text[start..idx]);
        start = idx + 1;
    }
    parts.push(&text[start..]);
    parts
}
