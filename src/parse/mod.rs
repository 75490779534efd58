//! Text-to-value conversion, one parser per [`FieldKind`].

mod composite;
mod primitive;

use std::fmt;
use std::sync::OnceLock;

use crate::types::{FieldKind, TypeDesc, Value};
use crate::{Error, Result};

/// Signature shared by every registry entry.
///
/// `desc` is the declared type of the target; only the composite parsers
/// read it. The registry is passed along so composites can recurse into
/// their key and element kinds.
pub type ParseFn = fn(cell: &str, desc: Option<&TypeDesc>, registry: &Registry) -> Result<Value>;

/// Read-only table from [`FieldKind`] to its parser.
#[derive(Clone)]
pub struct Registry {
    parsers: [Option<ParseFn>; FieldKind::COUNT],
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            parsers: [None; FieldKind::COUNT],
        }
    }

    /// Every kind bound to its built-in parser.
    pub fn standard() -> Self {
        Self::with_kinds(&FieldKind::ALL)
    }

    /// Shared standard registry, built on first use.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::standard)
    }

    /// Built-in parsers for `kinds` only; every other kind is unregistered.
    pub fn with_kinds(kinds: &[FieldKind]) -> Self {
        let mut registry = Self::empty();
        for &kind in kinds {
            registry.parsers[kind.index()] = Some(builtin(kind));
        }
        registry
    }

    pub fn with_parser(mut self, kind: FieldKind, parser: ParseFn) -> Self {
        self.parsers[kind.index()] = Some(parser);
        self
    }

    pub fn lookup(&self, kind: FieldKind) -> Option<ParseFn> {
        self.parsers[kind.index()]
    }

    pub fn contains(&self, kind: FieldKind) -> bool {
        self.lookup(kind).is_some()
    }

    pub fn parse(&self, kind: FieldKind, cell: &str, desc: Option<&TypeDesc>) -> Result<Value> {
        match self.lookup(kind) {
            Some(parser) => parser(cell, desc, self),
            None => Err(Error::unsupported(kind)),
        }
    }

    /// Classify `desc` and parse `cell` as that kind.
    pub fn parse_as(&self, cell: &str, desc: &TypeDesc) -> Result<Value> {
        let kind = FieldKind::classify(desc);
        self.parse(kind, cell, kind.is_composite().then_some(desc))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(FieldKind::ALL.iter().filter(|kind| self.contains(**kind)))
            .finish()
    }
}

fn builtin(kind: FieldKind) -> ParseFn {
    match kind {
        FieldKind::Invalid => primitive::parse_invalid,
        FieldKind::Bool => primitive::parse_bool,
        FieldKind::Int => primitive::parse_int,
        FieldKind::Int8 => primitive::parse_int8,
        FieldKind::Int16 => primitive::parse_int16,
        FieldKind::Int32 => primitive::parse_int32,
        FieldKind::Int64 => primitive::parse_int64,
        FieldKind::Uint => primitive::parse_uint,
        FieldKind::Uint8 => primitive::parse_uint8,
        FieldKind::Uint16 => primitive::parse_uint16,
        FieldKind::Uint32 => primitive::parse_uint32,
        FieldKind::Uint64 => primitive::parse_uint64,
        FieldKind::Float32 => primitive::parse_float32,
        FieldKind::Float64 => primitive::parse_float64,
        FieldKind::Map => composite::parse_map,
        FieldKind::Slice => composite::parse_slice,
        FieldKind::String => primitive::parse_string,
    }
}
