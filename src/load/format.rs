//! File extension to row reader dispatch.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use smol_str::SmolStr;

use crate::load::reader::read_rows;
use crate::{Error, LoadOptions, Result};

/// Turns an opened source into raw rows, header first.
pub type RowReader = fn(&mut dyn Read, &LoadOptions) -> Result<Vec<StringRecord>>;

/// Row readers keyed by lower-case file extension without the dot.
///
/// The default set knows `csv` only.
#[derive(Clone)]
pub struct Formats {
    readers: HashMap<SmolStr, RowReader>,
}

impl Formats {
    pub fn empty() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// Returns the reader previously bound to `extension`, if any.
    pub fn register(&mut self, extension: &str, reader: RowReader) -> Option<RowReader> {
        self.readers.insert(normalize(extension), reader)
    }

    pub fn with(mut self, extension: &str, reader: RowReader) -> Self {
        self.register(extension, reader);
        self
    }

    pub fn get(&self, extension: &str) -> Option<RowReader> {
        self.readers.get(&normalize(extension)).copied()
    }

    pub fn for_path(&self, path: &Path) -> Result<RowReader> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get(ext))
            .ok_or_else(|| Error::unrecognized_format(path.display()))
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.readers.keys().map(SmolStr::as_str)
    }
}

impl Default for Formats {
    fn default() -> Self {
        Self::empty().with("csv", read_rows)
    }
}

impl fmt::Debug for Formats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extensions: Vec<&str> = self.extensions().collect();
        extensions.sort_unstable();
        f.debug_struct("Formats")
            .field("extensions", &extensions)
            .finish()
    }
}

fn normalize(extension: &str) -> SmolStr {
    let trimmed = extension.trim_start_matches('.');
    if trimmed.bytes().any(|b| b.is_ascii_uppercase()) {
        SmolStr::new(trimmed.to_ascii_lowercase())
    } else {
        SmolStr::new(trimmed)
    }
}
