use std::fmt;

use serde::{Deserialize, Serialize};

/// Character separating cells within a row.
///
/// # Examples
/// ```
/// use reftable::Delimiter;
///
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// assert_eq!(Delimiter::from_char('\t'), Some(Delimiter::Tab));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            ';' => Some(Delimiter::Semicolon),
            _ => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Settings for the row tokenizer.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: Delimiter,
    /// Rows starting with this byte are skipped entirely.
    pub comment: Option<u8>,
    /// Strip a UTF-8 byte order mark from the first header cell.
    pub trim_bom: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_trim_bom(mut self, trim_bom: bool) -> Self {
        self.trim_bom = trim_bom;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            comment: None,
            trim_bom: true,
        }
    }
}
