use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The load target does not describe a record.
    InvalidTargetSchema,
    /// A cell or literal could not be read as the requested value.
    InvalidDataSource,
    /// A value was requested for a kind that has no parser.
    UnsupportedFieldKind,
    /// The row tokenizer rejected the source.
    RowRead,
    /// No row reader is registered for the file extension.
    UnrecognizedFormat,
    Io,
    /// A parsed value did not match the field it was assigned to.
    TypeMismatch,
}

/// Position of a failure inside the source, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTargetSchema, message)
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDataSource, message)
    }

    pub fn unsupported(context: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnsupportedFieldKind,
            format!("unsupported data type: {context}"),
        )
    }

    pub fn row_read(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RowRead, message)
    }

    pub fn unrecognized_format(path: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnrecognizedFormat,
            format!("unrecognized file type: {path}"),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("expected {expected} value, found {found}"),
        )
    }

    pub fn with_location(mut self, row: usize, column: usize) -> Self {
        self.location = Some(Location { row, column });
        self
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let location = err.position().map(|pos| Location {
            row: pos.record() as usize,
            column: 0,
        });
        let mut error = Error::row_read(format!("invalid data source: {err}"));
        error.location = location;
        error
    }
}
