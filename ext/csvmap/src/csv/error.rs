use std::io;

use thiserror::Error;

/// A data row whose field count differs from the header's column count.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("wrong number of fields in line {line}: expected {expected}, found {found}")]
pub struct FieldCountMismatch {
    pub line: u64,
    pub expected: usize,
    pub found: usize,
}

/// Errors that can occur while reading header-keyed records
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("End of input")]
    EndOfInput,
    #[error("Header row has already been established")]
    HeaderAlreadyEstablished,
    #[error("Duplicate headers found: {name:?}")]
    DuplicateHeaders { name: String },
    #[error(transparent)]
    FieldCount(#[from] FieldCountMismatch),
    #[error("Bare \" in non-quoted field in line {line}")]
    BareQuote { line: u64 },
    #[error("Extraneous or missing \" in quoted field in line {line}")]
    ExtraneousQuote { line: u64 },
    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse CSV record: {0}")]
    Csv(#[from] csv::Error),
}

impl ReaderError {
    /// Whether the reader can still produce records after this error.
    ///
    /// Row-level faults leave the tokenizer on the next row. Header rejection
    /// and stream faults do not.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::FieldCount(_) | Self::BareQuote { .. } | Self::ExtraneousQuote { .. } => false,
            Self::Csv(err) => err.is_io_error(),
            _ => true,
        }
    }
}

/// Errors that can occur while writing header-keyed records
#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),
}
