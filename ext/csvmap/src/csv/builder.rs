use super::{
    dialect::Dialect, error::ReaderError, parser::RecordParser, record::Record,
    record_reader::RecordReader,
};
use std::{io::Read, marker::PhantomData};

/// Builder for configuring and creating a [`RecordReader`].
///
/// All options are fixed before the reader exists, so they always apply from
/// the first row on.
pub struct RecordReaderBuilder<T: RecordParser = Record> {
    dialect: Dialect,
    _parser: PhantomData<T>,
}

impl RecordReaderBuilder {
    /// Creates a new builder producing [`Record`]s with the default dialect.
    pub fn new() -> Self {
        Self {
            dialect: Dialect::default(),
            _parser: PhantomData,
        }
    }
}

impl Default for RecordReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RecordParser> RecordReaderBuilder<T> {
    /// Switches the record representation, e.g. to `BTreeMap<String, String>`.
    #[must_use]
    pub fn records<U: RecordParser>(self) -> RecordReaderBuilder<U> {
        RecordReaderBuilder {
            dialect: self.dialect,
            _parser: PhantomData,
        }
    }

    /// Replaces every tokenizer option at once.
    #[must_use]
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Sets the delimiter character for the CSV.
    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.dialect.delimiter = delimiter;
        self
    }

    /// Sets the quote character for the CSV.
    #[must_use]
    pub fn quote(mut self, quote: u8) -> Self {
        self.dialect.quote = quote;
        self
    }

    /// Sets the comment character. Lines starting with it are skipped.
    #[must_use]
    pub fn comment(mut self, comment: Option<u8>) -> Self {
        self.dialect.comment = comment;
        self
    }

    /// Permits a quote in an unquoted field and a non-doubled quote in a
    /// quoted field, keeping both as field text. Off by default, which makes
    /// such quotes a [`ReaderError::BareQuote`] or
    /// [`ReaderError::ExtraneousQuote`].
    #[must_use]
    pub fn lazy_quotes(mut self, lazy_quotes: bool) -> Self {
        self.dialect.lazy_quotes = lazy_quotes;
        self
    }

    /// Strips leading whitespace from every field, header included. Only
    /// whitespace outside quotes is removed, so `1, "x,y"` reads as `1` and
    /// `x,y`.
    #[must_use]
    pub fn trim_leading_space(mut self, trim_leading_space: bool) -> Self {
        self.dialect.trim_leading_space = trim_leading_space;
        self
    }

    /// Builds the RecordReader with the configured options.
    pub fn build<R: Read>(self, reader: R) -> Result<RecordReader<R, T>, ReaderError> {
        self.dialect
            .validate()
            .map_err(ReaderError::InvalidDialect)?;
        Ok(RecordReader::with_dialect(reader, self.dialect))
    }
}
