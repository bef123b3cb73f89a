use super::{
    dialect::Dialect,
    error::ReaderError,
    parser::RecordParser,
    read_impl::{ReadImpl, Stage},
    record::{ReadOutcome, Record},
};
use std::{
    io::{BufRead, BufReader, Read},
    marker::PhantomData,
};

pub(crate) const READ_BUFFER_SIZE: usize = 16384;

/// Reads header-keyed records from delimited text.
///
/// The first row (after any discarded lines, blank lines and comments) is
/// taken as the header. It is read on the first call to
/// [`headers`](Self::headers), [`read_headers`](Self::read_headers),
/// [`read`](Self::read) or [`read_all`](Self::read_all), and every later row
/// is keyed by it.
///
/// ```
/// use csvmap::RecordReader;
///
/// let mut reader = RecordReader::new("name,alias\nLogan,Wolverine\n".as_bytes());
/// let records = reader.read_all().unwrap();
/// assert_eq!(records[0]["alias"], "Wolverine");
/// ```
pub struct RecordReader<R: Read, T: RecordParser = Record> {
    inner: ReadImpl<R>,
    exhausted: bool,
    _parser: PhantomData<T>,
}

impl<R: Read> RecordReader<R> {
    /// Creates a reader with the default dialect, producing [`Record`]s.
    pub fn new(reader: R) -> Self {
        Self::with_dialect(reader, Dialect::default())
    }
}

impl<R: Read, T: RecordParser> RecordReader<R, T> {
    pub(crate) fn with_dialect(reader: R, dialect: Dialect) -> Self {
        Self {
            inner: ReadImpl::new(BufReader::with_capacity(READ_BUFFER_SIZE, reader), &dialect),
            exhausted: false,
            _parser: PhantomData,
        }
    }

    #[inline]
    pub fn dialect(&self) -> &Dialect {
        self.inner.dialect()
    }

    /// Skips the first `n` lines of raw input before the header is read.
    ///
    /// Lines are `\n`-terminated and skipped byte for byte, without any
    /// quote or comment handling. Fails with
    /// [`ReaderError::HeaderAlreadyEstablished`] once any header or row has
    /// been read, and with [`ReaderError::EndOfInput`] if the input runs out
    /// first. Consumed lines are not restored on failure.
    pub fn discard(&mut self, n: usize) -> Result<(), ReaderError> {
        let Some(source) = self.inner.unbound_source() else {
            return Err(ReaderError::HeaderAlreadyEstablished);
        };

        let mut line = Vec::new();
        for _ in 0..n {
            line.clear();
            source.read_until(b'\n', &mut line)?;
            if line.last() != Some(&b'\n') {
                return Err(ReaderError::EndOfInput);
            }
        }

        log::debug!("Discarded {n} lines before the header");
        Ok(())
    }

    /// Reads the header row now rather than on first use.
    pub fn read_headers(&mut self) -> Result<(), ReaderError> {
        if matches!(self.inner.stage(), Stage::Set(_)) {
            return Err(ReaderError::HeaderAlreadyEstablished);
        }
        self.inner.establish()?;
        Ok(())
    }

    /// Returns a copy of the column names, reading the header row if needed.
    pub fn headers(&mut self) -> Result<Vec<String>, ReaderError> {
        let header = self.inner.establish()?;
        Ok(header.columns().to_vec())
    }

    /// The column names, if the header row has been read.
    pub fn header(&self) -> Option<&[String]> {
        match self.inner.stage() {
            Stage::Set(header) => Some(header.columns()),
            _ => None,
        }
    }

    /// Position of the tokenizer in the input, once it exists.
    pub fn position(&self) -> Option<&csv::Position> {
        self.inner.position()
    }

    /// Reads one record.
    ///
    /// At end of input this fails with [`ReaderError::EndOfInput`]. A row
    /// whose field count differs from the header yields
    /// [`ReadOutcome::Partial`] with the fields that line up with a column.
    pub fn read(&mut self) -> Result<ReadOutcome<T::Output>, ReaderError> {
        self.inner.next_record::<T>()
    }

    /// Reads all remaining records.
    ///
    /// End of input is not an error here. Any other failure, a field count
    /// mismatch included, is returned without the records read so far.
    pub fn read_all(&mut self) -> Result<Vec<T::Output>, ReaderError> {
        let mut records = Vec::new();
        loop {
            match self.read() {
                Ok(outcome) => records.push(outcome.into_result()?),
                Err(ReaderError::EndOfInput) => return Ok(records),
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: Read, T: RecordParser> Iterator for RecordReader<R, T> {
    type Item = Result<T::Output, ReaderError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.read() {
            Ok(outcome) => Some(outcome.into_result()),
            Err(ReaderError::EndOfInput) => {
                self.exhausted = true;
                None
            }
            Err(err) => {
                self.exhausted = err.is_fatal();
                Some(Err(err))
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        // We can't know the exact size without reading the whole input
        (0, None)
    }
}
