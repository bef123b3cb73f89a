use std::io::{BufReader, Read};

use super::{
    dialect::Dialect,
    error::{FieldCountMismatch, ReaderError},
    header::Header,
    normalize::Normalize,
    parser::RecordParser,
    quotes::QuoteFault,
    record::ReadOutcome,
    tap::{RowWindow, Tap},
};

/// The tokenizer stack of a reader and where it is in its lifecycle.
///
/// The tokenizer is built up front but pulls nothing until the stage leaves
/// `Unbound`, so preamble lines can still be discarded from the raw stream.
pub(crate) struct ReadImpl<R: Read> {
    rows: Rows<R>,
    stage: Stage,
}

pub(crate) enum Stage {
    /// Nothing has been read through the tokenizer yet.
    Unbound,
    /// The tokenizer is in use but no header row has been accepted.
    Pending,
    Set(Header),
    /// The header row repeated this column name. Terminal.
    Rejected(String),
}

/// The tokenizer plus the strict-quoting window, if enabled.
struct Rows<R: Read> {
    tokenizer: csv::Reader<Tap<Normalize<BufReader<R>>>>,
    window: Option<RowWindow>,
    record: csv::StringRecord,
    dialect: Dialect,
}

impl<R: Read> ReadImpl<R> {
    pub fn new(source: BufReader<R>, dialect: &Dialect) -> Self {
        Self {
            rows: Rows::new(source, dialect),
            stage: Stage::Unbound,
        }
    }

    #[inline]
    pub fn dialect(&self) -> &Dialect {
        &self.rows.dialect
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The raw stream under the tokenizer, while nothing has been read
    /// through it.
    pub fn unbound_source(&mut self) -> Option<&mut BufReader<R>> {
        match self.stage {
            Stage::Unbound => Some(self.rows.tokenizer.get_mut().get_mut().get_mut()),
            _ => None,
        }
    }

    #[inline]
    pub fn position(&self) -> Option<&csv::Position> {
        match self.stage {
            Stage::Unbound => None,
            _ => Some(self.rows.tokenizer.position()),
        }
    }

    /// Reads the header row if it has not been read yet.
    pub fn establish(&mut self) -> Result<&Header, ReaderError> {
        if let Stage::Unbound | Stage::Pending = self.stage {
            self.stage = Stage::Pending;
            let columns: Vec<String> = self
                .rows
                .next_row()?
                .ok_or(ReaderError::EndOfInput)?
                .iter()
                .map(str::to_string)
                .collect();

            self.stage = match Header::from_row(columns) {
                Ok(header) => {
                    log::debug!("Established header {header}");
                    Stage::Set(header)
                }
                Err(name) => {
                    log::debug!("Rejected header row: {name:?} appears more than once");
                    Stage::Rejected(name)
                }
            };
        }

        match &self.stage {
            Stage::Set(header) => Ok(header),
            Stage::Rejected(name) => Err(ReaderError::DuplicateHeaders { name: name.clone() }),
            Stage::Unbound | Stage::Pending => Err(ReaderError::EndOfInput),
        }
    }

    pub fn next_record<T: RecordParser>(&mut self) -> Result<ReadOutcome<T::Output>, ReaderError> {
        self.establish()?;
        let Stage::Set(header) = &self.stage else {
            return Err(ReaderError::EndOfInput);
        };
        let row = self.rows.next_row()?.ok_or(ReaderError::EndOfInput)?;

        let record = T::parse(header.columns(), row);
        if row.len() == header.len() {
            return Ok(ReadOutcome::Complete(record));
        }

        let mismatch = FieldCountMismatch {
            line: row.position().map_or(0, |pos| pos.line()),
            expected: header.len(),
            found: row.len(),
        };
        log::trace!("{mismatch}");
        Ok(ReadOutcome::Partial { record, mismatch })
    }
}

impl<R: Read> Rows<R> {
    fn new(source: BufReader<R>, dialect: &Dialect) -> Self {
        let source = Normalize::new(source, dialect);
        let (tap, window) = if dialect.lazy_quotes {
            (Tap::passthrough(source), None)
        } else {
            let (tap, window) = Tap::recording(source);
            (tap, Some(window))
        };

        let tokenizer = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(dialect.delimiter)
            .quote(dialect.quote)
            .comment(dialect.comment)
            .from_reader(tap);

        Self {
            tokenizer,
            window,
            record: csv::StringRecord::new(),
            dialect: *dialect,
        }
    }

    /// Pulls the next row from the tokenizer, `None` at end of input.
    fn next_row(&mut self) -> Result<Option<&csv::StringRecord>, ReaderError> {
        if !self.tokenizer.read_record(&mut self.record)? {
            return Ok(None);
        }

        if let (Some(window), Some(start)) = (&self.window, self.record.position()) {
            let line = start.line();
            window
                .check(start.byte(), self.tokenizer.position().byte(), &self.dialect)
                .map_err(|fault| match fault {
                    QuoteFault::Bare => ReaderError::BareQuote { line },
                    QuoteFault::Extraneous => ReaderError::ExtraneousQuote { line },
                })?;
        }

        Ok(Some(&self.record))
    }
}
