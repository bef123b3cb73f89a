use super::{error::WriterError, record::RecordSource};
use std::io::Write;

/// Builder for configuring and creating a [`RecordWriter`].
pub struct RecordWriterBuilder {
    delimiter: u8,
    quote: u8,
    crlf: bool,
    write_header: bool,
}

impl Default for RecordWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordWriterBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            crlf: false,
            write_header: true,
        }
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Terminates rows with `\r\n` instead of `\n`.
    #[must_use]
    pub fn crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }

    /// Whether the header is written as the first row. On by default; turn
    /// it off when appending to output that already has one.
    #[must_use]
    pub fn write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    pub fn build<W, I, S>(self, writer: W, header: I) -> Result<RecordWriter<W>, WriterError>
    where
        W: Write,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if matches!(self.delimiter, b'\r' | b'\n') || self.delimiter == self.quote {
            return Err(WriterError::InvalidDialect(format!(
                "delimiter {:?} with quote {:?}",
                self.delimiter as char, self.quote as char
            )));
        }

        let terminator = if self.crlf {
            csv::Terminator::CRLF
        } else {
            csv::Terminator::Any(b'\n')
        };
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(terminator)
            .from_writer(writer);

        let mut writer = RecordWriter {
            writer,
            header: header.into_iter().map(Into::into).collect(),
        };
        if self.write_header {
            writer.writer.write_record(&writer.header)?;
            log::debug!("Wrote header row with {} columns", writer.header.len());
        }
        Ok(writer)
    }
}

/// Writes header-keyed records as delimited rows under a fixed header.
///
/// Output is buffered: call [`flush`](Self::flush) or
/// [`into_inner`](Self::into_inner) before relying on the sink's contents.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
    header: Vec<String>,
}

impl<W: Write> RecordWriter<W> {
    /// Creates a writer with the default dialect and writes `header` as the
    /// first row.
    pub fn new<I, S>(writer: W, header: I) -> Result<Self, WriterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordWriterBuilder::new().build(writer, header)
    }

    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.header
    }

    /// Writes one record, ordered by the header. Columns the record lacks are
    /// written as empty fields and keys outside the header are ignored.
    pub fn write<S: RecordSource>(&mut self, record: S) -> Result<(), WriterError> {
        self.writer.write_record(
            self.header
                .iter()
                .map(|column| record.field(column).unwrap_or("")),
        )?;
        Ok(())
    }

    /// Writes records in order, stopping at the first failure. Rows written
    /// before it stay in the output.
    pub fn write_all<I>(&mut self, records: I) -> Result<(), WriterError>
    where
        I: IntoIterator,
        I::Item: RecordSource,
    {
        records
            .into_iter()
            .try_for_each(|record| self.write(record))
    }

    pub fn flush(&mut self) -> Result<(), WriterError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> Result<W, WriterError> {
        self.writer
            .into_inner()
            .map_err(|err| WriterError::Io(err.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::{Record, RecordReader};
    use std::collections::{BTreeMap, HashMap};
    use std::io::{Read, Seek, SeekFrom};

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn written(writer: RecordWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn writes_header_then_rows() {
        let headers = ["Name", "Alias", "Superpower"];
        let data = vec![
            record(&[
                ("Name", "Logan"),
                ("Alias", "Wolverine"),
                ("Superpower", "Super healing"),
            ]),
            record(&[
                ("Name", "Charles Xavier"),
                ("Alias", "Professor X"),
                ("Superpower", "Telepathy"),
            ]),
        ];

        let mut writer = RecordWriter::new(Vec::new(), headers).unwrap();
        writer.write_all(&data).unwrap();
        assert_eq!(
            written(writer),
            "Name,Alias,Superpower\nLogan,Wolverine,Super healing\nCharles Xavier,Professor X,Telepathy\n"
        );
    }

    #[test]
    fn missing_key_writes_empty_field() {
        let mut writer = RecordWriter::new(Vec::new(), ["A", "B", "C"]).unwrap();
        let row: BTreeMap<&str, &str> = [("A", "1"), ("C", "3"), ("Z", "ignored")]
            .into_iter()
            .collect();
        writer.write(&row).unwrap();
        assert_eq!(written(writer), "A,B,C\n1,,3\n");
    }

    #[test]
    fn header_can_be_left_out() {
        let mut writer = RecordWriterBuilder::new()
            .write_header(false)
            .delimiter(b';')
            .crlf(true)
            .build(Vec::new(), vec!["A".to_string(), "B".to_string()])
            .unwrap();
        let mut row = HashMap::new();
        row.insert("B", "x;y");
        row.insert("A", "1");
        writer.write(row).unwrap();
        assert_eq!(written(writer), "1;\"x;y\"\r\n");
    }

    #[test]
    fn header_is_not_validated() {
        let writer = RecordWriter::new(Vec::new(), ["A", "A"]).unwrap();
        assert_eq!(writer.headers(), &["A", "A"]);
        assert_eq!(written(writer), "A,A\n");
    }

    #[test]
    fn rejects_invalid_delimiter() {
        let result = RecordWriterBuilder::new()
            .delimiter(b'\n')
            .build(Vec::new(), ["A"]);
        assert!(matches!(result, Err(WriterError::InvalidDialect(_))));
    }

    #[test]
    fn round_trips_awkward_values() {
        let headers = ["id", "note", "quote"];
        let data = vec![
            record(&[("id", "1"), ("note", "a, b"), ("quote", "she said \"hi\"")]),
            record(&[("id", "2"), ("note", "line one\nline two"), ("quote", "")]),
            record(&[("id", "3"), ("note", " padded "), ("quote", "\"")]),
        ];

        let mut writer = RecordWriter::new(Vec::new(), headers).unwrap();
        writer.write_all(&data).unwrap();
        let out = writer.into_inner().unwrap();

        let mut reader = RecordReader::new(out.as_slice());
        assert_eq!(reader.headers().unwrap(), headers);
        assert_eq!(reader.read_all().unwrap(), data);
    }

    #[test]
    fn round_trips_through_a_file() {
        let mut file = tempfile::tempfile().unwrap();
        let data = vec![
            record(&[("A", "x|y"), ("B", "")]),
            record(&[("A", "2"), ("B", "3")]),
        ];

        let mut writer = RecordWriterBuilder::new()
            .delimiter(b'|')
            .build(&mut file, ["A", "B"])
            .unwrap();
        writer.write_all(&data).unwrap();
        writer.flush().unwrap();
        drop(writer);

        file.seek(SeekFrom::Start(0)).unwrap();
        let mut text = String::new();
        (&file).read_to_string(&mut text).unwrap();
        assert_eq!(text, "A|B\n\"x|y\"|\n2|3\n");

        file.seek(SeekFrom::Start(0)).unwrap();
        let mut reader = crate::csv::RecordReaderBuilder::new()
            .delimiter(b'|')
            .build(&file)
            .unwrap();
        assert_eq!(reader.read_all().unwrap(), data);
    }
}
