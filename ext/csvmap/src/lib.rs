//! Header-keyed reading and writing of delimited text.
//!
//! The first row of the input is taken as the header and every later row is
//! returned as a map from column name to field:
//!
//! ```text
//! Header1,Header2,Header3
//! Field1,Field2,Field3
//! ```
//!
//! reads as `{"Header1": "Field1", "Header2": "Field2", "Header3": "Field3"}`.
//! Lines above the header can be skipped with [`RecordReader::discard`].
//!
//! [`RecordWriter`] goes the other way, projecting maps onto a fixed header:
//!
//! ```
//! use std::collections::HashMap;
//! use csvmap::RecordWriter;
//!
//! let mut writer = RecordWriter::new(Vec::new(), ["Name", "Alias"]).unwrap();
//! writer
//!     .write(HashMap::from([("Name", "Logan"), ("Alias", "Wolverine")]))
//!     .unwrap();
//! let out = writer.into_inner().unwrap();
//! assert_eq!(out, b"Name,Alias\nLogan,Wolverine\n");
//! ```
mod csv;

pub use crate::csv::{
    Dialect, FieldCountMismatch, ReadOutcome, ReaderError, Record, RecordParser,
    RecordReader, RecordReaderBuilder, RecordSource, RecordWriter, RecordWriterBuilder,
    WriterError,
};
