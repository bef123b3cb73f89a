mod builder;
mod dialect;
mod error;
mod header;
mod normalize;
mod parser;
mod quotes;
mod read_impl;
mod record;
mod record_reader;
mod tap;
mod writer;

pub use builder::RecordReaderBuilder;
pub use dialect::Dialect;
pub use error::{FieldCountMismatch, ReaderError, WriterError};
pub use parser::RecordParser;
pub use record::{ReadOutcome, Record, RecordSource};
pub use record_reader::RecordReader;
pub use writer::{RecordWriter, RecordWriterBuilder};
