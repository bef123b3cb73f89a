use std::io::{self, Read};
use std::mem;

use super::dialect::Dialect;

const CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart { line_start: bool },
    Unquoted,
    Quoted,
    // Just saw a quote inside a quoted field
    QuoteInQuoted,
    /// Whitespace followed by the comment byte at the start of a line. The
    /// field is wrapped in quotes so the tokenizer does not take it for a
    /// comment line.
    Requoted,
    Comment,
}

/// Rewrites raw input so the tokenizer's field rules match the dialect's
/// `trim_leading_space` and `lazy_quotes` options.
///
/// * Leading whitespace is dropped at the start of every field, outside
///   quotes, before the tokenizer decides whether the field is quoted.
/// * With lazy quotes, a quote inside a quoted field that is neither doubled
///   nor closing is doubled, so it stays part of the field.
///
/// Line breaks are never removed, so line numbers still refer to the input.
/// With neither option set the input passes through untouched.
pub(crate) struct Normalize<R> {
    inner: R,
    dialect: Dialect,
    state: State,
    // Whitespace was dropped at the current field start
    skipped: bool,
    chunk: Vec<u8>,
    buffer: Vec<u8>,
    offset: usize,
    done: bool,
}

impl<R: Read> Normalize<R> {
    pub fn new(inner: R, dialect: &Dialect) -> Self {
        Self {
            inner,
            dialect: *dialect,
            state: State::FieldStart { line_start: true },
            skipped: false,
            chunk: Vec::new(),
            buffer: Vec::new(),
            offset: 0,
            done: false,
        }
    }

    #[inline]
    fn active(&self) -> bool {
        self.dialect.trim_leading_space || self.dialect.lazy_quotes
    }

    /// The wrapped reader. Only meaningful before the first read.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    fn push(&mut self, b: u8) {
        let Dialect {
            delimiter, quote, ..
        } = self.dialect;
        let newline = matches!(b, b'\r' | b'\n');

        self.state = match self.state {
            State::FieldStart { line_start } => {
                if self.dialect.trim_leading_space && is_space(b) && b != delimiter {
                    self.skipped = true;
                    return;
                }
                let skipped = mem::take(&mut self.skipped);
                if line_start && skipped && Some(b) == self.dialect.comment {
                    self.buffer.extend([quote, b]);
                    State::Requoted
                } else if line_start && skipped && newline {
                    // A blank-looking line that held whitespace is one empty field
                    self.buffer.extend([quote, quote, b]);
                    State::FieldStart { line_start: true }
                } else if line_start && Some(b) == self.dialect.comment {
                    self.buffer.push(b);
                    State::Comment
                } else {
                    self.buffer.push(b);
                    after_unquoted_byte(b, delimiter, quote)
                }
            }
            State::Unquoted => {
                self.buffer.push(b);
                if b == delimiter || newline {
                    after_unquoted_byte(b, delimiter, quote)
                } else {
                    State::Unquoted
                }
            }
            State::Quoted => {
                self.buffer.push(b);
                if b == quote {
                    State::QuoteInQuoted
                } else {
                    State::Quoted
                }
            }
            State::QuoteInQuoted => {
                if b == quote {
                    self.buffer.push(b);
                    State::Quoted
                } else if b == delimiter || newline {
                    self.buffer.push(b);
                    after_unquoted_byte(b, delimiter, quote)
                } else if self.dialect.lazy_quotes {
                    self.buffer.extend([quote, b]);
                    State::Quoted
                } else {
                    self.buffer.push(b);
                    State::Unquoted
                }
            }
            State::Requoted => {
                if b == quote {
                    self.buffer.extend([quote, quote]);
                    State::Requoted
                } else if b == delimiter || newline {
                    self.buffer.extend([quote, b]);
                    after_unquoted_byte(b, delimiter, quote)
                } else {
                    self.buffer.push(b);
                    State::Requoted
                }
            }
            State::Comment => {
                self.buffer.push(b);
                if b == b'\n' {
                    State::FieldStart { line_start: true }
                } else {
                    State::Comment
                }
            }
        };
    }

    fn finish(&mut self) {
        let quote = self.dialect.quote;
        match self.state {
            State::FieldStart { line_start: true } if self.skipped => {
                self.buffer.extend([quote, quote]);
            }
            State::Requoted => self.buffer.push(quote),
            _ => {}
        }
        self.skipped = false;
    }

    fn fill(&mut self) -> io::Result<()> {
        self.buffer.clear();
        self.offset = 0;
        if self.chunk.is_empty() {
            self.chunk.resize(CHUNK_SIZE, 0);
        }

        let read = self.inner.read(&mut self.chunk)?;
        if read == 0 {
            self.done = true;
            self.finish();
            return Ok(());
        }

        let chunk = mem::take(&mut self.chunk);
        for &b in &chunk[..read] {
            self.push(b);
        }
        self.chunk = chunk;
        Ok(())
    }
}

/// The state after `b` was copied as the first byte of a field or as a byte
/// of an unquoted field.
#[inline]
fn after_unquoted_byte(b: u8, delimiter: u8, quote: u8) -> State {
    if b == delimiter {
        State::FieldStart { line_start: false }
    } else if matches!(b, b'\r' | b'\n') {
        State::FieldStart { line_start: true }
    } else if b == quote {
        State::Quoted
    } else {
        State::Unquoted
    }
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0B' | b'\x0C')
}

impl<R: Read> Read for Normalize<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.active() {
            return self.inner.read(buf);
        }

        while self.offset == self.buffer.len() {
            if self.done {
                return Ok(0);
            }
            self.fill()?;
        }

        let copy_size = buf.len().min(self.buffer.len() - self.offset);
        buf[..copy_size].copy_from_slice(&self.buffer[self.offset..self.offset + copy_size]);
        self.offset += copy_size;
        Ok(copy_size)
    }
}
