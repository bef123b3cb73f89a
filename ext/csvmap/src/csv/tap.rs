use std::cell::RefCell;
use std::io::{self, Read};
use std::rc::Rc;

use super::dialect::Dialect;
use super::quotes::{check_row, QuoteFault};

/// Bytes handed to the tokenizer that it has not finished turning into rows.
#[derive(Debug, Default)]
struct Window {
    // Stream offset of `bytes[0]`
    offset: u64,
    bytes: Vec<u8>,
}

/// A reader that keeps a copy of what the tokenizer pulls through it, so the
/// raw text of each row can be inspected after the row is parsed.
///
/// Without a window it is a plain pass-through.
pub(crate) struct Tap<R> {
    inner: R,
    window: Option<Rc<RefCell<Window>>>,
}

/// The reader-side handle on a [`Tap`]'s window.
#[derive(Debug, Clone)]
pub(crate) struct RowWindow(Rc<RefCell<Window>>);

impl<R: Read> Tap<R> {
    pub fn passthrough(inner: R) -> Self {
        Self {
            inner,
            window: None,
        }
    }

    pub fn recording(inner: R) -> (Self, RowWindow) {
        let window = Rc::new(RefCell::new(Window::default()));
        let tap = Self {
            inner,
            window: Some(Rc::clone(&window)),
        };
        (tap, RowWindow(window))
    }

    /// The wrapped reader. Only meaningful before the first read.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: Read> Read for Tap<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        if let Some(window) = &self.window {
            window.borrow_mut().bytes.extend_from_slice(&buf[..read]);
        }
        Ok(read)
    }
}

impl RowWindow {
    /// Checks the quoting of the row spanning stream bytes `start..end`, then
    /// forgets everything before `end`.
    pub fn check(&self, start: u64, end: u64, dialect: &Dialect) -> Result<(), QuoteFault> {
        let mut window = self.0.borrow_mut();
        let from = start.saturating_sub(window.offset) as usize;
        let to = (end.saturating_sub(window.offset) as usize).min(window.bytes.len());
        let result = if from < to {
            check_row(&window.bytes[from..to], dialect)
        } else {
            Ok(())
        };
        window.bytes.drain(..to);
        window.offset += to as u64;
        result
    }
}
