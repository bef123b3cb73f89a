use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::error::{FieldCountMismatch, ReaderError};

/// Default record representation: column name to field text.
pub type Record = HashMap<String, String, ahash::RandomState>;

/// The result of reading one data row.
///
/// A row whose arity differs from the header still yields the fields that
/// line up with a column, alongside the mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    Complete(T),
    Partial {
        record: T,
        mismatch: FieldCountMismatch,
    },
}

impl<T> ReadOutcome<T> {
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    #[inline]
    pub fn record(&self) -> &T {
        match self {
            Self::Complete(record) | Self::Partial { record, .. } => record,
        }
    }

    /// Discards the mismatch, if any.
    #[inline]
    pub fn into_record(self) -> T {
        match self {
            Self::Complete(record) | Self::Partial { record, .. } => record,
        }
    }

    #[inline]
    pub fn mismatch(&self) -> Option<&FieldCountMismatch> {
        match self {
            Self::Complete(_) => None,
            Self::Partial { mismatch, .. } => Some(mismatch),
        }
    }

    /// Record or error, never both: a partial record becomes
    /// [`ReaderError::FieldCount`].
    #[inline]
    pub fn into_result(self) -> Result<T, ReaderError> {
        match self {
            Self::Complete(record) => Ok(record),
            Self::Partial { mismatch, .. } => Err(mismatch.into()),
        }
    }
}

/// A header-keyed record that a writer can project onto its header.
pub trait RecordSource {
    fn field(&self, column: &str) -> Option<&str>;
}

impl<K, V, S> RecordSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    #[inline]
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(AsRef::as_ref)
    }
}

impl<K, V> RecordSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    #[inline]
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(AsRef::as_ref)
    }
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    #[inline]
    fn field(&self, column: &str) -> Option<&str> {
        (**self).field(column)
    }
}
