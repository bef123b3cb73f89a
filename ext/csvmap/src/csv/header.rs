use std::fmt;

use ahash::AHashSet;
use itertools::Itertools;

/// The ordered, duplicate-free column names of a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Header(Vec<String>);

impl Header {
    /// Builds a header from the first row, rejecting it on the first
    /// repeated column name found scanning left to right.
    pub fn from_row(columns: Vec<String>) -> Result<Self, String> {
        let mut seen = AHashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(column.clone());
            }
        }
        Ok(Self(columns))
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn keeps_column_order() {
        let header = Header::from_row(row(&["b", "a", "c"])).unwrap();
        assert_eq!(header.columns(), &["b", "a", "c"]);
        assert_eq!(header.len(), 3);
        assert_eq!(header.to_string(), "[b, a, c]");
    }

    #[test]
    fn reports_first_duplicate() {
        assert_eq!(
            Header::from_row(row(&["A", "B", "B", "A"])),
            Err("B".to_string())
        );
        assert_eq!(Header::from_row(row(&["A", "B", "A"])), Err("A".to_string()));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(Header::from_row(row(&["a", "A", "a "])).is_ok());
    }
}
