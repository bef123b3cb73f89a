use serde::{Deserialize, Serialize};

/// Tokenizer options shared by readers and writers.
///
/// Writers only look at `delimiter` and `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Field separator. Defaults to `,`.
    pub delimiter: u8,
    /// Quote character. Defaults to `"`.
    pub quote: u8,
    /// Lines beginning with this byte at column zero are skipped.
    pub comment: Option<u8>,
    /// Permit a quote in an unquoted field and a non-doubled quote in a
    /// quoted field.
    pub lazy_quotes: bool,
    /// Strip leading whitespace from every field, header included, before
    /// deciding whether the field is quoted.
    pub trim_leading_space: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
            lazy_quotes: false,
            trim_leading_space: false,
        }
    }
}

impl Dialect {
    /// Checks that the tokenizer could make sense of this combination.
    pub fn validate(&self) -> Result<(), String> {
        if matches!(self.delimiter, b'\r' | b'\n') {
            return Err(format!("delimiter {:?} is a line terminator", self.delimiter as char));
        }
        if self.delimiter == self.quote {
            return Err(format!(
                "delimiter and quote are both {:?}",
                self.delimiter as char
            ));
        }
        if let Some(comment) = self.comment {
            if comment == self.delimiter || comment == self.quote {
                return Err(format!(
                    "comment {:?} collides with delimiter or quote",
                    comment as char
                ));
            }
        }
        Ok(())
    }
}
