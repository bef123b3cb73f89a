use super::dialect::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuoteFault {
    /// A quote inside a field that did not start with one.
    Bare,
    /// A quote in a quoted field that is neither doubled nor closing, or a
    /// quoted field still open at the end of input.
    Extraneous,
}

/// Checks the raw bytes of one row against strict RFC 4180 quoting.
///
/// `raw` is the row as the tokenizer saw it, leading whitespace already
/// trimmed if the dialect asks for it. It may start with blank or comment
/// lines the tokenizer skipped on its way to the row.
pub(crate) fn check_row(raw: &[u8], dialect: &Dialect) -> Result<(), QuoteFault> {
    let quote = dialect.quote;
    let delimiter = dialect.delimiter;
    let mut i = skip_preamble(raw, dialect.comment);

    'fields: loop {
        if raw.get(i) == Some(&quote) {
            i += 1;
            loop {
                match raw.get(i) {
                    None => return Err(QuoteFault::Extraneous),
                    Some(&b) if b == quote => match raw.get(i + 1) {
                        Some(&next) if next == quote => i += 2,
                        Some(&next) if next == delimiter => {
                            i += 2;
                            continue 'fields;
                        }
                        None | Some(b'\r' | b'\n') => return Ok(()),
                        Some(_) => return Err(QuoteFault::Extraneous),
                    },
                    Some(_) => i += 1,
                }
            }
        }

        loop {
            match raw.get(i) {
                None | Some(b'\r' | b'\n') => return Ok(()),
                Some(&b) if b == delimiter => {
                    i += 1;
                    continue 'fields;
                }
                Some(&b) if b == quote => return Err(QuoteFault::Bare),
                Some(_) => i += 1,
            }
        }
    }
}

fn skip_preamble(raw: &[u8], comment: Option<u8>) -> usize {
    let mut i = 0;
    loop {
        match raw.get(i) {
            Some(b'\r' | b'\n') => i += 1,
            Some(&b) if Some(b) == comment => {
                i = match raw[i..].iter().position(|&b| b == b'\n') {
                    Some(offset) => i + offset + 1,
                    None => raw.len(),
                };
            }
            _ => return i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(raw: &str) -> Result<(), QuoteFault> {
        check_row(raw.as_bytes(), &Dialect::default())
    }

    #[test]
    fn accepts_rfc4180_rows() {
        assert_eq!(check("a,b,c\n"), Ok(()));
        assert_eq!(check("\"a,1\",\"b\"\"2\",c\r\n"), Ok(()));
        assert_eq!(check("\"multi\nline\",x"), Ok(()));
        assert_eq!(check(",,\n"), Ok(()));
        assert_eq!(check("\"\"\n"), Ok(()));
    }

    #[test]
    fn rejects_bare_quote() {
        assert_eq!(check("a,b\"c,d\n"), Err(QuoteFault::Bare));
        assert_eq!(check("x\"\n"), Err(QuoteFault::Bare));
    }

    #[test]
    fn rejects_extraneous_quote() {
        assert_eq!(check("\"a\"b,c\n"), Err(QuoteFault::Extraneous));
        assert_eq!(check("\"never closed,c\n"), Err(QuoteFault::Extraneous));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let dialect = Dialect {
            comment: Some(b'#'),
            ..Dialect::default()
        };
        assert_eq!(check_row(b"\n# it's \"fine\"\n\"a\",b\n", &dialect), Ok(()));
        assert_eq!(
            check_row(b"# note\nb\"ad\n", &dialect),
            Err(QuoteFault::Bare)
        );
    }

    #[test]
    fn leading_space_makes_a_quote_bare() {
        assert_eq!(check("a, \"b\"\n"), Err(QuoteFault::Bare));
    }

    #[test]
    fn honours_custom_delimiter_and_quote() {
        let dialect = Dialect {
            delimiter: b'|',
            quote: b'\'',
            ..Dialect::default()
        };
        assert_eq!(check_row(b"'a|b'|\"c\"\n", &dialect), Ok(()));
        assert_eq!(check_row(b"a'b|c\n", &dialect), Err(QuoteFault::Bare));
    }
}
