//! Stream helpers: whitespace-separated decimal tokens in, canonical decimal
//! text out.

use std::io::{self, BufRead, Write};

use crate::error::IntError;
use crate::BigInteger;

/// Failure while reading an integer from a stream.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    /// A token was not a valid decimal integer.
    #[error(transparent)]
    Parse(#[from] IntError),
}

/// Splits a buffered reader into whitespace-separated tokens.
///
/// Lines are read lazily; a token never spans a line break.
#[derive(Debug)]
pub struct TokenReader<R> {
    reader: R,
    line: String,
    pos: usize,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pos: 0,
        }
    }

    /// The next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            let rest = &self.line[self.pos..];
            let trimmed = rest.trim_start();
            if !trimmed.is_empty() {
                let start = self.pos + (rest.len() - trimmed.len());
                let len = trimmed
                    .find(char::is_whitespace)
                    .unwrap_or(trimmed.len());
                self.pos = start + len;
                return Ok(Some(self.line[start..start + len].to_owned()));
            }
            self.line.clear();
            self.pos = 0;
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
        }
    }

    /// Read and parse the next token as a `BigInteger`.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_integer(&mut self) -> Result<Option<BigInteger>, ReadError> {
        match self.next_token()? {
            Some(token) => Ok(Some(token.parse()?)),
            None => Ok(None),
        }
    }
}

impl<R: BufRead> Iterator for TokenReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Read one integer from the front of `reader`.
///
/// Leading whitespace is skipped and the integer ends at the next
/// whitespace. End of input before any token is an `UnexpectedEof` I/O error.
pub fn read_integer<R: BufRead>(reader: R) -> Result<BigInteger, ReadError> {
    TokenReader::new(reader).read_integer()?.ok_or_else(|| {
        ReadError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "expected an integer",
        ))
    })
}

/// Write the canonical decimal form of `value` (no trailing newline).
pub fn write_integer<W: Write>(mut writer: W, value: &BigInteger) -> io::Result<()> {
    writer.write_all(value.to_decimal_string().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tokens_across_lines() {
        let reader = TokenReader::new(Cursor::new("  12 -3\n\n\t+4  \n5"));
        let tokens: Vec<String> = reader.collect::<io::Result<_>>().unwrap();
        assert_eq!(tokens, ["12", "-3", "+4", "5"]);
    }

    #[test]
    fn read_integer_skips_whitespace() {
        let value = read_integer(Cursor::new("\n   -98765432109876543210 tail")).unwrap();
        assert_eq!(value.to_string(), "-98765432109876543210");
    }

    #[test]
    fn read_integer_reports_parse_errors() {
        let err = read_integer(Cursor::new("12x")).unwrap_err();
        assert!(matches!(err, ReadError::Parse(IntError::InvalidFormat { .. })));
    }

    #[test]
    fn read_integer_at_eof() {
        let err = read_integer(Cursor::new("   \n")).unwrap_err();
        match err {
            ReadError::Io(io) => assert_eq!(io.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn write_is_canonical() {
        let mut out = Vec::new();
        write_integer(&mut out, &"-000120".parse().unwrap()).unwrap();
        assert_eq!(out, b"-120");
    }
}
