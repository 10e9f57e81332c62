//! GFF3 tokenizer.
//!
//! Turns a line-oriented byte stream into the six token kinds the parser
//! state machine understands. One physical line is consumed across several
//! [`Tokenizer::next_token`] calls: every word of the line becomes a
//! [`TokenKind::Word`] and the end of the line a [`TokenKind::Newline`].
//!
//! # Classification
//!
//! | Input | Token |
//! |-------|-------|
//! | input exhausted | [`TokenKind::Eof`] |
//! | end of line (or empty line) | [`TokenKind::Newline`] |
//! | `##gff-version` | [`TokenKind::Version`] |
//! | `##sequence-region` | [`TokenKind::Region`], followed by the rest of the line as one word |
//! | any other `##...` | [`TokenKind::Pragma`] (rest of the line is skipped) |
//! | space/tab-delimited text | [`TokenKind::Word`] |
//!
//! Runs of spaces and tabs count as one separator, so an empty feature
//! column cannot be expressed: `a\t\tb` yields the words `a` and `b`. A line
//! with a missing column therefore ends early and is reported as
//! `unexpected newline` (or `unexpected token` when it runs long), never as
//! `empty <column>`.
//!
//! Lines longer than [`MAX_LINE_LENGTH`] bytes are skipped without being
//! buffered and reported as `line too long`.

use crate::error::{GffError, Result};
use crate::formats::primitives::Diagnostic;
use log::trace;
use std::fmt;
use std::io::{self, BufRead, Read};

/// Two-character sentinel opening a directive line.
pub const PRAGMA_SENTINEL: &str = "##";
/// Keyword of the version directive.
pub const VERSION_KEYWORD: &str = "##gff-version";
/// Keyword of the region directive.
pub const REGION_KEYWORD: &str = "##sequence-region";
/// Longest accepted line in bytes, line ending included.
pub const MAX_LINE_LENGTH: usize = 8192;

/// Kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of the current line
    Newline,
    /// Input exhausted
    Eof,
    /// Unrecognized `##` directive
    Pragma,
    /// `##gff-version`
    Version,
    /// `##sequence-region`
    Region,
    /// Any other text
    Word,
}

impl TokenKind {
    /// All kinds, in transition-table column order.
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Newline,
        TokenKind::Pragma,
        TokenKind::Version,
        TokenKind::Region,
        TokenKind::Word,
        TokenKind::Eof,
    ];
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Newline => "NL",
            TokenKind::Eof => "EOF",
            TokenKind::Pragma => "PRAGMA",
            TokenKind::Version => "VERSION",
            TokenKind::Region => "REGION",
            TokenKind::Word => "WORD",
        };
        f.write_str(name)
    }
}

/// A classified piece of input.
///
/// `text` borrows the tokenizer's line buffer and is only valid until the
/// next call to [`Tokenizer::next_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token kind
    pub kind: TokenKind,
    /// Token text (empty for `Newline` and `Eof`)
    pub text: &'a str,
    /// Line number the token was read from (1-based)
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Creates a token.
    pub fn new(kind: TokenKind, text: &'a str, line: usize) -> Self {
        Self { kind, text, line }
    }
}

#[inline]
fn is_delimiter(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Streaming tokenizer over a buffered reader.
///
/// # Examples
///
/// ```
/// use biogff::formats::gff::{Tokenizer, TokenKind};
///
/// # fn main() -> biogff::Result<()> {
/// let mut tokenizer = Tokenizer::new("##gff-version 3\n".as_bytes());
///
/// assert_eq!(tokenizer.next_token()?.kind, TokenKind::Version);
/// assert_eq!(tokenizer.next_token()?.text, "3");
/// assert_eq!(tokenizer.next_token()?.kind, TokenKind::Newline);
/// assert_eq!(tokenizer.next_token()?.kind, TokenKind::Eof);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Tokenizer<R: BufRead> {
    reader: R,
    line: String,
    cursor: usize,
    line_number: usize,
    /// The current line is used up; the next call reads a new one
    line_consumed: bool,
    /// The next word spans the rest of the line
    rest_of_line: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Creates a tokenizer reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::with_capacity(1024),
            cursor: 0,
            line_number: 0,
            line_consumed: true,
            rest_of_line: false,
        }
    }

    /// Number of the last line read (1-based, 0 before any input).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Drops the unread remainder of the current line.
    ///
    /// The next token is taken from the following line. Does nothing at a
    /// line boundary.
    pub fn discard_line(&mut self) {
        self.line_consumed = true;
        self.rest_of_line = false;
    }

    /// Returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Produces the next token.
    ///
    /// # Errors
    ///
    /// - [`GffError::Parse`] with `line too long` for a line over
    ///   [`MAX_LINE_LENGTH`] bytes; the line is skipped
    /// - [`GffError::Io`] from the underlying reader, including
    ///   `InvalidData` for input that is not UTF-8
    pub fn next_token(&mut self) -> Result<Token<'_>> {
        if self.line_consumed {
            if !self.read_line()? {
                trace!("line {}: EOF", self.line_number);
                return Ok(Token::new(TokenKind::Eof, "", self.line_number));
            }
            strip_line_ending(&mut self.line);
            self.cursor = 0;
            self.line_consumed = false;
            self.rest_of_line = false;

            if self.line.starts_with(PRAGMA_SENTINEL) {
                return Ok(self.directive());
            }
        }

        let bytes = self.line.as_bytes();
        let mut start = self.cursor;
        while start < bytes.len() && is_delimiter(bytes[start]) {
            start += 1;
        }

        if start >= bytes.len() {
            self.cursor = bytes.len();
            self.line_consumed = true;
            return Ok(Token::new(TokenKind::Newline, "", self.line_number));
        }

        let end = if self.rest_of_line {
            self.rest_of_line = false;
            bytes.len()
        } else {
            let mut end = start;
            while end < bytes.len() && !is_delimiter(bytes[end]) {
                end += 1;
            }
            end
        };
        self.cursor = end;

        let text = self.line[start..end].trim_end();
        trace!("line {}: WORD {:?}", self.line_number, text);
        Ok(Token::new(TokenKind::Word, text, self.line_number))
    }

    /// Reads the next physical line into the buffer, at most
    /// [`MAX_LINE_LENGTH`] bytes of it. Returns `false` at end of input.
    fn read_line(&mut self) -> Result<bool> {
        let mut bytes = std::mem::take(&mut self.line).into_bytes();
        bytes.clear();
        let limit = MAX_LINE_LENGTH as u64 + 1;
        let read = (&mut self.reader).take(limit).read_until(b'\n', &mut bytes)?;
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;

        if bytes.len() > MAX_LINE_LENGTH {
            if bytes.last() != Some(&b'\n') {
                self.skip_rest_of_line()?;
            }
            bytes.clear();
            self.line = String::from_utf8(bytes).unwrap_or_default();
            return Err(GffError::Parse(Diagnostic::new(
                self.line_number,
                "line too long",
            )));
        }

        self.line = String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(true)
    }

    /// Consumes input up to and including the next line feed.
    fn skip_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let (found, used) = {
                let buf = self.reader.fill_buf()?;
                if buf.is_empty() {
                    return Ok(());
                }
                match buf.iter().position(|&b| b == b'\n') {
                    Some(pos) => (true, pos + 1),
                    None => (false, buf.len()),
                }
            };
            self.reader.consume(used);
            if found {
                return Ok(());
            }
        }
    }

    /// Classifies a line starting with the pragma sentinel.
    fn directive(&mut self) -> Token<'_> {
        let bytes = self.line.as_bytes();
        let mut end = 0;
        while end < bytes.len() && !is_delimiter(bytes[end]) {
            end += 1;
        }

        let kind = match &self.line[..end] {
            VERSION_KEYWORD => TokenKind::Version,
            REGION_KEYWORD => {
                self.rest_of_line = true;
                TokenKind::Region
            }
            _ => TokenKind::Pragma,
        };

        // Unknown directives carry no payload the grammar could use
        self.cursor = if kind == TokenKind::Pragma {
            bytes.len()
        } else {
            end
        };

        trace!("line {}: {} {:?}", self.line_number, kind, &self.line[..end]);
        Token::new(kind, &self.line[..end], self.line_number)
    }
}

fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_words_survive_tokenization(
            words in prop::collection::vec("[A-Za-z0-9=;.+-]{1,12}", 1..12)
        ) {
            let line = format!("{}\n", words.join("\t"));
            let mut tokenizer = Tokenizer::new(line.as_bytes());

            for expected in &words {
                let token = tokenizer.next_token().unwrap();
                prop_assert_eq!(token.kind, TokenKind::Word);
                prop_assert_eq!(token.text, expected.as_str());
                prop_assert_eq!(token.line, 1);
            }
            prop_assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Newline);
            prop_assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Eof);
        }

        #[test]
        fn test_line_numbers_never_decrease(input in "[a-c \t\n#-]{0,64}") {
            let mut tokenizer = Tokenizer::new(input.as_bytes());
            let mut last = 0;
            loop {
                let token = tokenizer.next_token().unwrap();
                prop_assert!(token.line >= last);
                last = token.line;
                if token.kind == TokenKind::Eof {
                    break;
                }
            }
        }
    }
}
