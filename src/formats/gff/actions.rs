//! Parser actions.
//!
//! Every transition of the state machine carries one [`Action`]. Actions
//! either reject the token with a [`Diagnostic`], copy the token text into a
//! bounded field of the in-progress [`Record`], or stamp the record's
//! [`ElementKind`] once its terminating newline has been seen.

use crate::formats::gff::element::{ElementKind, FeatureColumn, Record};
use crate::formats::gff::token::{Token, TokenKind};
use crate::formats::primitives::{Diagnostic, FieldError};

/// Work performed on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Do nothing
    Nop,
    /// Reject: `unexpected end-of-file`
    UnexpectedEof,
    /// Reject: `unexpected token`
    UnexpectedToken,
    /// Reject: `unexpected directive`
    UnexpectedPragma,
    /// Reject: `unexpected version directive`
    UnexpectedVersion,
    /// Reject: `unexpected region directive`
    UnexpectedRegion,
    /// Reject: `unexpected id`
    UnexpectedId,
    /// Reject: `unexpected newline`
    UnexpectedNewline,
    /// Copy the word into the version field
    ReadVersion,
    /// Copy the word into the region buffer and split it
    ReadRegion,
    /// Copy the word into a feature column
    ReadFeature(FeatureColumn),
    /// Stamp the record kind
    Finish(ElementKind),
}

impl Action {
    /// Applies the action to `record`.
    ///
    /// # Errors
    ///
    /// Returns a [`Diagnostic`] at `token.line` if the action rejects the
    /// token or the token text does not fit the destination field.
    pub fn apply(self, token: &Token<'_>, record: &mut Record) -> Result<(), Diagnostic> {
        let line = token.line;
        match self {
            Action::Nop => Ok(()),
            Action::UnexpectedEof => Err(Diagnostic::new(line, "unexpected end-of-file")),
            Action::UnexpectedToken => Err(Diagnostic::new(line, "unexpected token")),
            Action::UnexpectedPragma => Err(Diagnostic::new(line, "unexpected directive")),
            Action::UnexpectedVersion => {
                Err(Diagnostic::new(line, "unexpected version directive"))
            }
            Action::UnexpectedRegion => Err(Diagnostic::new(line, "unexpected region directive")),
            Action::UnexpectedId => Err(Diagnostic::new(line, "unexpected id")),
            Action::UnexpectedNewline => Err(Diagnostic::new(line, "unexpected newline")),
            Action::ReadVersion => {
                debug_assert_eq!(token.kind, TokenKind::Word);
                record
                    .version
                    .set(token.text)
                    .map_err(|e| Diagnostic::from_field(line, e))
            }
            Action::ReadRegion => {
                debug_assert_eq!(token.kind, TokenKind::Word);
                read_region(token, record)
            }
            Action::ReadFeature(column) => {
                debug_assert_eq!(token.kind, TokenKind::Word);
                if column == FeatureColumn::Seqid {
                    record.feature.clear();
                }
                record
                    .feature
                    .set(column, token.text)
                    .map_err(|e| Diagnostic::from_field(line, e))
            }
            Action::Finish(kind) => {
                debug_assert_eq!(token.kind, TokenKind::Newline);
                record.kind = kind;
                Ok(())
            }
        }
    }
}

/// Copies a `name start end` payload and locates its two space delimiters.
fn read_region(token: &Token<'_>, record: &mut Record) -> Result<(), Diagnostic> {
    let line = token.line;
    let region = &mut record.region;
    region.clear();

    region
        .buffer
        .try_set("region", token.text)
        .map_err(|e| Diagnostic::from_field(line, e))?;

    let text = region.buffer.as_str();
    let start_delim = text
        .find(' ')
        .ok_or_else(|| Diagnostic::new(line, "missing space"))?;
    let end_delim = text[start_delim + 1..]
        .find(' ')
        .map(|pos| start_delim + 1 + pos)
        .ok_or_else(|| Diagnostic::new(line, "missing space"))?;

    region.start_delim = start_delim;
    region.end_delim = end_delim;

    for (field, part) in [
        ("name", region.name()),
        ("start", region.start()),
        ("end", region.end()),
    ] {
        if part.is_empty() {
            return Err(Diagnostic::from_field(line, FieldError::Empty { field }));
        }
    }
    Ok(())
}
