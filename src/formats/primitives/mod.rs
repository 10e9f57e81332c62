//! Shared primitives for the GFF parser and writer.
//!
//! This module provides the pieces every record type is built from:
//! - [`BoundedField`]: fixed-capacity, non-empty string slots
//! - [`FieldError`]: why a value was rejected by a bounded field
//! - [`Diagnostic`]: a line-numbered parse error
//!
//! # Example: Using Bounded Fields
//!
//! ```
//! use biogff::formats::primitives::{BoundedField, FieldError};
//!
//! let mut seqid = BoundedField::<8>::new();
//! seqid.try_set("seqid", "chr1")?;
//! assert_eq!(seqid.as_str(), "chr1");
//!
//! // Capacity counts a terminator slot: 8 bytes do not fit in an 8-byte field
//! let err = seqid.try_set("seqid", "chrUn_01").unwrap_err();
//! assert_eq!(err, FieldError::TooLong { field: "seqid" });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

pub mod bounded;

// Re-exports
pub use bounded::BoundedField;

/// Maximum length in bytes of a diagnostic message.
pub const DIAGNOSTIC_MESSAGE_CAPACITY: usize = 128;

/// Errors raised when a value does not fit a bounded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Value does not leave room for the terminator slot.
    #[error("too long {field}")]
    TooLong {
        /// Field name
        field: &'static str,
    },

    /// Value is empty.
    #[error("empty {field}")]
    Empty {
        /// Field name
        field: &'static str,
    },

    /// Value holds a column or line separator, or would read as a directive.
    #[error("invalid {field}")]
    Invalid {
        /// Field name
        field: &'static str,
    },
}

/// A syntax error tied to the input line that caused it.
///
/// Messages longer than [`DIAGNOSTIC_MESSAGE_CAPACITY`] bytes are truncated
/// on a character boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line}: {message}")]
pub struct Diagnostic {
    /// Line number where the error occurred (1-based)
    pub line: usize,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic, bounding the message length.
    ///
    /// # Examples
    ///
    /// ```
    /// use biogff::formats::primitives::Diagnostic;
    ///
    /// let diag = Diagnostic::new(3, "unexpected token");
    /// assert_eq!(diag.to_string(), "parse error at line 3: unexpected token");
    /// ```
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.len() > DIAGNOSTIC_MESSAGE_CAPACITY {
            let mut end = DIAGNOSTIC_MESSAGE_CAPACITY;
            while !message.is_char_boundary(end) {
                end -= 1;
            }
            message.truncate(end);
        }
        Self { line, message }
    }

    /// Attaches a line number to a field error.
    pub fn from_field(line: usize, err: FieldError) -> Self {
        Self::new(line, err.to_string())
    }
}
