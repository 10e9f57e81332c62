//! Error types for biogff

use crate::formats::gff::State;
use crate::formats::primitives::{Diagnostic, FieldError};
use thiserror::Error;

/// Result type alias for biogff operations
pub type Result<T> = std::result::Result<T, GffError>;

/// Error types that can occur in biogff
#[derive(Debug, Error)]
pub enum GffError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error in the GFF stream
    #[error(transparent)]
    Parse(#[from] Diagnostic),

    /// Value rejected by a bounded field
    #[error("Invalid field: {0}")]
    Field(#[from] FieldError),

    /// `clear_error` called outside the error state
    #[error("Reader is not in the error state (state: {state})")]
    NotInErrorState {
        /// Current parser state
        state: State,
    },
}

impl GffError {
    /// The diagnostic of a parse error.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            GffError::Parse(diag) => Some(diag),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = GffError::from(Diagnostic::new(12, "missing space"));
        assert_eq!(err.to_string(), "parse error at line 12: missing space");
        assert_eq!(err.diagnostic().map(|d| d.line), Some(12));
    }

    #[test]
    fn test_field_error_display() {
        let err = GffError::from(FieldError::Empty { field: "seqid" });
        assert_eq!(err.to_string(), "Invalid field: empty seqid");
        assert!(err.diagnostic().is_none());
    }

    #[test]
    fn test_not_in_error_state_display() {
        let err = GffError::NotInErrorState { state: State::Pause };
        assert_eq!(
            err.to_string(),
            "Reader is not in the error state (state: PAUSE)"
        );
    }
}
