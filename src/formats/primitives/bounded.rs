//! Fixed-capacity string fields.
//!
//! Every column of a GFF record is stored in a [`BoundedField`] whose
//! capacity is fixed at compile time. The capacity counts one terminator
//! slot, so a field of capacity `CAP` holds at most `CAP - 1` bytes.
//!
//! Values are never truncated: a value that does not fit is rejected with
//! [`FieldError::TooLong`], an empty value with [`FieldError::Empty`].

use crate::formats::primitives::FieldError;
use std::fmt;

/// A non-empty string of at most `CAP - 1` bytes.
///
/// A freshly created field is unset (empty). Once [`try_set`](Self::try_set)
/// succeeds it holds a non-empty value that fits the capacity.
///
/// # Examples
///
/// ```
/// use biogff::formats::primitives::{BoundedField, FieldError};
///
/// let mut strand = BoundedField::<2>::new();
/// assert!(strand.try_set("strand", "+").is_ok());
/// assert_eq!(strand.try_set("strand", "+-"), Err(FieldError::TooLong { field: "strand" }));
/// assert_eq!(strand.try_set("strand", ""), Err(FieldError::Empty { field: "strand" }));
///
/// // Failed writes leave the previous value in place
/// assert_eq!(strand.as_str(), "+");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedField<const CAP: usize> {
    value: String,
}

impl<const CAP: usize> BoundedField<CAP> {
    /// Creates an unset field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
        }
    }

    /// Creates a field holding `text`.
    ///
    /// # Errors
    ///
    /// Same as [`try_set`](Self::try_set).
    pub fn try_from_str(field: &'static str, text: &str) -> Result<Self, FieldError> {
        let mut bounded = Self::new();
        bounded.try_set(field, text)?;
        Ok(bounded)
    }

    /// Replaces the content with `text`.
    ///
    /// `field` names the column in the returned error.
    ///
    /// # Errors
    ///
    /// - [`FieldError::TooLong`] if `text.len() >= CAP`
    /// - [`FieldError::Empty`] if `text` is empty
    pub fn try_set(&mut self, field: &'static str, text: &str) -> Result<(), FieldError> {
        if text.len() >= CAP {
            return Err(FieldError::TooLong { field });
        }
        if text.is_empty() {
            return Err(FieldError::Empty { field });
        }
        self.value.clear();
        self.value.push_str(text);
        Ok(())
    }

    /// Resets the field to unset.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Returns the content.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns `true` if the field is unset.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl<const CAP: usize> AsRef<str> for BoundedField<CAP> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const CAP: usize> fmt::Debug for BoundedField<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<const CAP: usize> fmt::Display for BoundedField<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<const CAP: usize> PartialEq<str> for BoundedField<CAP> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<const CAP: usize> PartialEq<&str> for BoundedField<CAP> {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_minus_one_fits() {
        let mut field = BoundedField::<16>::new();
        let text = "a".repeat(15);
        assert!(field.try_set("version", &text).is_ok());
        assert_eq!(field.len(), 15);
    }

    #[test]
    fn test_capacity_reached_is_too_long() {
        let mut field = BoundedField::<16>::new();
        let text = "a".repeat(16);
        assert_eq!(
            field.try_set("version", &text),
            Err(FieldError::TooLong { field: "version" })
        );
        assert!(field.is_empty());
    }

    #[test]
    fn test_empty_is_rejected() {
        let mut field = BoundedField::<16>::new();
        assert_eq!(field.try_set("source", ""), Err(FieldError::Empty { field: "source" }));
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let mut field = BoundedField::<16>::new();
        field.try_set("type", "gene").unwrap();
        field.try_set("type", "mRNA").unwrap();
        assert_eq!(field, "mRNA");
    }

    #[test]
    fn test_clear() {
        let mut field = BoundedField::<16>::try_from_str("seqid", "chr1").unwrap();
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.as_str(), "");
    }

    #[test]
    fn test_capacity_counts_bytes_not_chars() {
        // "é" is two bytes: 2 chars = 4 bytes, does not fit CAP = 4
        let mut field = BoundedField::<4>::new();
        assert!(field.try_set("attributes", "éé").is_err());
        assert!(field.try_set("attributes", "é").is_ok());
    }

    #[test]
    fn test_display_and_debug() {
        let field = BoundedField::<8>::try_from_str("strand", "+").unwrap();
        assert_eq!(format!("{}", field), "+");
        assert_eq!(format!("{:?}", field), "\"+\"");
    }
}
