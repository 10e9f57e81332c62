//! GFF3 elements: version directives, region directives and features.
//!
//! Every column is stored in a [`BoundedField`] with a per-role capacity.
//! The capacities count one terminator slot, so e.g. a version string may be
//! at most `VERSION_SIZE - 1` bytes long.
//!
//! Elements can only be built through validating constructors. A value that
//! holds a space, tab, CR or LF (or a seqid opening with `##`) is rejected
//! with [`FieldError::Invalid`], so every element written back out tokenizes
//! to the same fields.

use crate::formats::gff::token::PRAGMA_SENTINEL;
use crate::formats::primitives::{BoundedField, FieldError};

/// Capacity of the version string of `##gff-version`.
pub const VERSION_SIZE: usize = 16;
/// Capacity of the whole `##sequence-region` payload (`name start end`).
pub const REGION_SIZE: usize = 128;
/// Capacity of the seqid column.
pub const FEATURE_SEQID_SIZE: usize = 64;
/// Capacity of the source column.
pub const FEATURE_SOURCE_SIZE: usize = 64;
/// Capacity of the type column.
pub const FEATURE_TYPE_SIZE: usize = 64;
/// Capacity of the start column.
pub const FEATURE_START_SIZE: usize = 16;
/// Capacity of the end column.
pub const FEATURE_END_SIZE: usize = 16;
/// Capacity of the score column.
pub const FEATURE_SCORE_SIZE: usize = 16;
/// Capacity of the strand column.
pub const FEATURE_STRAND_SIZE: usize = 2;
/// Capacity of the phase column.
pub const FEATURE_PHASE_SIZE: usize = 2;
/// Capacity of the attributes column.
pub const FEATURE_ATTRS_SIZE: usize = 512;

/// Rejects bytes that would split a column or end the line.
fn check_word(field: &'static str, text: &str) -> Result<(), FieldError> {
    if text
        .bytes()
        .any(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
    {
        return Err(FieldError::Invalid { field });
    }
    Ok(())
}

/// Which kind of element a finished record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// Record not finished yet
    #[default]
    Unknown,
    /// `##gff-version`
    Version,
    /// `##sequence-region`
    Region,
    /// 9-column feature line
    Feature,
}

/// A `##gff-version` directive.
///
/// # Examples
///
/// ```
/// use biogff::formats::gff::Version;
///
/// let version = Version::new("3")?;
/// assert_eq!(version.as_str(), "3");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub(crate) version: BoundedField<VERSION_SIZE>,
}

impl Version {
    /// Creates a version directive.
    pub fn new(version: &str) -> Result<Self, FieldError> {
        let mut directive = Self::empty();
        directive.set(version)?;
        Ok(directive)
    }

    pub(crate) fn empty() -> Self {
        Self {
            version: BoundedField::new(),
        }
    }

    pub(crate) fn set(&mut self, text: &str) -> Result<(), FieldError> {
        check_word("version", text)?;
        self.version.try_set("version", text)
    }

    /// The version string.
    pub fn as_str(&self) -> &str {
        self.version.as_str()
    }
}

/// A `##sequence-region` directive.
///
/// The directive payload is kept as one scanned buffer (`name start end`)
/// plus the offsets of its two space delimiters.
///
/// # Examples
///
/// ```
/// use biogff::formats::gff::Region;
///
/// let region = Region::new("chr1", "1", "248956422")?;
/// assert_eq!(region.name(), "chr1");
/// assert_eq!(region.start(), "1");
/// assert_eq!(region.end(), "248956422");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    pub(crate) buffer: BoundedField<REGION_SIZE>,
    /// Offset of the space before `start`
    pub(crate) start_delim: usize,
    /// Offset of the space before `end`
    pub(crate) end_delim: usize,
}

impl Region {
    /// Creates a region directive from its three parts.
    ///
    /// # Errors
    ///
    /// - [`FieldError::Empty`] if any part is empty
    /// - [`FieldError::Invalid`] if any part holds whitespace or a line break
    /// - [`FieldError::TooLong`] if the joined payload exceeds [`REGION_SIZE`]
    pub fn new(name: &str, start: &str, end: &str) -> Result<Self, FieldError> {
        for (field, part) in [("name", name), ("start", start), ("end", end)] {
            if part.is_empty() {
                return Err(FieldError::Empty { field });
            }
            check_word(field, part)?;
        }
        let joined = format!("{} {} {}", name, start, end);
        Ok(Self {
            buffer: BoundedField::try_from_str("region", &joined)?,
            start_delim: name.len(),
            end_delim: name.len() + 1 + start.len(),
        })
    }

    pub(crate) fn empty() -> Self {
        Self {
            buffer: BoundedField::new(),
            start_delim: 0,
            end_delim: 0,
        }
    }

    /// Resets to an empty region.
    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
        self.start_delim = 0;
        self.end_delim = 0;
    }

    /// Sequence name.
    pub fn name(&self) -> &str {
        self.buffer.as_str().get(..self.start_delim).unwrap_or("")
    }

    /// Start coordinate, verbatim.
    pub fn start(&self) -> &str {
        self.buffer
            .as_str()
            .get(self.start_delim + 1..self.end_delim)
            .unwrap_or("")
    }

    /// End coordinate, verbatim.
    pub fn end(&self) -> &str {
        self.buffer.as_str().get(self.end_delim + 1..).unwrap_or("")
    }

    /// The raw `name start end` payload.
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }
}

/// One of the nine feature columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    /// Column 1
    Seqid,
    /// Column 2
    Source,
    /// Column 3
    Type,
    /// Column 4
    Start,
    /// Column 5
    End,
    /// Column 6
    Score,
    /// Column 7
    Strand,
    /// Column 8
    Phase,
    /// Column 9
    Attributes,
}

impl FeatureColumn {
    /// All columns in file order.
    pub const ALL: [FeatureColumn; 9] = [
        FeatureColumn::Seqid,
        FeatureColumn::Source,
        FeatureColumn::Type,
        FeatureColumn::Start,
        FeatureColumn::End,
        FeatureColumn::Score,
        FeatureColumn::Strand,
        FeatureColumn::Phase,
        FeatureColumn::Attributes,
    ];

    /// Name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            FeatureColumn::Seqid => "seqid",
            FeatureColumn::Source => "source",
            FeatureColumn::Type => "type",
            FeatureColumn::Start => "start",
            FeatureColumn::End => "end",
            FeatureColumn::Score => "score",
            FeatureColumn::Strand => "strand",
            FeatureColumn::Phase => "phase",
            FeatureColumn::Attributes => "attributes",
        }
    }
}

/// A 9-column feature line.
///
/// Columns are kept verbatim; no coordinate or attribute interpretation is
/// done.
///
/// # Examples
///
/// ```
/// use biogff::formats::gff::Feature;
///
/// let feature = Feature::from_columns(["chr1", ".", "gene", "1", "100", ".", "+", ".", "ID=g1"])?;
/// assert_eq!(feature.seqid(), "chr1");
/// assert_eq!(feature.feature_type(), "gene");
/// assert_eq!(feature.attributes(), "ID=g1");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature {
    pub(crate) seqid: BoundedField<FEATURE_SEQID_SIZE>,
    pub(crate) source: BoundedField<FEATURE_SOURCE_SIZE>,
    pub(crate) feature_type: BoundedField<FEATURE_TYPE_SIZE>,
    pub(crate) start: BoundedField<FEATURE_START_SIZE>,
    pub(crate) end: BoundedField<FEATURE_END_SIZE>,
    pub(crate) score: BoundedField<FEATURE_SCORE_SIZE>,
    pub(crate) strand: BoundedField<FEATURE_STRAND_SIZE>,
    pub(crate) phase: BoundedField<FEATURE_PHASE_SIZE>,
    pub(crate) attributes: BoundedField<FEATURE_ATTRS_SIZE>,
}

impl Feature {
    /// Builds a feature from its nine columns in file order.
    ///
    /// # Errors
    ///
    /// The first column rejected by [`set`](Self::set).
    pub fn from_columns(columns: [&str; 9]) -> Result<Self, FieldError> {
        let mut feature = Self::empty();
        for (column, text) in FeatureColumn::ALL.into_iter().zip(columns) {
            feature.set(column, text)?;
        }
        Ok(feature)
    }

    pub(crate) fn empty() -> Self {
        Self {
            seqid: BoundedField::new(),
            source: BoundedField::new(),
            feature_type: BoundedField::new(),
            start: BoundedField::new(),
            end: BoundedField::new(),
            score: BoundedField::new(),
            strand: BoundedField::new(),
            phase: BoundedField::new(),
            attributes: BoundedField::new(),
        }
    }

    /// Sets one column.
    ///
    /// # Errors
    ///
    /// - [`FieldError::Empty`] / [`FieldError::TooLong`] from the column's capacity
    /// - [`FieldError::Invalid`] if `text` holds a space, tab, CR or LF, or if a
    ///   seqid starts with `##`
    pub fn set(&mut self, column: FeatureColumn, text: &str) -> Result<(), FieldError> {
        let name = column.name();
        check_word(name, text)?;
        if column == FeatureColumn::Seqid && text.starts_with(PRAGMA_SENTINEL) {
            return Err(FieldError::Invalid { field: name });
        }
        match column {
            FeatureColumn::Seqid => self.seqid.try_set(name, text),
            FeatureColumn::Source => self.source.try_set(name, text),
            FeatureColumn::Type => self.feature_type.try_set(name, text),
            FeatureColumn::Start => self.start.try_set(name, text),
            FeatureColumn::End => self.end.try_set(name, text),
            FeatureColumn::Score => self.score.try_set(name, text),
            FeatureColumn::Strand => self.strand.try_set(name, text),
            FeatureColumn::Phase => self.phase.try_set(name, text),
            FeatureColumn::Attributes => self.attributes.try_set(name, text),
        }
    }

    /// Returns one column.
    pub fn get(&self, column: FeatureColumn) -> &str {
        match column {
            FeatureColumn::Seqid => self.seqid.as_str(),
            FeatureColumn::Source => self.source.as_str(),
            FeatureColumn::Type => self.feature_type.as_str(),
            FeatureColumn::Start => self.start.as_str(),
            FeatureColumn::End => self.end.as_str(),
            FeatureColumn::Score => self.score.as_str(),
            FeatureColumn::Strand => self.strand.as_str(),
            FeatureColumn::Phase => self.phase.as_str(),
            FeatureColumn::Attributes => self.attributes.as_str(),
        }
    }

    /// The nine columns in file order.
    pub fn columns(&self) -> [&str; 9] {
        FeatureColumn::ALL.map(|column| self.get(column))
    }

    pub(crate) fn clear(&mut self) {
        self.seqid.clear();
        self.source.clear();
        self.feature_type.clear();
        self.start.clear();
        self.end.clear();
        self.score.clear();
        self.strand.clear();
        self.phase.clear();
        self.attributes.clear();
    }

    /// Sequence id (column 1)
    pub fn seqid(&self) -> &str {
        self.seqid.as_str()
    }

    /// Source (column 2)
    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    /// Feature type (column 3)
    pub fn feature_type(&self) -> &str {
        self.feature_type.as_str()
    }

    /// Start coordinate, verbatim (column 4)
    pub fn start(&self) -> &str {
        self.start.as_str()
    }

    /// End coordinate, verbatim (column 5)
    pub fn end(&self) -> &str {
        self.end.as_str()
    }

    /// Score (column 6)
    pub fn score(&self) -> &str {
        self.score.as_str()
    }

    /// Strand (column 7)
    pub fn strand(&self) -> &str {
        self.strand.as_str()
    }

    /// Phase (column 8)
    pub fn phase(&self) -> &str {
        self.phase.as_str()
    }

    /// Attributes, verbatim (column 9)
    pub fn attributes(&self) -> &str {
        self.attributes.as_str()
    }
}

/// A finished GFF3 element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    /// `##gff-version <version>`
    Version(Version),
    /// `##sequence-region <name> <start> <end>`
    Region(Region),
    /// 9-column feature line
    Feature(Feature),
}

impl Element {
    /// Discriminant of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Version(_) => ElementKind::Version,
            Element::Region(_) => ElementKind::Region,
            Element::Feature(_) => ElementKind::Feature,
        }
    }
}

/// In-progress record filled by the parser actions.
///
/// Only the part named by `kind` is meaningful, and only once `kind` has been
/// stamped by a finalizing transition.
#[derive(Debug, Clone)]
pub struct Record {
    pub(crate) kind: ElementKind,
    pub(crate) version: Version,
    pub(crate) region: Region,
    pub(crate) feature: Feature,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            kind: ElementKind::Unknown,
            version: Version::empty(),
            region: Region::empty(),
            feature: Feature::empty(),
        }
    }
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discriminant stamped so far.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Marks the record as unfinished.
    pub fn reset(&mut self) {
        self.kind = ElementKind::Unknown;
    }

    /// Returns the finished element, or `None` while the record is unfinished.
    pub fn element(&self) -> Option<Element> {
        match self.kind {
            ElementKind::Unknown => None,
            ElementKind::Version => Some(Element::Version(self.version.clone())),
            ElementKind::Region => Some(Element::Region(self.region.clone())),
            ElementKind::Feature => Some(Element::Feature(self.feature.clone())),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_whitespace_in_any_column_is_rejected(
            column in 0usize..9,
            prefix in "[A-Za-z0-9=;.]{0,5}",
            separator in "[ \t\r\n]",
            suffix in "[A-Za-z0-9=;.]{0,5}",
        ) {
            let value = format!("{}{}{}", prefix, separator, suffix);
            let mut cols = ["chr1", ".", "gene", "1", "100", ".", "+", ".", "ID=g1"];
            cols[column] = value.as_str();

            prop_assert_eq!(
                Feature::from_columns(cols),
                Err(FieldError::Invalid { field: FeatureColumn::ALL[column].name() })
            );
        }

        #[test]
        fn test_whitespace_in_directives_is_rejected(
            word in "[A-Za-z0-9.]{0,4}[ \t\r\n][A-Za-z0-9.]{0,4}",
        ) {
            prop_assert_eq!(
                Version::new(&word),
                Err(FieldError::Invalid { field: "version" })
            );
            prop_assert_eq!(
                Region::new(&word, "1", "2"),
                Err(FieldError::Invalid { field: "name" })
            );
            prop_assert_eq!(
                Region::new("chr1", "1", &word),
                Err(FieldError::Invalid { field: "end" })
            );
        }
    }
}
