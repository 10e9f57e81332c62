//! GFF3 format writer with compression support
//!
//! Serializes [`Element`]s back to text, one line each:
//! - [`Element::Version`] → `##gff-version <version>`
//! - [`Element::Region`] → `##sequence-region <name> <start> <end>`
//! - [`Element::Feature`] → the 9 columns joined by tabs
//!
//! Fields were validated when the element was built, so writing never
//! rejects an element; only I/O can fail.
//!
//! # Example
//!
//! ```no_run
//! use biogff::formats::gff::{Element, Feature, Version};
//! use biogff::formats::gff_writer::GffWriter;
//!
//! # fn main() -> biogff::Result<()> {
//! let mut writer = GffWriter::create("annotations.gff3.gz")?;
//!
//! writer.write_element(&Element::Version(Version::new("3")?))?;
//! let feature = Feature::from_columns(
//!     ["chr1", "ENSEMBL", "gene", "11869", "14409", ".", "+", ".", "ID=gene:DDX11L1"],
//! )?;
//! writer.write_element(&Element::Feature(feature))?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::formats::gff::element::Element;
use crate::formats::gff::token::{REGION_KEYWORD, VERSION_KEYWORD};
use crate::io::compression::CompressedWriter;
use crate::io::sink::DataSink;
use std::io::Write;
use std::path::Path;

/// GFF3 format writer
///
/// Output is gzip compressed when the sink path ends in `.gz`, `.bgz`
/// or `.gzip`.
pub struct GffWriter {
    writer: CompressedWriter,
    elements_written: usize,
}

impl GffWriter {
    /// Create a new GFF3 writer from a data sink
    pub fn new(sink: DataSink) -> Result<Self> {
        Ok(Self::from_compressed(CompressedWriter::new(sink)?))
    }

    /// Create a GFF3 writer from a file path
    ///
    /// # Example
    ///
    /// ```no_run
    /// use biogff::formats::gff_writer::GffWriter;
    ///
    /// # fn main() -> biogff::Result<()> {
    /// let mut writer = GffWriter::create("output.gff3")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSink::from_path(path))
    }

    /// Create a GFF3 writer to stdout
    pub fn stdout() -> Result<Self> {
        Self::new(DataSink::stdout())
    }

    /// Wrap an arbitrary uncompressed destination
    pub fn from_writer(writer: Box<dyn Write>) -> Self {
        Self::from_compressed(CompressedWriter::new_plain(writer))
    }

    fn from_compressed(writer: CompressedWriter) -> Self {
        Self {
            writer,
            elements_written: 0,
        }
    }

    /// Write a single element
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    pub fn write_element(&mut self, element: &Element) -> Result<()> {
        match element {
            Element::Version(version) => {
                writeln!(self.writer, "{} {}", VERSION_KEYWORD, version.as_str())?
            }
            Element::Region(region) => writeln!(
                self.writer,
                "{} {} {} {}",
                REGION_KEYWORD,
                region.name(),
                region.start(),
                region.end()
            )?,
            Element::Feature(feature) => {
                writeln!(self.writer, "{}", feature.columns().join("\t"))?
            }
        }

        self.elements_written += 1;
        Ok(())
    }

    /// Write multiple elements from an iterator
    ///
    /// Stops at the first `Err` item, so a [`GffReader`] can be piped
    /// straight into a writer.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use biogff::formats::gff::GffReader;
    /// use biogff::formats::gff_writer::GffWriter;
    ///
    /// # fn main() -> biogff::Result<()> {
    /// let reader = GffReader::from_path("input.gff3")?;
    /// let mut writer = GffWriter::create("output.gff3.gz")?;
    /// writer.write_all(reader)?;
    /// writer.finish()?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [`GffReader`]: crate::formats::gff::GffReader
    pub fn write_all<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<Element>>,
    {
        for element in elements {
            self.write_element(&element?)?;
        }
        Ok(())
    }

    /// Get the number of elements written so far
    pub fn elements_written(&self) -> usize {
        self.elements_written
    }

    /// Flush buffered data
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }

    /// Finish writing, flushing buffers and closing the gzip stream.
    ///
    /// Must be called for compressed output to be complete.
    pub fn finish(self) -> Result<()> {
        Ok(self.writer.finish()?)
    }
}
