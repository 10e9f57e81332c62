//! Streaming GFF3 reader.
//!
//! [`GffReader`] owns a [`Tokenizer`], the parser [`State`] and the
//! in-progress [`Record`]. Each call to
//! [`read_next_element`](GffReader::read_next_element) pulls tokens through
//! the state machine until a record is finished, the stream ends, or an
//! error traps the machine.

use crate::error::{GffError, Result};
use crate::formats::gff::element::{Element, Record};
use crate::formats::gff::fsm::{advance, State};
use crate::formats::gff::token::{TokenKind, Tokenizer};
use crate::formats::primitives::Diagnostic;
use crate::io::compression::{CompressedReader, DataSource};
use log::{debug, warn};
use std::io::BufRead;
use std::path::Path;

/// GFF3 reader with streaming support.
///
/// # Examples
///
/// ```
/// use biogff::formats::gff::{Element, GffReader};
///
/// # fn main() -> biogff::Result<()> {
/// let data = "##gff-version 3\nchr1\t.\tgene\t1\t100\t.\t+\t.\tID=g1\n";
/// let mut reader = GffReader::new(data.as_bytes());
///
/// let mut features = 0;
/// while let Some(element) = reader.read_next_element()? {
///     if let Element::Feature(feature) = element {
///         assert_eq!(feature.seqid(), "chr1");
///         features += 1;
///     }
/// }
/// assert_eq!(features, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GffReader<R: BufRead> {
    tokenizer: Tokenizer<R>,
    state: State,
    record: Record,
    /// A version directive has been finished
    seen_version: bool,
    last_error: Option<Diagnostic>,
}

impl<R: BufRead> GffReader<R> {
    /// Creates a reader over a buffered byte stream.
    pub fn new(reader: R) -> Self {
        Self {
            tokenizer: Tokenizer::new(reader),
            state: State::Begin,
            record: Record::new(),
            seen_version: false,
            last_error: None,
        }
    }

    /// Current parser state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of the last line read (1-based).
    pub fn line_number(&self) -> usize {
        self.tokenizer.line_number()
    }

    /// The diagnostic that sent the reader to [`State::Error`], if any.
    pub fn last_error(&self) -> Option<&Diagnostic> {
        self.last_error.as_ref()
    }

    /// Returns the inner reader.
    pub fn into_inner(self) -> R {
        self.tokenizer.into_inner()
    }

    /// Reads the next element.
    ///
    /// Returns `Ok(None)` once the stream is exhausted: either an empty
    /// stream (`Begin` -> `End`) or end of input right after a finished
    /// record. The reader is then in [`State::End`] and further calls keep
    /// returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`GffError::Parse`] with the diagnostic that sent the reader to
    ///   [`State::Error`]. The reader stays there until
    ///   [`clear_error`](Self::clear_error) is called; see below.
    /// - [`GffError::Io`] if the underlying reader fails
    ///
    /// # Error state
    ///
    /// While in [`State::Error`] each call still consumes one token. Newlines,
    /// words, unknown directives and end of input are absorbed and the stored
    /// diagnostic is returned again. A `##gff-version` or
    /// `##sequence-region` directive is flagged with a fresh diagnostic at
    /// its own line, which replaces the stored one.
    pub fn read_next_element(&mut self) -> Result<Option<Element>> {
        if self.state == State::Error {
            return Err(self.step_in_error());
        }

        self.record.reset();
        loop {
            let token = match self.tokenizer.next_token() {
                Ok(token) => token,
                Err(GffError::Parse(diag)) => return Err(self.enter_error(diag)),
                Err(err) => return Err(err),
            };

            // The table rejects EOF in PAUSE; at a record boundary it ends the document.
            if self.state == State::Pause && token.kind == TokenKind::Eof {
                debug!("line {}: end of document", token.line);
                self.state = State::End;
                return Ok(None);
            }

            match advance(self.state, &token, &mut self.record) {
                Ok(next) => self.state = next,
                Err(diag) => return Err(self.enter_error(diag)),
            }

            match self.state {
                State::Pause => {
                    let element = self
                        .record
                        .element()
                        .ok_or_else(|| self.fail("incomplete element"))?;
                    if matches!(element, Element::Version(_)) {
                        self.seen_version = true;
                    }
                    debug!("line {}: {:?}", self.line_number(), element.kind());
                    return Ok(Some(element));
                }
                State::End => return Ok(None),
                _ => {}
            }
        }
    }

    /// Leaves [`State::Error`] for best-effort resynchronization.
    ///
    /// Drops the unread rest of the current line and resets to
    /// [`State::Pause`] if a version directive has been read, else to
    /// [`State::Begin`]. What counts as resynchronized is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`GffError::NotInErrorState`] if the reader is not in
    /// [`State::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use biogff::formats::gff::{Element, GffReader, State};
    ///
    /// # fn main() -> biogff::Result<()> {
    /// let data = "##gff-version 3\nbad line\nchr1\t.\tgene\t1\t9\t.\t+\t.\tID=g1\n";
    /// let mut reader = GffReader::new(data.as_bytes());
    ///
    /// reader.read_next_element()?;
    /// assert!(reader.read_next_element().is_err());
    ///
    /// reader.clear_error()?;
    /// assert_eq!(reader.state(), State::Pause);
    /// assert!(matches!(reader.read_next_element()?, Some(Element::Feature(_))));
    /// # Ok(())
    /// # }
    /// ```
    pub fn clear_error(&mut self) -> Result<()> {
        if self.state != State::Error {
            return Err(GffError::NotInErrorState { state: self.state });
        }
        self.tokenizer.discard_line();
        self.state = if self.seen_version {
            State::Pause
        } else {
            State::Begin
        };
        self.last_error = None;
        self.record.reset();
        debug!(
            "line {}: cleared error, resuming in {}",
            self.line_number(),
            self.state
        );
        Ok(())
    }

    /// Feeds one token through the error row of the transition table.
    fn step_in_error(&mut self) -> GffError {
        let token = match self.tokenizer.next_token() {
            Ok(token) => token,
            Err(GffError::Parse(diag)) => return self.enter_error(diag),
            Err(err) => return err,
        };

        match advance(State::Error, &token, &mut self.record) {
            Ok(_) => {
                let diag = self.last_error.clone().unwrap_or_else(|| {
                    Diagnostic::new(self.tokenizer.line_number(), "parser in error state")
                });
                GffError::Parse(diag)
            }
            Err(diag) => self.enter_error(diag),
        }
    }

    fn enter_error(&mut self, diag: Diagnostic) -> GffError {
        warn!("{}: entering {} from {}", diag, State::Error, self.state);
        self.state = State::Error;
        self.last_error = Some(diag.clone());
        GffError::Parse(diag)
    }

    fn fail(&mut self, message: &str) -> GffError {
        let diag = Diagnostic::new(self.line_number(), message);
        self.enter_error(diag)
    }
}

impl GffReader<CompressedReader> {
    /// Creates a reader from a data source.
    ///
    /// Gzip/bgzip input is detected by its magic bytes and decompressed
    /// transparently.
    pub fn from_source(source: DataSource) -> Result<Self> {
        Ok(Self::new(CompressedReader::new(source)?))
    }

    /// Creates a reader from a file path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use biogff::formats::gff::GffReader;
    ///
    /// # fn main() -> biogff::Result<()> {
    /// let reader = GffReader::from_path("annotations.gff3.gz")?;
    /// for element in reader {
    ///     let element = element?;
    ///     println!("{:?}", element.kind());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_source(DataSource::from_path(path))
    }
}

/// Yields elements until the end of the stream or the first error.
impl<R: BufRead> Iterator for GffReader<R> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.is_terminal() {
            return None;
        }
        self.read_next_element().transpose()
    }
}
