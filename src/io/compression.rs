//! Input sources and transparent (de)compression.
//!
//! - [`DataSource`] names where input comes from
//! - [`CompressedReader`] sniffs the gzip magic bytes and decompresses
//!   gzip/bgzip input on the fly (bgzip is multi-member gzip)
//! - [`CompressedWriter`] picks plain or gzip output from a [`DataSink`]

use crate::error::Result;
use crate::io::sink::DataSink;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Input source for streaming reads
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Open the data source and return a buffered reader
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            DataSource::Local(path) => {
                let file = File::open(path)?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Buffered reader that decompresses gzip input transparently.
///
/// # Example
///
/// ```no_run
/// use biogff::io::compression::{CompressedReader, DataSource};
///
/// # fn main() -> biogff::Result<()> {
/// let source = DataSource::from_path("annotations.gff3.gz");
/// let reader = CompressedReader::new(source)?;
/// // Reader implements BufRead, use with GffReader
/// # Ok(())
/// # }
/// ```
pub struct CompressedReader {
    inner: Box<dyn BufRead + Send>,
}

impl CompressedReader {
    /// Create a new reader from a data source
    pub fn new(source: DataSource) -> Result<Self> {
        Self::from_reader(source.open()?)
    }

    /// Wrap an already open buffered reader
    pub fn from_reader(mut reader: Box<dyn BufRead + Send>) -> Result<Self> {
        let is_gzipped = {
            let peeked = reader.fill_buf()?;
            peeked.len() >= 2 && peeked[..2] == GZIP_MAGIC
        };

        if is_gzipped {
            Ok(Self {
                inner: Box::new(BufReader::new(MultiGzDecoder::new(reader))),
            })
        } else {
            Ok(Self { inner: reader })
        }
    }

    /// Get the inner buffered reader
    pub fn into_inner(self) -> Box<dyn BufRead + Send> {
        self.inner
    }
}

impl std::fmt::Debug for CompressedReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressedReader").finish_non_exhaustive()
    }
}

impl Read for CompressedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for CompressedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// Writer that compresses according to its [`DataSink`].
///
/// - `.gz`, `.bgz`, `.gzip` → gzip (flate2, default level)
/// - other paths and stdout → uncompressed
///
/// Call [`finish`](Self::finish) to write the gzip trailer and surface
/// errors; dropping only makes a best-effort flush.
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(Option<BufWriter<Box<dyn Write>>>),

    /// Gzip compressed writer
    Gzip(Option<GzEncoder<BufWriter<Box<dyn Write>>>>),
}

impl CompressedWriter {
    /// Create a new writer from a data sink
    pub fn new(sink: DataSink) -> io::Result<Self> {
        match &sink {
            DataSink::Local(path) => {
                let file = File::create(path)?;
                if sink.is_compressed() {
                    Ok(Self::new_gzip(Box::new(file)))
                } else {
                    Ok(Self::new_plain(Box::new(file)))
                }
            }
            DataSink::Stdout => Ok(Self::new_plain(Box::new(io::stdout()))),
        }
    }

    /// Create a plain (uncompressed) writer
    pub fn new_plain(writer: Box<dyn Write>) -> Self {
        Self::Plain(Some(BufWriter::new(writer)))
    }

    /// Create a gzip compressed writer
    pub fn new_gzip(writer: Box<dyn Write>) -> Self {
        Self::Gzip(Some(GzEncoder::new(
            BufWriter::new(writer),
            Compression::default(),
        )))
    }

    /// Finish writing and consume the writer
    pub fn finish(mut self) -> io::Result<()> {
        match &mut self {
            Self::Plain(w) => match w.take() {
                Some(mut writer) => writer.flush(),
                None => Ok(()),
            },
            Self::Gzip(w) => match w.take() {
                Some(encoder) => encoder.finish()?.flush(),
                None => Ok(()),
            },
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(Some(w)) => w.write(buf),
            Self::Gzip(Some(w)) => w.write(buf),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Cannot write to finished writer",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(Some(w)) => w.flush(),
            Self::Gzip(Some(w)) => w.flush(),
            _ => Ok(()),
        }
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        // Best-effort; finish() reports errors
        let _ = self.flush();
    }
}
