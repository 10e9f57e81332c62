//! I/O module: data sources, sinks and compression
//!
//! Readers and writers stream with constant memory regardless of file size.

pub mod compression;
pub mod sink;

pub use compression::{CompressedReader, CompressedWriter, DataSource};
pub use sink::DataSink;
