//! biogff: streaming GFF3 parser built on a deterministic state machine
//!
//! # Overview
//!
//! biogff reads GFF3 annotation files one element at a time with constant
//! memory. Every byte of input is classified into a token and pushed through
//! an explicit transition table, so each syntax error is reported with the
//! line it occurred on and a short message.
//!
//! ## Key Features
//!
//! - **Streaming**: One reusable record buffer regardless of file size
//! - **Bounded fields**: Every column has a fixed capacity; oversize values
//!   are rejected, never truncated
//! - **Compression**: Transparent gzip/bgzip input, `.gz` output
//! - **Recovery**: Errors are sticky until explicitly cleared
//!
//! ## Quick Start
//!
//! ```no_run
//! use biogff::{Element, GffReader};
//!
//! # fn main() -> biogff::Result<()> {
//! let reader = GffReader::from_path("annotations.gff3.gz")?;
//!
//! for element in reader {
//!     if let Element::Feature(feature) = element? {
//!         println!("{}\t{}", feature.seqid(), feature.feature_type());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`formats`]: GFF3 tokenizer, state machine, reader and writer
//! - [`io`]: Data sources, sinks and compression
//! - [`error`]: Crate error type

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod formats;
pub mod io;

// Re-export commonly used types
pub use error::{GffError, Result};
pub use formats::gff::{Element, ElementKind, Feature, GffReader, Region, State, Version};
pub use formats::gff_writer::GffWriter;
pub use formats::primitives::{Diagnostic, FieldError};
pub use io::{DataSink, DataSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
