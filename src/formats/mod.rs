//! GFF3 format parser and writer.
//!
//! This module provides a streaming-first GFF3 implementation:
//! - **Reading**: [`gff::GffReader`], a finite-state parser yielding one element at a time
//! - **Writing**: [`gff_writer::GffWriter`], plain text serialization of elements
//!
//! Both sides implement:
//! - **Streaming architecture**: Constant memory usage regardless of file size
//! - **Iterator-based API**: Process elements one at a time
//! - **Compression support**: Transparent gzip/bgzip input and `.gz` output
//! - **Error handling**: All operations return `Result`; no `panic!` on input
//!
//! # Module Organization
//!
//! - [`primitives`]: Bounded fields and diagnostics shared by reader and writer
//! - [`gff`]: Tokenizer, state machine and reader
//! - [`gff_writer`]: Writer

pub mod gff;
pub mod gff_writer;
pub mod primitives;

// Re-export commonly used types
pub use gff::{Element, Feature, GffReader, Region, Version};
pub use gff_writer::GffWriter;
pub use primitives::{BoundedField, Diagnostic, FieldError};
