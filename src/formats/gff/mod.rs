//! GFF3 (General Feature Format version 3) parser.
//!
//! GFF3 is the standard exchange format for genome annotations:
//! - **`##gff-version`**: mandatory first line
//! - **`##sequence-region`**: optional `name start end` declarations
//! - **Features**: 9-column lines describing annotated intervals
//!
//! # Format Specification
//!
//! Feature lines carry 9 columns separated by tabs or spaces:
//! 1. **seqid**: Sequence (chromosome/contig) id
//! 2. **source**: Annotation source
//! 3. **type**: Feature type (gene, mRNA, exon, CDS, ...)
//! 4. **start**: Start position
//! 5. **end**: End position
//! 6. **score**: Score (or `.`)
//! 7. **strand**: `+`, `-`, `.` or `?`
//! 8. **phase**: CDS phase (0, 1, 2, or `.`)
//! 9. **attributes**: `tag=value` pairs separated by `;`
//!
//! Columns are kept verbatim: the parser checks the shape of the stream,
//! not the meaning of the values.
//!
//! # Architecture
//!
//! Parsing is a deterministic finite-state machine:
//! - [`Tokenizer`] classifies input into [`TokenKind`]s
//! - [`transition`] maps `(State, TokenKind)` to the next [`State`] and an [`Action`]
//! - [`Action::apply`] copies token text into bounded fields or rejects the token
//! - [`GffReader`] drives the machine and hands out finished [`Element`]s
//!
//! # Example
//!
//! ```
//! use biogff::formats::gff::{Element, GffReader};
//!
//! # fn main() -> biogff::Result<()> {
//! let data = "##gff-version 3\n\
//!             ###sequence-region chr1 1 100\n\
//!             chr1\t.\tgene\t1\t100\t.\t+\t.\tID=g1\n";
//!
//! for element in GffReader::new(data.as_bytes()) {
//!     match element? {
//!         Element::Version(v) => assert_eq!(v.as_str(), "3"),
//!         Element::Region(r) => assert_eq!(r.name(), "chr1"),
//!         Element::Feature(f) => assert_eq!(f.feature_type(), "gene"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod element;
pub mod fsm;
pub mod reader;
pub mod token;

pub use actions::Action;
pub use element::{Element, ElementKind, Feature, FeatureColumn, Record, Region, Version};
pub use fsm::{advance, transition, State, Transition};
pub use reader::GffReader;
pub use token::{Token, TokenKind, Tokenizer};
