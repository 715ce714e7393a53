// SPDX-License-Identifier: Apache-2.0

//! A pull-based streaming JSON reader for resource-constrained systems.
//!
//! The reader walks a byte stream one syntactic event at a time and never
//! buffers more than a caller-provided capture slice. Strings and numbers
//! longer than the capture slice are delivered as a run of
//! [`NodeType::ValuePart`] chunks followed by [`NodeType::EndValuePart`], so
//! arbitrarily large documents parse in fixed memory.
//!
//! ```
//! use sipjson::{JsonReader, NodeType, SliceReader};
//!
//! let json = br#"{"name": "widget", "count": 3}"#;
//! let mut capture = [0u8; 64];
//! let mut reader = JsonReader::new(SliceReader::new(json), &mut capture);
//!
//! let mut count = 0;
//! while reader.read() {
//!     if reader.node_type() == NodeType::Field && reader.value() == b"count" {
//!         reader.read();
//!         count = reader.value_int();
//!     }
//! }
//! assert!(reader.error().is_none());
//! assert_eq!(count, 3);
//! ```

#![cfg_attr(not(test), no_std)]

mod escape;
mod json_reader;
mod lex_source;
mod lexer;
mod node;
mod parse_error;
mod slice_reader;

pub use json_reader::JsonReader;
pub use lex_source::Reader;
pub use node::{NodeType, ValueType};
pub use parse_error::ParseError;
pub use slice_reader::SliceReader;

/// Capture capacity suited to most documents; a convenient size for the
/// scratch slice handed to [`JsonReader::new`].
pub const DEFAULT_CAPTURE_SIZE: usize = 1024;
