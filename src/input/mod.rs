//! Reading S-expressions.
//!
//! The input side is organized in two layers:
//!
//! - [`stream`] - byte source with switchable 8/6/4-bit channel width
//! - [`parser`] - scanners and the recursive-descent object parser
//!
//! The split mirrors the data flow: the stream turns encoded regions
//! into logical 8-bit characters, and the parser only ever sees that
//! decoded view.

pub mod parser;
pub mod stream;

pub use parser::{parse, parse_with_limits, Parsed, Parser};
pub use stream::InputStream;
