//! Reader and writer for Rivest canonical S-expressions.
//!
//! S-expressions in this dialect are octet strings and lists, written in
//! one of three interchangeable forms:
//!
//! - **Canonical**: length-prefixed verbatim strings with no whitespace,
//!   e.g. `(4:icmp(4:code1:\x08))`. The unique byte-exact normal form
//!   used for hashing and signing.
//! - **Advanced**: human-readable, e.g. `(icmp (code #08#))`. Strings
//!   may be bare tokens, quoted literals with C-style escapes, `#hex#`
//!   or `|base64|`; whitespace and line breaks are free between items.
//! - **Transport**: the canonical bytes wrapped in a base64 envelope,
//!   `{KDQ6aWNtcCg0OmNvZGUxOggpKQ==}`, safe for 7-bit channels.
//!
//! A string may carry a presentation hint in square brackets
//! (`[image/gif]#...#`), an opaque display annotation with no effect on
//! the payload.
//!
//! # Architecture
//!
//! - [`chars`] - byte classification and digit values
//! - [`input`] - decoding stream, scanners, recursive-descent parser
//! - [`value`] - the object tree
//! - [`output`] - encoding stream and the three emitters
//! - [`limits`] - nesting and string-size bounds
//! - [`error`] - fatal errors and collected warnings
//!
//! # Example
//!
//! ```
//! use csexp::{parse, to_canonical, to_advanced};
//!
//! let parsed = parse(b"(3:abc 3:def)").unwrap();
//! assert_eq!(to_canonical(&parsed.value), b"(3:abc3:def)");
//! assert_eq!(to_advanced(&parsed.value), b"(abc def)");
//! ```
//!
//! Parsing returns the fully-materialized tree for one top-level object
//! together with any warnings; errors carry the byte position at which
//! they were detected.

// Inputs are attacker-controlled in the intended uses (key files,
// signed bundles), so library code must never panic.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod chars;
pub mod error;
pub mod input;
pub mod limits;
pub mod output;
pub mod value;

// Re-export commonly used types
pub use error::{ParseError, ParseResult, Warning};
pub use input::{parse, parse_with_limits, InputStream, Parsed, Parser};
pub use limits::Limits;
pub use output::{
    to_advanced, to_canonical, to_transport, write_advanced, write_canonical, write_transport,
    OutputStream, DEFAULT_LINE_LENGTH,
};
pub use value::{SexpString, Value};
