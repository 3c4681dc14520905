//! Error and warning model.
//!
//! Parsing produces two kinds of diagnostics. A [`ParseError`] is fatal:
//! it aborts the current parse and is returned to the caller. A
//! [`Warning`] is advisory: the scanner keeps going with its best-effort
//! behavior and the warning is collected on the parse result, so callers
//! and tests can assert on exactly which warnings were produced.
//!
//! Both carry the position of the offending logical byte — the input
//! stream's `count` of 8-bit characters surfaced so far, which indexes
//! into the *decoded* view inside hex/base64 regions and transport
//! envelopes.

use thiserror::Error;

/// Shorthand for results specialized to parse errors.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// A fatal parse diagnostic. Aborts the parse that raised it.
#[derive(Debug, Error)]
pub enum ParseError {
    /// End of input reached inside a scanner that needed more bytes.
    #[error("unexpected end of input at byte {pos}")]
    UnexpectedEof {
        /// Logical byte position of the end of input.
        pos: u64,
    },

    /// A byte that cannot start any simple string.
    #[error("illegal character {} at byte {pos}", display_byte(.byte))]
    IllegalCharacter {
        /// The offending byte.
        byte: u8,
        /// Logical byte position.
        pos: u64,
    },

    /// A specific punctuation byte was required and something else was found.
    #[error("character {} found where '{}' expected at byte {pos}", display_byte(.found), display_char(.expected))]
    ExpectedChar {
        /// The byte that was found.
        found: u8,
        /// The byte the grammar required.
        expected: u8,
        /// Logical byte position.
        pos: u64,
    },

    /// A byte inside a 4-bit or 6-bit region that is neither a digit of
    /// that alphabet, whitespace, nor the region terminator.
    #[error("character {} found in {width}-bit coding region at byte {pos}", display_byte(.byte))]
    BadFramedDigit {
        /// The offending raw byte.
        byte: u8,
        /// Active channel width (4 or 6).
        width: u8,
        /// Logical byte position.
        pos: u64,
    },

    /// A decimal length prefix ran past nine digits.
    #[error("decimal length prefix longer than {MAX_LENGTH_DIGITS} digits at byte {pos}")]
    DecimalTooLong {
        /// Logical byte position.
        pos: u64,
    },

    /// A verbatim string appeared without the mandatory length prefix.
    #[error("verbatim string has no declared length at byte {pos}")]
    MissingVerbatimLength {
        /// Logical byte position.
        pos: u64,
    },

    /// A quoted string's payload did not match its declared length:
    /// either the closing quote arrived early or a byte was read past
    /// the declared length.
    #[error("quoted string has {actual} bytes where declared length was {declared} (byte {pos})")]
    QuotedLengthMismatch {
        /// The declared length prefix.
        declared: usize,
        /// Payload bytes read when the mismatch was detected.
        actual: usize,
        /// Logical byte position.
        pos: u64,
    },

    /// An octal escape `\OOO` had fewer than three octal digits.
    #[error("octal escape ended after {digits} digits at byte {pos}")]
    OctalEscapeTooShort {
        /// Octal digits actually present.
        digits: usize,
        /// Logical byte position.
        pos: u64,
    },

    /// An octal escape encoded a value above 255.
    #[error("octal escape value {value} does not fit in a byte (byte {pos})")]
    OctalEscapeOverflow {
        /// The decoded value.
        value: u16,
        /// Logical byte position.
        pos: u64,
    },

    /// A hex escape `\xHH` had fewer than two hex digits.
    #[error("hex escape ended after {digits} digits at byte {pos}")]
    HexEscapeTooShort {
        /// Hex digits actually present.
        digits: usize,
        /// Logical byte position.
        pos: u64,
    },

    /// Nesting exceeded [`Limits::max_nesting_depth`](crate::Limits).
    #[error("nesting depth {depth} exceeds limit {limit}")]
    NestingTooDeep {
        /// Depth that was reached.
        depth: u64,
        /// The configured limit.
        limit: u64,
    },

    /// A simple string exceeded [`Limits::max_string_length`](crate::Limits).
    #[error("string of {length} bytes exceeds limit {limit} (byte {pos})")]
    StringTooLong {
        /// Length the string reached when the limit tripped.
        length: u64,
        /// The configured limit.
        limit: u64,
        /// Logical byte position.
        pos: u64,
    },

    /// Non-whitespace input remained after the single expected object.
    #[error("trailing data after object at byte {pos}")]
    TrailingData {
        /// Logical byte position of the first trailing byte.
        pos: u64,
    },

    /// The underlying byte source failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Maximum number of digits accepted in a decimal length prefix.
pub const MAX_LENGTH_DIGITS: usize = 9;

impl ParseError {
    /// Logical byte position the error refers to, when it has one.
    pub fn position(&self) -> Option<u64> {
        match self {
            ParseError::UnexpectedEof { pos }
            | ParseError::IllegalCharacter { pos, .. }
            | ParseError::ExpectedChar { pos, .. }
            | ParseError::BadFramedDigit { pos, .. }
            | ParseError::DecimalTooLong { pos }
            | ParseError::MissingVerbatimLength { pos }
            | ParseError::QuotedLengthMismatch { pos, .. }
            | ParseError::OctalEscapeTooShort { pos, .. }
            | ParseError::OctalEscapeOverflow { pos, .. }
            | ParseError::HexEscapeTooShort { pos, .. }
            | ParseError::StringTooLong { pos, .. }
            | ParseError::TrailingData { pos } => Some(*pos),
            ParseError::NestingTooDeep { .. } | ParseError::Io(_) => None,
        }
    }
}

/// An advisory parse diagnostic. Collected on the parse result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A 4-bit or 6-bit region ended while the shift register still held
    /// non-zero bits.
    #[error("{width}-bit region ended with {unused} unused bits left over at byte {pos}")]
    ResidualBits {
        /// Channel width of the region that ended (4 or 6).
        width: u8,
        /// Number of leftover bits.
        unused: u8,
        /// Logical byte position.
        pos: u64,
    },

    /// `\x` for an unrecognized `x` inside a quoted string. The escaped
    /// byte is passed through to the payload.
    #[error("unknown escape character '\\{}' at byte {pos}", display_char(.escape))]
    UnknownEscape {
        /// The byte following the backslash.
        escape: u8,
        /// Logical byte position.
        pos: u64,
    },

    /// A hex or base64 string decoded to a length different from its
    /// declared prefix. Self-delimited forms tolerate this.
    #[error("string has length {actual} different than declared length {declared} (byte {pos})")]
    DeclaredLengthMismatch {
        /// The declared length prefix.
        declared: usize,
        /// The decoded payload length.
        actual: usize,
        /// Logical byte position.
        pos: u64,
    },

    /// A simple string scanned to zero bytes.
    #[error("simple string has zero length at byte {pos}")]
    EmptyString {
        /// Logical byte position.
        pos: u64,
    },
}

impl Warning {
    /// Logical byte position the warning refers to.
    pub fn position(&self) -> u64 {
        match self {
            Warning::ResidualBits { pos, .. }
            | Warning::UnknownEscape { pos, .. }
            | Warning::DeclaredLengthMismatch { pos, .. }
            | Warning::EmptyString { pos } => *pos,
        }
    }
}

/// Renders a byte as `'c'` when printable, `0xNN (decimal N)` otherwise.
fn display_byte(b: &u8) -> String {
    if crate::chars::is_printable(*b) {
        format!("'{}'", *b as char)
    } else {
        format!("{:#04x} ({} decimal)", b, b)
    }
}

fn display_char(b: &u8) -> char {
    *b as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let err = ParseError::IllegalCharacter { byte: b'?', pos: 7 };
        assert_eq!(err.position(), Some(7));

        let err = ParseError::NestingTooDeep { depth: 9, limit: 8 };
        assert_eq!(err.position(), None);

        let warn = Warning::EmptyString { pos: 3 };
        assert_eq!(warn.position(), 3);
    }

    #[test]
    fn test_display_printable_byte() {
        let err = ParseError::IllegalCharacter { byte: b'?', pos: 0 };
        assert!(err.to_string().contains("'?'"));
    }

    #[test]
    fn test_display_unprintable_byte() {
        let err = ParseError::IllegalCharacter { byte: 0x07, pos: 0 };
        assert!(err.to_string().contains("0x07"));
    }

    #[test]
    fn test_framed_digit_message() {
        let err = ParseError::BadFramedDigit {
            byte: b'q',
            width: 4,
            pos: 12,
        };
        assert_eq!(
            err.to_string(),
            "character 'q' found in 4-bit coding region at byte 12"
        );
    }
}
