//! Scanners and recursive-descent parser.
//!
//! The grammar, by descent:
//!
//! ```text
//! object := ws ( "{" object "}" | list | string )
//! list   := "(" ws ( object ws )* ")"
//! string := [ "[" simple "]" ] simple
//! simple := token | <len> ":" raw | ["<len>"] quoted | hex | base64
//! ```
//!
//! The `{ ... }` transport envelope switches the input stream to its
//! 6-bit channel, so the recursion inside the braces operates on the
//! decoded canonical byte stream.
//!
//! Simple-string dispatch tests token-ness before everything else, so a
//! token may begin with `:` (which would otherwise look like a verbatim
//! string missing its length). A leading decimal digit is
//! unconditionally a length prefix; tokens therefore never start with a
//! digit.

use std::io::Read;

use crate::chars;
use crate::error::{ParseError, ParseResult, Warning, MAX_LENGTH_DIGITS};
use crate::input::stream::InputStream;
use crate::limits::Limits;
use crate::value::{SexpString, Value};

/// A parsed value together with the warnings raised while reading it.
#[derive(Debug)]
pub struct Parsed {
    /// The object tree.
    pub value: Value,
    /// Advisory diagnostics, in order of detection.
    pub warnings: Vec<Warning>,
}

/// Recursive-descent parser over an [`InputStream`].
///
/// One parser reads one input; call [`parse_object`](Parser::parse_object)
/// repeatedly to read a sequence of top-level objects from the same
/// stream.
pub struct Parser<R> {
    stream: InputStream<R>,
    limits: Limits,
    depth: u64,
}

impl<R: Read> Parser<R> {
    /// Creates a parser with [`Limits::standard`] limits.
    pub fn new(source: R) -> Self {
        Self::with_limits(source, Limits::default())
    }

    /// Creates a parser with explicit limits.
    pub fn with_limits(source: R, limits: Limits) -> Self {
        Self {
            stream: InputStream::new(source),
            limits,
            depth: 0,
        }
    }

    /// Position of the current lookahead character, for diagnostics.
    pub fn position(&self) -> u64 {
        self.stream.position()
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[Warning] {
        self.stream.warnings()
    }

    /// Takes the recorded warnings, leaving the list empty.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        self.stream.take_warnings()
    }

    /// Reads the next top-level object from the stream.
    pub fn parse_object(&mut self) -> ParseResult<Value> {
        self.depth = 0;
        self.scan_object()
    }

    /// Skips whitespace and reports whether the input is exhausted.
    pub fn at_eof(&mut self) -> ParseResult<bool> {
        self.skip_whitespace()?;
        Ok(self.stream.peek().is_none())
    }

    /// Reads the rest of the input as a single string object.
    pub fn scan_to_eof(&mut self) -> ParseResult<Value> {
        let mut payload = Vec::new();
        self.skip_whitespace()?;
        while let Some(b) = self.stream.peek() {
            payload.push(b);
            self.check_string_length(payload.len())?;
            self.stream.advance()?;
        }
        Ok(Value::string(payload))
    }

    fn warn(&mut self, warning: Warning) {
        self.stream.warn(warning);
    }

    fn unexpected_eof(&self) -> ParseError {
        ParseError::UnexpectedEof {
            pos: self.stream.position(),
        }
    }

    fn check_string_length(&self, length: usize) -> ParseResult<()> {
        if length as u64 > self.limits.max_string_length {
            return Err(ParseError::StringTooLong {
                length: length as u64,
                limit: self.limits.max_string_length,
                pos: self.stream.position(),
            });
        }
        Ok(())
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                depth: self.depth,
                limit: self.limits.max_nesting_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn skip_whitespace(&mut self) -> ParseResult<()> {
        while self.stream.peek().is_some_and(chars::is_whitespace) {
            self.stream.advance()?;
        }
        Ok(())
    }

    /// Consumes the lookahead if it equals `expected`, errors otherwise.
    fn skip_char(&mut self, expected: u8) -> ParseResult<()> {
        match self.stream.peek() {
            Some(found) if found == expected => self.stream.advance(),
            Some(found) => Err(ParseError::ExpectedChar {
                found,
                expected,
                pos: self.stream.position(),
            }),
            None => Err(self.unexpected_eof()),
        }
    }

    fn scan_token(&mut self, dst: &mut Vec<u8>) -> ParseResult<()> {
        self.skip_whitespace()?;
        while let Some(b) = self.stream.peek() {
            if !chars::is_token_char(b) {
                break;
            }
            dst.push(b);
            self.check_string_length(dst.len())?;
            self.stream.advance()?;
        }
        Ok(())
    }

    /// Reads a run of decimal digits as a length prefix.
    fn scan_decimal_length(&mut self) -> ParseResult<usize> {
        let mut value: usize = 0;
        let mut digits = 0;
        while let Some(d) = self.stream.peek().and_then(chars::dec_value) {
            digits += 1;
            if digits > MAX_LENGTH_DIGITS {
                return Err(ParseError::DecimalTooLong {
                    pos: self.stream.position(),
                });
            }
            value = value * 10 + usize::from(d);
            self.stream.advance()?;
        }
        Ok(value)
    }

    /// Reads `: <len raw bytes>`. The length prefix is mandatory here.
    fn scan_verbatim(&mut self, dst: &mut Vec<u8>, declared: Option<usize>) -> ParseResult<()> {
        self.skip_whitespace()?;
        self.skip_char(b':')?;
        let length = declared.ok_or(ParseError::MissingVerbatimLength {
            pos: self.stream.position(),
        })?;
        self.check_string_length(length)?;
        dst.reserve(length);
        for _ in 0..length {
            match self.stream.peek() {
                Some(b) => dst.push(b),
                None => return Err(self.unexpected_eof()),
            }
            self.stream.advance()?;
        }
        Ok(())
    }

    /// Reads a quoted string, resolving escapes.
    ///
    /// With a declared length, the closing quote must arrive exactly
    /// when the payload reaches that length; early or late is an error.
    fn scan_quoted(&mut self, dst: &mut Vec<u8>, declared: Option<usize>) -> ParseResult<()> {
        self.skip_char(b'"')?;
        loop {
            match self.stream.peek() {
                None => return Err(self.unexpected_eof()),
                Some(b'"') => match declared {
                    Some(length) if dst.len() != length => {
                        return Err(ParseError::QuotedLengthMismatch {
                            declared: length,
                            actual: dst.len(),
                            pos: self.stream.position(),
                        });
                    }
                    _ => return self.skip_char(b'"'),
                },
                Some(b'\\') => {
                    self.stream.advance()?;
                    let c = self.stream.peek().ok_or_else(|| self.unexpected_eof())?;
                    match c {
                        b'b' => dst.push(0x08),
                        b't' => dst.push(b'\t'),
                        b'v' => dst.push(0x0B),
                        b'n' => dst.push(b'\n'),
                        b'f' => dst.push(0x0C),
                        b'r' => dst.push(b'\r'),
                        b'"' => dst.push(b'"'),
                        b'\'' => dst.push(b'\''),
                        b'\\' => dst.push(b'\\'),
                        b'0'..=b'7' => dst.push(self.scan_octal_escape()?),
                        b'x' => dst.push(self.scan_hex_escape()?),
                        b'\n' => {
                            // Line continuation; a following CR belongs to it.
                            self.stream.advance()?;
                            if self.stream.peek() != Some(b'\r') {
                                continue;
                            }
                        }
                        b'\r' => {
                            self.stream.advance()?;
                            if self.stream.peek() != Some(b'\n') {
                                continue;
                            }
                        }
                        other => {
                            self.warn(Warning::UnknownEscape {
                                escape: other,
                                pos: self.stream.position(),
                            });
                            dst.push(other);
                        }
                    }
                }
                Some(b) => dst.push(b),
            }
            self.stream.advance()?;
            if let Some(length) = declared {
                if dst.len() > length {
                    return Err(ParseError::QuotedLengthMismatch {
                        declared: length,
                        actual: dst.len(),
                        pos: self.stream.position(),
                    });
                }
            }
            self.check_string_length(dst.len())?;
        }
    }

    /// `\OOO`: exactly three octal digits, value at most 255.
    ///
    /// Leaves the last digit in the lookahead for the caller to consume.
    fn scan_octal_escape(&mut self) -> ParseResult<u8> {
        let mut value: u16 = 0;
        for i in 0..3 {
            let digit = match self.stream.peek() {
                Some(d @ b'0'..=b'7') => u16::from(d - b'0'),
                _ => {
                    return Err(ParseError::OctalEscapeTooShort {
                        digits: i,
                        pos: self.stream.position(),
                    })
                }
            };
            value = (value << 3) | digit;
            if i < 2 {
                self.stream.advance()?;
            }
        }
        if value > 255 {
            return Err(ParseError::OctalEscapeOverflow {
                value,
                pos: self.stream.position(),
            });
        }
        Ok(value as u8)
    }

    /// `\xHH`: exactly two hex digits.
    ///
    /// Leaves the last digit in the lookahead for the caller to consume.
    fn scan_hex_escape(&mut self) -> ParseResult<u8> {
        self.stream.advance()?;
        let mut value: u8 = 0;
        for i in 0..2 {
            let digit = match self.stream.peek().and_then(chars::hex_value) {
                Some(d) => d,
                None => {
                    return Err(ParseError::HexEscapeTooShort {
                        digits: i,
                        pos: self.stream.position(),
                    })
                }
            };
            value = (value << 4) | digit;
            if i < 1 {
                self.stream.advance()?;
            }
        }
        Ok(value)
    }

    /// Reads `# ... #` through the 4-bit channel.
    fn scan_hexadecimal(&mut self, dst: &mut Vec<u8>, declared: Option<usize>) -> ParseResult<()> {
        self.stream.set_byte_size(4);
        self.skip_char(b'#')?;
        while let Some(b) = self.stream.peek() {
            // A decoded 0x23 byte is not the terminator; only a raw '#'
            // flips the channel back to 8 bits.
            if b == b'#' && self.stream.byte_size() == 8 {
                break;
            }
            dst.push(b);
            self.check_string_length(dst.len())?;
            self.stream.advance()?;
        }
        self.skip_char(b'#')?;
        if let Some(length) = declared {
            if dst.len() != length {
                self.warn(Warning::DeclaredLengthMismatch {
                    declared: length,
                    actual: dst.len(),
                    pos: self.stream.position(),
                });
            }
        }
        Ok(())
    }

    /// Reads `| ... |` through the 6-bit channel.
    fn scan_base64(&mut self, dst: &mut Vec<u8>, declared: Option<usize>) -> ParseResult<()> {
        self.stream.set_byte_size(6);
        self.skip_char(b'|')?;
        while let Some(b) = self.stream.peek() {
            if b == b'|' && self.stream.byte_size() == 8 {
                break;
            }
            dst.push(b);
            self.check_string_length(dst.len())?;
            self.stream.advance()?;
        }
        self.skip_char(b'|')?;
        if let Some(length) = declared {
            if dst.len() != length {
                self.warn(Warning::DeclaredLengthMismatch {
                    declared: length,
                    actual: dst.len(),
                    pos: self.stream.position(),
                });
            }
        }
        Ok(())
    }

    /// Reads one simple string, dispatching on its first character.
    fn scan_simple_string(&mut self) -> ParseResult<Vec<u8>> {
        let mut payload = Vec::new();
        self.skip_whitespace()?;
        match self.stream.peek() {
            // Token-ness wins over the delimiter cases so a token may
            // start with ':'.
            Some(b) if chars::is_token_char(b) && !chars::is_dec_digit(b) => {
                self.scan_token(&mut payload)?;
            }
            Some(b) if chars::is_dec_digit(b) || matches!(b, b'"' | b'#' | b'|' | b':') => {
                let declared = if chars::is_dec_digit(b) {
                    Some(self.scan_decimal_length()?)
                } else {
                    None
                };
                match self.stream.peek() {
                    Some(b'"') => self.scan_quoted(&mut payload, declared)?,
                    Some(b'#') => self.scan_hexadecimal(&mut payload, declared)?,
                    Some(b'|') => self.scan_base64(&mut payload, declared)?,
                    Some(b':') => self.scan_verbatim(&mut payload, declared)?,
                    // A length prefix followed by no recognized delimiter
                    // scans as an empty string; the warning below fires.
                    _ => {}
                }
            }
            Some(b) => {
                return Err(ParseError::IllegalCharacter {
                    byte: b,
                    pos: self.stream.position(),
                })
            }
            None => return Err(self.unexpected_eof()),
        }
        if payload.is_empty() {
            self.warn(Warning::EmptyString {
                pos: self.stream.position(),
            });
        }
        Ok(payload)
    }

    /// Reads a string value: optional `[hint]` then the payload.
    fn scan_string(&mut self) -> ParseResult<SexpString> {
        let mut string = SexpString::default();
        if self.stream.peek() == Some(b'[') {
            self.skip_char(b'[')?;
            string.set_hint(self.scan_simple_string()?);
            self.skip_whitespace()?;
            self.skip_char(b']')?;
            self.skip_whitespace()?;
        }
        string.set_payload(self.scan_simple_string()?);
        Ok(string)
    }

    /// Reads a parenthesized list of objects.
    fn scan_list(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.skip_char(b'(')?;
        let mut children = Vec::new();
        loop {
            self.skip_whitespace()?;
            match self.stream.peek() {
                Some(b')') => {
                    self.skip_char(b')')?;
                    break;
                }
                Some(_) => children.push(self.scan_object()?),
                None => return Err(self.unexpected_eof()),
            }
        }
        self.leave();
        Ok(Value::List(children))
    }

    /// Reads one object: transport envelope, list, or string.
    fn scan_object(&mut self) -> ParseResult<Value> {
        self.skip_whitespace()?;
        if self.stream.peek() == Some(b'{') {
            self.enter()?;
            // The envelope body is base64 of the canonical encoding;
            // switch the channel before consuming the brace so the
            // recursion below sees the decoded view.
            self.stream.set_byte_size(6);
            self.skip_char(b'{')?;
            let object = self.scan_object()?;
            self.skip_char(b'}')?;
            self.leave();
            Ok(object)
        } else if self.stream.peek() == Some(b'(') {
            self.scan_list()
        } else {
            self.scan_string().map(Value::String)
        }
    }
}

/// Parses a single object from `input` with [`Limits::standard`] limits.
///
/// The input must contain exactly one object, optionally surrounded by
/// whitespace; anything after it is a [`ParseError::TrailingData`].
pub fn parse(input: &[u8]) -> ParseResult<Parsed> {
    parse_with_limits(input, Limits::default())
}

/// Parses a single object from `input` with explicit limits.
pub fn parse_with_limits(input: &[u8], limits: Limits) -> ParseResult<Parsed> {
    let mut parser = Parser::with_limits(input, limits);
    let value = parser.parse_object()?;
    if !parser.at_eof()? {
        return Err(ParseError::TrailingData {
            pos: parser.position(),
        });
    }
    Ok(Parsed {
        value,
        warnings: parser.take_warnings(),
    })
}
