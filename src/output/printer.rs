//! Serialization to the canonical, advanced and transport forms.
//!
//! Canonical output is the normative byte-exact form: length-prefixed
//! verbatim strings, no whitespace. Transport wraps the canonical bytes
//! in a `{ base64 }` envelope. Advanced output picks a human-readable
//! rendering per string — token, quoted, hex or base64, whichever is
//! shortest — and lays lists out on one line when they fit within the
//! wrap width, otherwise one child per line aligned after the opening
//! parenthesis.
//!
//! Re-parsing any of the three forms yields a tree equal to the one
//! serialized, and canonical output re-parses to byte-identical
//! canonical output.

use std::io::{self, Write};

use crate::chars;
use crate::output::stream::{OutputStream, DEFAULT_LINE_LENGTH};
use crate::value::{SexpString, Value};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes the canonical form of `value` to `sink`.
pub fn write_canonical<W: Write>(value: &Value, sink: W) -> io::Result<()> {
    let mut os = OutputStream::new(sink);
    canonical_value(&mut os, value)
}

/// Returns the canonical form of `value` as bytes.
pub fn to_canonical(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_canonical(value, &mut buf);
    buf
}

/// Writes the transport form of `value` to `sink`, wrapping the base64
/// body at `max_column` when it is non-zero.
pub fn write_transport<W: Write>(value: &Value, sink: W, max_column: usize) -> io::Result<()> {
    let mut os = OutputStream::new(sink);
    os.set_max_column(max_column);
    os.put_byte(b'{')?;
    os.begin_base64();
    canonical_value(&mut os, value)?;
    os.end_base64()?;
    os.put_byte(b'}')
}

/// Returns the unwrapped transport form of `value` as bytes.
pub fn to_transport(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    let _ = write_transport(value, &mut buf, 0);
    buf
}

/// Writes the advanced form of `value` to `sink`, wrapping lists that
/// would run past `max_column` (0 disables wrapping).
pub fn write_advanced<W: Write>(value: &Value, sink: W, max_column: usize) -> io::Result<()> {
    let mut os = OutputStream::new(sink);
    os.set_max_column(max_column);
    advanced_value(&mut os, value)
}

/// Returns the advanced form of `value` as bytes, wrapped at the
/// default line length.
pub fn to_advanced(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    let _ = write_advanced(value, &mut buf, DEFAULT_LINE_LENGTH);
    buf
}

// ---------------------------------------------------------------------
// Canonical
// ---------------------------------------------------------------------

/// Canonical emit. Everything goes through the logical-byte writer so
/// the same code serves the transport envelope's base64 channel.
fn canonical_value<W: Write>(os: &mut OutputStream<W>, value: &Value) -> io::Result<()> {
    match value {
        Value::String(s) => canonical_string(os, s),
        Value::List(children) => {
            os.var_put_byte(b'(')?;
            for child in children {
                canonical_value(os, child)?;
            }
            os.var_put_byte(b')')
        }
    }
}

fn canonical_string<W: Write>(os: &mut OutputStream<W>, s: &SexpString) -> io::Result<()> {
    if let Some(hint) = s.hint() {
        os.var_put_byte(b'[')?;
        canonical_simple(os, hint)?;
        os.var_put_byte(b']')?;
    }
    canonical_simple(os, s.payload())
}

fn canonical_simple<W: Write>(os: &mut OutputStream<W>, bytes: &[u8]) -> io::Result<()> {
    os.print_decimal(bytes.len() as u64)?;
    os.var_put_byte(b':')?;
    for &b in bytes {
        os.var_put_byte(b)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------
// Advanced
// ---------------------------------------------------------------------

/// Rendering chosen for a simple string in the advanced form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repr {
    Token,
    Quoted,
    Hex,
    Base64,
}

/// Picks the rendering: a bare token when legal, otherwise whichever of
/// quoted, hex and base64 is shortest, with ties breaking in that
/// order.
fn choose_repr(bytes: &[u8]) -> Repr {
    if is_token(bytes) {
        return Repr::Token;
    }
    let quoted = quoted_len(bytes);
    let hex = hex_len(bytes);
    let base64 = base64_len(bytes);
    if quoted <= hex {
        Repr::Quoted
    } else if hex <= base64 {
        Repr::Hex
    } else {
        Repr::Base64
    }
}

fn is_token(bytes: &[u8]) -> bool {
    match bytes.first() {
        Some(&first) => {
            !chars::is_dec_digit(first) && bytes.iter().all(|&b| chars::is_token_char(b))
        }
        None => false,
    }
}

fn quoted_len(bytes: &[u8]) -> usize {
    2 + bytes.iter().map(|&b| escape_len(b)).sum::<usize>()
}

fn hex_len(bytes: &[u8]) -> usize {
    2 + 2 * bytes.len()
}

fn base64_len(bytes: &[u8]) -> usize {
    2 + 4 * bytes.len().div_ceil(3)
}

/// Bytes a payload byte occupies inside a quoted literal.
fn escape_len(b: u8) -> usize {
    match b {
        b'"' | b'\\' => 2,
        0x08 | b'\t' | 0x0B | b'\n' | 0x0C | b'\r' => 2,
        _ if chars::is_printable(b) => 1,
        _ => 4, // octal escape
    }
}

/// Printed width of a value in the advanced form, assuming one line.
fn advanced_len(value: &Value) -> usize {
    match value {
        Value::String(s) => string_len(s),
        Value::List(children) => {
            let inner: usize = children.iter().map(advanced_len).sum();
            2 + inner + children.len().saturating_sub(1)
        }
    }
}

fn string_len(s: &SexpString) -> usize {
    let hint = s.hint().map_or(0, |h| 2 + simple_len(h));
    hint + simple_len(s.payload())
}

fn simple_len(bytes: &[u8]) -> usize {
    match choose_repr(bytes) {
        Repr::Token => bytes.len(),
        Repr::Quoted => quoted_len(bytes),
        Repr::Hex => hex_len(bytes),
        Repr::Base64 => base64_len(bytes),
    }
}

fn advanced_value<W: Write>(os: &mut OutputStream<W>, value: &Value) -> io::Result<()> {
    match value {
        Value::String(s) => advanced_string(os, s),
        Value::List(children) => {
            let fits =
                os.max_column() == 0 || os.column() + advanced_len(value) <= os.max_column();
            os.put_byte(b'(')?;
            if fits {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        os.put_byte(b' ')?;
                    }
                    advanced_value(os, child)?;
                }
            } else {
                // One child per line, aligned just inside the paren.
                let indent = os.column();
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        os.put_byte(b'\n')?;
                        for _ in 0..indent {
                            os.put_byte(b' ')?;
                        }
                    }
                    advanced_value(os, child)?;
                }
            }
            os.put_byte(b')')
        }
    }
}

fn advanced_string<W: Write>(os: &mut OutputStream<W>, s: &SexpString) -> io::Result<()> {
    if let Some(hint) = s.hint() {
        os.put_byte(b'[')?;
        advanced_simple(os, hint)?;
        os.put_byte(b']')?;
    }
    advanced_simple(os, s.payload())
}

fn advanced_simple<W: Write>(os: &mut OutputStream<W>, bytes: &[u8]) -> io::Result<()> {
    match choose_repr(bytes) {
        Repr::Token => os.put_bytes(bytes),
        Repr::Quoted => {
            os.put_byte(b'"')?;
            for &b in bytes {
                put_escaped(os, b)?;
            }
            os.put_byte(b'"')
        }
        Repr::Hex => {
            os.put_byte(b'#')?;
            for &b in bytes {
                os.put_byte(HEX_DIGITS[usize::from(b >> 4)])?;
                os.put_byte(HEX_DIGITS[usize::from(b & 0x0F)])?;
            }
            os.put_byte(b'#')
        }
        Repr::Base64 => {
            os.put_byte(b'|')?;
            os.begin_base64();
            for &b in bytes {
                os.var_put_byte(b)?;
            }
            os.end_base64()?;
            os.put_byte(b'|')
        }
    }
}

fn put_escaped<W: Write>(os: &mut OutputStream<W>, b: u8) -> io::Result<()> {
    match b {
        b'"' => os.put_bytes(b"\\\""),
        b'\\' => os.put_bytes(b"\\\\"),
        0x08 => os.put_bytes(b"\\b"),
        b'\t' => os.put_bytes(b"\\t"),
        0x0B => os.put_bytes(b"\\v"),
        b'\n' => os.put_bytes(b"\\n"),
        0x0C => os.put_bytes(b"\\f"),
        b'\r' => os.put_bytes(b"\\r"),
        _ if chars::is_printable(b) => os.put_byte(b),
        _ => {
            os.put_byte(b'\\')?;
            os.put_byte(b'0' + (b >> 6))?;
            os.put_byte(b'0' + ((b >> 3) & 0x07))?;
            os.put_byte(b'0' + (b & 0x07))
        }
    }
}
