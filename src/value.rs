//! The S-expression object model.
//!
//! A value is either an octet string (with an optional presentation
//! hint) or a list of values. Octet strings are arbitrary byte
//! sequences; nothing here assumes text. Equality is deep and
//! byte-exact: lists compare element-wise in order, strings compare
//! hint-then-payload, and a missing hint only equals another missing
//! hint — all of which the derived `PartialEq` provides.

/// An S-expression value: an octet string or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An octet string with an optional presentation hint.
    String(SexpString),
    /// An ordered sequence of child values, possibly empty.
    List(Vec<Value>),
}

/// An octet string leaf: a payload plus an optional presentation hint.
///
/// The hint (written `[hint]payload` in the textual forms) conveys
/// display intent such as a media type. It participates in equality but
/// carries no other semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SexpString {
    hint: Option<Vec<u8>>,
    payload: Vec<u8>,
}

impl SexpString {
    /// Creates an octet string with no presentation hint.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            hint: None,
            payload: payload.into(),
        }
    }

    /// Creates an octet string with a presentation hint.
    pub fn with_hint(hint: impl Into<Vec<u8>>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            hint: Some(hint.into()),
            payload: payload.into(),
        }
    }

    /// The presentation hint, if one was given.
    pub fn hint(&self) -> Option<&[u8]> {
        self.hint.as_deref()
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replaces the presentation hint.
    pub fn set_hint(&mut self, hint: impl Into<Vec<u8>>) {
        self.hint = Some(hint.into());
    }

    /// Replaces the payload.
    pub fn set_payload(&mut self, payload: impl Into<Vec<u8>>) {
        self.payload = payload.into();
    }

    /// Consumes the string, returning its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl Value {
    /// Creates a hint-less string value.
    pub fn string(payload: impl Into<Vec<u8>>) -> Self {
        Value::String(SexpString::new(payload))
    }

    /// Creates a list value from its children.
    pub fn list(children: impl Into<Vec<Value>>) -> Self {
        Value::List(children.into())
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is a list value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns the string if this is a string value, `None` otherwise.
    pub fn as_string(&self) -> Option<&SexpString> {
        match self {
            Value::String(s) => Some(s),
            Value::List(_) => None,
        }
    }

    /// Returns the payload bytes if this is a string value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_string().map(SexpString::payload)
    }

    /// Returns the children if this is a list value, `None` otherwise.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(children) => Some(children),
            Value::String(_) => None,
        }
    }

    /// Gets a child of a list by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|children| children.get(index))
    }

    /// Returns the variant name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl From<SexpString> for Value {
    fn from(s: SexpString) -> Self {
        Value::String(s)
    }
}
