//! Document value model shared by the encoder, decoder, and evolver.
//!
//! `FieldValue` is the storage side of the conversion boundary: the set
//! of value shapes a document store field can hold. It is deliberately
//! narrower than a full BSON model — only the shapes a timestamp
//! fragment or a query operand against one can contain.

/// An ordered list of field name / value pairs, as the store keeps them.
pub type Document = Vec<(String, FieldValue)>;

/// A value that can appear as a document field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 64-bit float.
    Double(f64),
    /// UTF-8 string.
    Str(String),
    /// Embedded document.
    Document(Document),
    /// Array of values.
    Array(Vec<FieldValue>),
    /// Boolean.
    Bool(bool),
    /// UTC datetime, milliseconds since the Unix epoch.
    DateTime(i64),
    /// Null / "no value".
    Null,
    /// Regular expression: pattern and options. Stored opaque, never
    /// executed here.
    Regex(String, String),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
}

impl FieldValue {
    /// Field lookup on a `Document` value; `None` for any other shape or
    /// a missing field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Document(fields) => {
                fields.iter().find(|(key, _)| key == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// The string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload of an `Int32` or `Int64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int32(n) => Some(i64::from(*n)),
            FieldValue::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Epoch milliseconds, if this is a `DateTime`.
    pub fn as_datetime_ms(&self) -> Option<i64> {
        match self {
            FieldValue::DateTime(ms) => Some(*ms),
            _ => None,
        }
    }
}
