//! MongoDB Extended JSON (v2) interop for document values.
//!
//! Stored fragments sometimes need to cross a JSON boundary — fixtures,
//! logs, HTTP APIs. JSON alone cannot say "this number is a datetime",
//! so Extended JSON wraps the lossy shapes in `$`-prefixed type objects.
//! This module renders any [`FieldValue`] to Extended JSON and parses it
//! back, in either of the two standard modes:
//!
//! - **Relaxed** (default): native JSON types where they are lossless,
//!   `{"$date": "..."}` with an ISO string for datetimes.
//! - **Canonical**: explicit type wrappers throughout
//!   (`{"$numberInt": "..."}`, `{"$date": {"$numberLong": "..."}}`).
//!
//! Canonical round-trips every `FieldValue`; relaxed round-trips every
//! value the fragment encoder produces.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde_json::{Map, Number, Value};

use crate::value::FieldValue;

/// Encoding mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EjsonMode {
    /// Native JSON types where lossless.
    #[default]
    Relaxed,
    /// Explicit type wrappers throughout.
    Canonical,
}

/// Errors that can occur while parsing Extended JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum EjsonError {
    /// Invalid `{"$numberInt": "..."}` format.
    InvalidInt32,
    /// Invalid `{"$numberLong": "..."}` format.
    InvalidInt64,
    /// Invalid `{"$numberDouble": "..."}` format.
    InvalidDouble,
    /// Invalid `{"$date": ...}` format.
    InvalidDate,
    /// Invalid `{"$regularExpression": {...}}` format.
    InvalidRegularExpression,
    /// A number too large for any supported representation.
    UnrepresentableNumber,
    /// Extra keys found where a strict single-key wrapper is required.
    ExtraKeys(&'static str),
}

impl fmt::Display for EjsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EjsonError::InvalidInt32 => write!(f, "Invalid Int32 format"),
            EjsonError::InvalidInt64 => write!(f, "Invalid Int64 format"),
            EjsonError::InvalidDouble => write!(f, "Invalid Double format"),
            EjsonError::InvalidDate => write!(f, "Invalid Date format"),
            EjsonError::InvalidRegularExpression => {
                write!(f, "Invalid RegularExpression format")
            }
            EjsonError::UnrepresentableNumber => write!(f, "Unrepresentable number"),
            EjsonError::ExtraKeys(kind) => {
                write!(f, "Invalid {kind} format: extra keys not allowed")
            }
        }
    }
}

impl std::error::Error for EjsonError {}

// ----------------------------------------------------------------
// Encoding

/// Render a document value as Extended JSON.
///
/// # Example
///
/// ```
/// use metastamp::{to_ejson, EjsonMode, FieldValue};
/// use serde_json::json;
///
/// let value = FieldValue::DateTime(1_710_052_200_000);
/// assert_eq!(
///     to_ejson(&value, EjsonMode::Relaxed),
///     json!({"$date": "2024-03-10T06:30:00.000Z"}),
/// );
/// assert_eq!(
///     to_ejson(&value, EjsonMode::Canonical),
///     json!({"$date": {"$numberLong": "1710052200000"}}),
/// );
/// ```
pub fn to_ejson(value: &FieldValue, mode: EjsonMode) -> Value {
    match value {
        FieldValue::Double(v) => write_double(*v, mode),
        FieldValue::Str(s) => Value::String(s.clone()),
        FieldValue::Document(fields) => {
            let mut map = Map::with_capacity(fields.len());
            for (key, field) in fields {
                map.insert(key.clone(), to_ejson(field, mode));
            }
            Value::Object(map)
        }
        FieldValue::Array(items) => {
            Value::Array(items.iter().map(|item| to_ejson(item, mode)).collect())
        }
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::DateTime(ms) => write_date(*ms, mode),
        FieldValue::Null => Value::Null,
        FieldValue::Regex(pattern, options) => {
            let mut inner = Map::with_capacity(2);
            inner.insert("pattern".to_owned(), Value::String(pattern.clone()));
            inner.insert("options".to_owned(), Value::String(options.clone()));
            wrap("$regularExpression", Value::Object(inner))
        }
        FieldValue::Int32(n) => match mode {
            EjsonMode::Relaxed => Value::Number(Number::from(*n)),
            EjsonMode::Canonical => wrap("$numberInt", Value::String(n.to_string())),
        },
        FieldValue::Int64(n) => match mode {
            EjsonMode::Relaxed => Value::Number(Number::from(*n)),
            EjsonMode::Canonical => wrap("$numberLong", Value::String(n.to_string())),
        },
    }
}

fn wrap(key: &str, inner: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_owned(), inner);
    Value::Object(map)
}

fn write_double(v: f64, mode: EjsonMode) -> Value {
    if v.is_nan() {
        return wrap("$numberDouble", Value::String("NaN".to_owned()));
    }
    if v.is_infinite() {
        let s = if v > 0.0 { "Infinity" } else { "-Infinity" };
        return wrap("$numberDouble", Value::String(s.to_owned()));
    }
    match mode {
        EjsonMode::Relaxed => match Number::from_f64(v) {
            Some(n) => Value::Number(n),
            None => wrap("$numberDouble", Value::String(v.to_string())),
        },
        EjsonMode::Canonical => wrap("$numberDouble", Value::String(v.to_string())),
    }
}

fn write_date(ms: i64, mode: EjsonMode) -> Value {
    if mode == EjsonMode::Relaxed {
        // ISO form only for years 1970-9999, as the format requires;
        // anything else falls back to the wrapped millisecond count.
        if let Some(dt) = Utc.timestamp_millis_opt(ms).single() {
            if ms >= 0 && dt.year() <= 9999 {
                let iso = dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
                return wrap("$date", Value::String(iso));
            }
        }
    }
    wrap("$date", wrap("$numberLong", Value::String(ms.to_string())))
}

// ----------------------------------------------------------------
// Decoding

/// Parse Extended JSON back into a document value.
///
/// Recognises the `$`-prefixed wrappers this crate emits; any other
/// object is an ordinary document. Wrapper objects are strict: a `$date`
/// object with extra keys is an error, not a document.
pub fn from_ejson(value: &Value) -> Result<FieldValue, EjsonError> {
    match value {
        Value::Null => Ok(FieldValue::Null),
        Value::Bool(b) => Ok(FieldValue::Bool(*b)),
        Value::Number(n) => read_number(n),
        Value::String(s) => Ok(FieldValue::Str(s.clone())),
        Value::Array(items) => Ok(FieldValue::Array(
            items.iter().map(from_ejson).collect::<Result<_, _>>()?,
        )),
        Value::Object(map) => read_object(map),
    }
}

fn read_number(n: &Number) -> Result<FieldValue, EjsonError> {
    if let Some(v) = n.as_i64() {
        return Ok(match i32::try_from(v) {
            Ok(v) => FieldValue::Int32(v),
            Err(_) => FieldValue::Int64(v),
        });
    }
    match n.as_f64() {
        Some(v) => Ok(FieldValue::Double(v)),
        None => Err(EjsonError::UnrepresentableNumber),
    }
}

fn read_object(map: &Map<String, Value>) -> Result<FieldValue, EjsonError> {
    if map.contains_key("$numberInt") {
        require_single(map, "Int32")?;
        let s = map["$numberInt"].as_str().ok_or(EjsonError::InvalidInt32)?;
        let v = s.parse::<i32>().map_err(|_| EjsonError::InvalidInt32)?;
        return Ok(FieldValue::Int32(v));
    }
    if map.contains_key("$numberLong") {
        require_single(map, "Int64")?;
        let s = map["$numberLong"].as_str().ok_or(EjsonError::InvalidInt64)?;
        let v = s.parse::<i64>().map_err(|_| EjsonError::InvalidInt64)?;
        return Ok(FieldValue::Int64(v));
    }
    if map.contains_key("$numberDouble") {
        require_single(map, "Double")?;
        let s = map["$numberDouble"]
            .as_str()
            .ok_or(EjsonError::InvalidDouble)?;
        let v = match s {
            "NaN" => f64::NAN,
            "Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            _ => s.parse::<f64>().map_err(|_| EjsonError::InvalidDouble)?,
        };
        return Ok(FieldValue::Double(v));
    }
    if map.contains_key("$date") {
        require_single(map, "Date")?;
        return read_date(&map["$date"]);
    }
    if map.contains_key("$regularExpression") {
        require_single(map, "RegularExpression")?;
        return read_regex(&map["$regularExpression"]);
    }
    let mut fields = Vec::with_capacity(map.len());
    for (key, field) in map {
        fields.push((key.clone(), from_ejson(field)?));
    }
    Ok(FieldValue::Document(fields))
}

fn require_single(map: &Map<String, Value>, kind: &'static str) -> Result<(), EjsonError> {
    if map.len() == 1 {
        Ok(())
    } else {
        Err(EjsonError::ExtraKeys(kind))
    }
}

fn read_date(inner: &Value) -> Result<FieldValue, EjsonError> {
    match inner {
        Value::String(iso) => {
            let dt = DateTime::parse_from_rfc3339(iso).map_err(|_| EjsonError::InvalidDate)?;
            Ok(FieldValue::DateTime(dt.timestamp_millis()))
        }
        Value::Object(map) => {
            if !map.contains_key("$numberLong") || map.len() != 1 {
                return Err(EjsonError::InvalidDate);
            }
            let s = map["$numberLong"].as_str().ok_or(EjsonError::InvalidDate)?;
            let ms = s.parse::<i64>().map_err(|_| EjsonError::InvalidDate)?;
            Ok(FieldValue::DateTime(ms))
        }
        _ => Err(EjsonError::InvalidDate),
    }
}

fn read_regex(inner: &Value) -> Result<FieldValue, EjsonError> {
    let map = match inner {
        Value::Object(map) => map,
        _ => return Err(EjsonError::InvalidRegularExpression),
    };
    if map.len() != 2 {
        return Err(EjsonError::InvalidRegularExpression);
    }
    let pattern = map
        .get("pattern")
        .and_then(Value::as_str)
        .ok_or(EjsonError::InvalidRegularExpression)?;
    let options = map
        .get("options")
        .and_then(Value::as_str)
        .ok_or(EjsonError::InvalidRegularExpression)?;
    Ok(FieldValue::Regex(pattern.to_owned(), options.to_owned()))
}
