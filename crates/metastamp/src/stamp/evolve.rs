//! Query evolver: query-side values → storage-comparable operands.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};

use crate::config::CodecConfig;
use crate::value::FieldValue;

use super::fragment::keys;
use super::value::{QueryValue, TimeLike};

/// Shape a query operand for comparison against a stored fragment.
///
/// Time-like operands wrap as `{"time": <instant>}` so they compare
/// against the `time` sub-field the encoder writes; any other operand
/// passes through untouched — it may target another representation on
/// purpose. Never raises.
///
/// # Example
///
/// ```
/// use metastamp::{evolve, CodecConfig, FieldValue, QueryValue};
///
/// let config = CodecConfig::default();
/// let passthrough = evolve(QueryValue::Value(FieldValue::Int32(7)), &config);
/// assert_eq!(passthrough, FieldValue::Int32(7));
/// ```
pub fn evolve(value: QueryValue, config: &CodecConfig) -> FieldValue {
    let instant = match value {
        QueryValue::Date(date) => match TimeLike::Date(date).coerce(&config.default_zone) {
            Ok(instant) => instant,
            // Local midnight swallowed by a DST gap: read the wall
            // clock as UTC instead.
            Err(_) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
        },
        QueryValue::Instant(instant) => instant,
        QueryValue::Stamp(stamp) => stamp.instant,
        QueryValue::Value(other) => return other,
    };
    time_operand(instant)
}

fn time_operand(instant: DateTime<Utc>) -> FieldValue {
    FieldValue::Document(vec![(
        keys::TIME.to_owned(),
        FieldValue::DateTime(instant.timestamp_millis()),
    )])
}
