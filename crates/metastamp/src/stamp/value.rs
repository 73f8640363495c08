//! Input-side value types: the application timestamp and the tagged
//! unions accepted by the encoder and the query evolver.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::value::FieldValue;
use crate::zone::Zone;

use super::error::StampError;

/// A timezone-aware point in time: an absolute instant plus the zone
/// used to display it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamp {
    /// The absolute instant.
    pub instant: DateTime<Utc>,
    /// The zone this stamp renders in.
    pub zone: Zone,
}

impl Stamp {
    pub fn new(instant: DateTime<Utc>, zone: Zone) -> Stamp {
        Stamp { instant, zone }
    }

    /// The wall-clock rendering of this stamp in its own zone.
    pub fn local(&self) -> DateTime<FixedOffset> {
        self.zone.at(self.instant)
    }

    /// The same instant re-expressed in another zone.
    pub fn in_zone(&self, zone: Zone) -> Stamp {
        Stamp {
            instant: self.instant,
            zone,
        }
    }
}

/// Anything the encoder accepts: a value that is, or can be coerced to,
/// an absolute instant.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeLike {
    /// Already a zoned timestamp.
    Stamp(Stamp),
    /// A bare absolute instant.
    Instant(DateTime<Utc>),
    /// A calendar date; coerces to its midnight in the reading zone.
    Date(NaiveDate),
    /// Textual input. RFC 3339 first; otherwise `YYYY-MM-DD HH:MM:SS`
    /// (fractional seconds allowed) or bare `YYYY-MM-DD`, both read as
    /// wall-clock time in the reading zone.
    Text(String),
}

impl TimeLike {
    /// Coerce to an absolute instant. Wall-clock shapes (`Date`, naive
    /// `Text`) are read in `zone`; a reading that names no instant (a
    /// DST gap) or parses under no accepted format is a
    /// [`StampError::ConversionFailed`].
    pub fn coerce(&self, zone: &Zone) -> Result<DateTime<Utc>, StampError> {
        match self {
            TimeLike::Stamp(stamp) => Ok(stamp.instant),
            TimeLike::Instant(instant) => Ok(*instant),
            TimeLike::Date(date) => {
                let midnight = date.and_time(NaiveTime::MIN);
                zone.from_local(midnight)
                    .ok_or_else(|| StampError::ConversionFailed(date.to_string()))
            }
            TimeLike::Text(text) => parse_text(text, zone),
        }
    }
}

fn parse_text(text: &str, zone: &Zone) -> Result<DateTime<Utc>, StampError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return zone
            .from_local(naive)
            .ok_or_else(|| StampError::ConversionFailed(text.to_owned()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return zone
            .from_local(date.and_time(NaiveTime::MIN))
            .ok_or_else(|| StampError::ConversionFailed(text.to_owned()));
    }
    Err(StampError::ConversionFailed(text.to_owned()))
}

impl From<Stamp> for TimeLike {
    fn from(value: Stamp) -> Self {
        TimeLike::Stamp(value)
    }
}

impl From<DateTime<Utc>> for TimeLike {
    fn from(value: DateTime<Utc>) -> Self {
        TimeLike::Instant(value)
    }
}

impl From<NaiveDate> for TimeLike {
    fn from(value: NaiveDate) -> Self {
        TimeLike::Date(value)
    }
}

impl From<&str> for TimeLike {
    fn from(value: &str) -> Self {
        TimeLike::Text(value.to_owned())
    }
}

impl From<String> for TimeLike {
    fn from(value: String) -> Self {
        TimeLike::Text(value)
    }
}

/// Anything that can appear on the query-predicate side of a field
/// comparison against a stored fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A calendar date.
    Date(NaiveDate),
    /// A bare absolute instant.
    Instant(DateTime<Utc>),
    /// A zoned timestamp.
    Stamp(Stamp),
    /// Any other operand; passes through the evolver unchanged.
    Value(FieldValue),
}

impl From<NaiveDate> for QueryValue {
    fn from(value: NaiveDate) -> Self {
        QueryValue::Date(value)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(value: DateTime<Utc>) -> Self {
        QueryValue::Instant(value)
    }
}

impl From<Stamp> for QueryValue {
    fn from(value: Stamp) -> Self {
        QueryValue::Stamp(value)
    }
}

impl From<FieldValue> for QueryValue {
    fn from(value: FieldValue) -> Self {
        QueryValue::Value(value)
    }
}
