//! The persisted fragment: one timestamp as a flat document.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::value::FieldValue;
use crate::zone::Zone;

use super::normalize::normalized_time;

/// Wire field names. Fixed strings; existing persisted data depends on
/// them byte for byte.
pub mod keys {
    pub const TIME: &str = "time";
    pub const NORMALIZED: &str = "normalized";
    pub const CWEEK: &str = "cweek";
    pub const YEAR: &str = "year";
    pub const MONTH: &str = "month";
    pub const DAY: &str = "day";
    pub const WDAY: &str = "wday";
    pub const HOUR: &str = "hour";
    pub const MIN: &str = "min";
    pub const SEC: &str = "sec";
    pub const ZONE: &str = "zone";
    pub const OFFSET: &str = "offset";
}

/// One persisted timestamp, with its calendar metadata pre-computed in
/// the zone that was current at encode time.
///
/// Created only by the encoder; consumed only by the decoder or the
/// query evolver; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct StampFragment {
    /// The absolute instant.
    pub time: DateTime<Utc>,
    /// `time`'s local calendar fields reinterpreted as UTC. Derived from
    /// `time` and the encode zone; never set independently.
    pub normalized: DateTime<Utc>,
    /// ISO 8601 week number of the local date.
    pub cweek: u32,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Day of week, 0 = Sunday.
    pub wday: u32,
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
    /// Zone name current at encode time.
    pub zone: String,
    /// The zone's UTC offset in seconds at `time`.
    pub offset: i32,
}

impl StampFragment {
    /// Build the fragment for `instant` as displayed in `zone`.
    pub fn build(instant: DateTime<Utc>, zone: &Zone) -> StampFragment {
        let local = zone.at(instant);
        StampFragment {
            time: instant,
            normalized: normalized_time(instant, zone),
            cweek: local.iso_week().week(),
            year: local.year(),
            month: local.month(),
            day: local.day(),
            wday: local.weekday().num_days_from_sunday(),
            hour: local.hour(),
            min: local.minute(),
            sec: local.second(),
            zone: zone.to_string(),
            offset: local.offset().local_minus_utc(),
        }
    }

    /// Render as the flat document the store persists. Instants carry
    /// the store's millisecond precision.
    pub fn to_document(&self) -> FieldValue {
        FieldValue::Document(vec![
            (
                keys::TIME.to_owned(),
                FieldValue::DateTime(self.time.timestamp_millis()),
            ),
            (
                keys::NORMALIZED.to_owned(),
                FieldValue::DateTime(self.normalized.timestamp_millis()),
            ),
            (keys::CWEEK.to_owned(), FieldValue::Int32(self.cweek as i32)),
            (keys::YEAR.to_owned(), FieldValue::Int32(self.year)),
            (keys::MONTH.to_owned(), FieldValue::Int32(self.month as i32)),
            (keys::DAY.to_owned(), FieldValue::Int32(self.day as i32)),
            (keys::WDAY.to_owned(), FieldValue::Int32(self.wday as i32)),
            (keys::HOUR.to_owned(), FieldValue::Int32(self.hour as i32)),
            (keys::MIN.to_owned(), FieldValue::Int32(self.min as i32)),
            (keys::SEC.to_owned(), FieldValue::Int32(self.sec as i32)),
            (keys::ZONE.to_owned(), FieldValue::Str(self.zone.clone())),
            (keys::OFFSET.to_owned(), FieldValue::Int32(self.offset)),
        ])
    }
}
