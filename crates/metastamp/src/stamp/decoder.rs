//! Decoder: stored value → application timestamp.

use chrono::{DateTime, TimeZone, Utc};

use crate::config::CodecConfig;
use crate::value::FieldValue;
use crate::zone::Zone;

use super::error::StampError;
use super::fragment::keys;
use super::value::Stamp;

/// Decodes stored values back into application timestamps.
#[derive(Debug, Clone, Copy)]
pub struct StampDecoder {
    pub config: CodecConfig,
}

impl StampDecoder {
    pub fn new(config: CodecConfig) -> StampDecoder {
        StampDecoder { config }
    }

    /// Read a stored value back into a timestamp.
    ///
    /// Three stored shapes are accepted:
    ///
    /// - null — "no value", returned as `None`;
    /// - a bare datetime — data written before the fragment format; it
    ///   decodes in the configured default zone with no fragment fields
    ///   required;
    /// - a fragment document — the display zone resolves from the `zone`
    ///   name, falling back to the numeric `offset`, and finally to UTC
    ///   when neither resolves.
    ///
    /// Anything else is a [`StampError::NotTimeLike`]; a fragment whose
    /// `time` field is missing or malformed fails with
    /// [`StampError::MissingTime`] / [`StampError::MalformedTime`].
    pub fn demongoize(&self, value: &FieldValue) -> Result<Option<Stamp>, StampError> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::DateTime(ms) => {
                let instant = instant_from_millis(*ms)?;
                Ok(Some(Stamp::new(instant, self.config.default_zone)))
            }
            FieldValue::Document(_) => self.demongoize_fragment(value).map(Some),
            _ => Err(StampError::NotTimeLike),
        }
    }

    fn demongoize_fragment(&self, doc: &FieldValue) -> Result<Stamp, StampError> {
        let time = doc.get(keys::TIME).ok_or(StampError::MissingTime)?;
        let ms = time.as_datetime_ms().ok_or(StampError::MalformedTime)?;
        let mut instant = instant_from_millis(ms)?;
        if !self.config.store_as_utc {
            // Re-expression through the local zone; instant-preserving
            // for epoch-relative storage.
            instant = self.config.default_zone.at(instant).with_timezone(&Utc);
        }
        let zone = self.resolve_zone(doc);
        Ok(Stamp::new(instant, zone))
    }

    fn resolve_zone(&self, doc: &FieldValue) -> Zone {
        if let Some(name) = doc.get(keys::ZONE).and_then(FieldValue::as_str) {
            if let Some(zone) = Zone::named(name) {
                return zone;
            }
        }
        if let Some(seconds) = doc.get(keys::OFFSET).and_then(FieldValue::as_i64) {
            if let Ok(seconds) = i32::try_from(seconds) {
                if let Some(zone) = Zone::fixed(seconds) {
                    return zone;
                }
            }
        }
        // Neither resolves: decode in UTC rather than guessing.
        Zone::utc()
    }
}

fn instant_from_millis(ms: i64) -> Result<DateTime<Utc>, StampError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or(StampError::MalformedTime)
}
