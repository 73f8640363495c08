//! Zone registry: named IANA zones and fixed-offset fallbacks.
//!
//! Lookup-by-name goes through the bundled IANA database; a fixed-offset
//! zone stands in when only a numeric offset survives (a raw offset was
//! in effect at encode time, or the name no longer resolves).

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// A display zone: a named IANA zone, or a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Zone {
    /// Look a zone up by IANA name.
    ///
    /// # Example
    ///
    /// ```
    /// use metastamp::Zone;
    ///
    /// assert!(Zone::named("America/Denver").is_some());
    /// assert!(Zone::named("Not/AZone").is_none());
    /// ```
    pub fn named(name: &str) -> Option<Zone> {
        name.parse::<Tz>().ok().map(Zone::Named)
    }

    /// Build a fixed-offset zone from a signed number of seconds east of
    /// UTC. `None` when the offset is out of range (beyond a day).
    pub fn fixed(seconds: i32) -> Option<Zone> {
        FixedOffset::east_opt(seconds).map(Zone::Fixed)
    }

    /// The UTC zone.
    pub fn utc() -> Zone {
        Zone::Named(Tz::UTC)
    }

    /// Render an instant in this zone.
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Named(tz) => {
                let local = instant.with_timezone(tz);
                let offset = local.offset().fix();
                instant.with_timezone(&offset)
            }
            Zone::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// The zone's UTC offset in seconds at a given instant.
    pub fn offset_seconds_at(&self, instant: DateTime<Utc>) -> i32 {
        self.at(instant).offset().local_minus_utc()
    }

    /// Convert a wall-clock reading in this zone to an absolute instant.
    ///
    /// On a DST fold the earliest instant wins. In a DST gap the reading
    /// names no instant at all and `None` is returned.
    pub fn from_local(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Named(tz) => tz
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for Zone {
    /// The IANA name, or `±HH:MM` for a fixed offset. The fixed form is
    /// never a valid IANA name, so it round-trips through the decoder's
    /// `offset` fallback rather than a name lookup.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Fixed(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let abs = seconds.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}
