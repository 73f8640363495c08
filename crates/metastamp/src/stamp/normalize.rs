//! Zone-independent wall-clock sort key.

use chrono::{DateTime, TimeZone, Utc};

use crate::zone::Zone;

/// Reinterpret the wall-clock rendering of `instant` in `zone` as if it
/// denoted UTC.
///
/// The result is a comparison key for local wall-clock time: stamps
/// written under different zones land on the same key exactly when their
/// local renderings agree, so a query can ask for "02:00–03:00 local"
/// without knowing which zone each document was written in.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use metastamp::{normalized_time, Zone};
///
/// let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
/// let zone = Zone::named("America/New_York").unwrap();
/// // 06:30Z renders as 01:30 local; the local fields are re-read as UTC.
/// assert_eq!(
///     normalized_time(instant, &zone),
///     Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap(),
/// );
/// ```
pub fn normalized_time(instant: DateTime<Utc>, zone: &Zone) -> DateTime<Utc> {
    Utc.from_utc_datetime(&zone.at(instant).naive_local())
}
