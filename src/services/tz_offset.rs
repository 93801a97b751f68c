//! UTC offset resolution for IANA timezones.
//!
//! The offset only decorates the low-alertness band in non-home-base views,
//! so it must never abort a transform: an unresolvable zone identifier
//! resolves to 0 rather than an error.

use chrono::{NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;

/// UTC offset of `zone_id` on `date`, in signed fractional hours.
///
/// DST-aware: the offset is taken at noon UTC of the given date, away from
/// the midnight edges where transitions occur. Fractional zones (e.g.
/// Asia/Kolkata, +5.5) come out exact. Unknown zone identifiers and invalid
/// dates return 0.0.
pub fn utc_offset_hours(zone_id: &str, date: NaiveDate) -> f64 {
    let tz: Tz = match zone_id.parse() {
        Ok(tz) => tz,
        Err(_) => return 0.0,
    };
    let noon_utc = match date.and_hms_opt(12, 0, 0) {
        Some(dt) => dt,
        None => return 0.0,
    };
    let offset = tz.offset_from_utc_datetime(&noon_utc);
    offset.fix().local_minus_utc() as f64 / 3600.0
}
