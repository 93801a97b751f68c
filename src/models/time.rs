use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::*;

/// Calendar-grid coordinate: day of month (1-based) plus decimal hour of day.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DayHour {
    /// Day of month, 1..=31
    pub day: u32,
    /// Decimal hour of day, 0.0..=24.0
    pub hour: f64,
}

impl DayHour {
    /// Create a new (day, hour) coordinate.
    pub fn new(day: u32, hour: f64) -> Self {
        Self { day, hour }
    }

    /// Continuous hours since midnight of day 1 of the roster month.
    pub fn elapsed_hours(&self) -> f64 {
        (self.day as f64 - 1.0) * 24.0 + self.hour
    }

    /// Grid coordinate of a UTC instant (day of month + decimal hour in UTC).
    pub fn from_utc(instant: &DateTime<Utc>) -> Self {
        Self {
            day: instant.day(),
            hour: decimal_hour_utc(instant),
        }
    }
}

/// Decimal hour of day for a UTC instant, seconds folded in.
pub fn decimal_hour_utc(instant: &DateTime<Utc>) -> f64 {
    instant.hour() as f64 + instant.minute() as f64 / 60.0 + instant.second() as f64 / 3600.0
}

/// Parse an RFC 3339 timestamp into a UTC instant.
///
/// Returns `None` on unparsable input; the caller decides whether that means
/// "fall back to the next representation" or "skip the interval".
pub fn parse_utc_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an "HH:MM" clock string into a decimal hour.
pub fn parse_clock_hhmm(raw: &str) -> Option<f64> {
    let (h, m) = raw.trim().split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours as f64 + minutes as f64 / 60.0)
}

/// Parse a "YYYY-MM" month string into (year, month).
pub fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (y, m) = raw.trim().split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

/// Number of days in the given month, or 0 when the month is invalid.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return 0,
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(n) => n.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}
