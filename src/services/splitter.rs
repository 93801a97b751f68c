//! Interval splitting and row assignment.
//!
//! Intervals arrive as (day, hour) spans or continuous elapsed-hour spans and
//! must be cut into row-aligned fragments so that fixed-height calendar rows
//! can render them. Splitting never loses or duplicates time: for a span that
//! crosses N midnights, exactly N+1 fragments come out and their lengths sum
//! to the original duration. Durations are never rounded here; rounding is a
//! display concern handled by deduplication.

use crate::models::DayHour;

/// One row-local fragment of an interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSegment {
    pub row: u32,
    /// 0.0..=24.0
    pub start_hour: f64,
    /// 0.0..=24.0; 24.0 means the fragment touches midnight
    pub end_hour: f64,
    /// True when more of the same interval follows in the next row
    pub continues: bool,
}

/// Split a row-local interval, wrapping past midnight when `end_hour` is
/// below `start_hour`.
///
/// Rows are 1-based; fragments landing outside `[1, max_row]` are
/// suppressed. A wrap with `end_hour == 0` produces only the leading
/// fragment (there is nothing to show after midnight). Zero-duration
/// intervals produce no fragment at all.
pub fn split_row_interval(
    row: u32,
    start_hour: f64,
    end_hour: f64,
    max_row: u32,
) -> Vec<RowSegment> {
    let mut segments = Vec::with_capacity(2);

    if end_hour > start_hour {
        if (1..=max_row).contains(&row) {
            segments.push(RowSegment {
                row,
                start_hour,
                end_hour,
                continues: false,
            });
        }
        return segments;
    }
    if end_hour == start_hour {
        // degenerate, nothing to render
        return segments;
    }

    // wraps past midnight
    if (1..=max_row).contains(&row) && start_hour < 24.0 {
        segments.push(RowSegment {
            row,
            start_hour,
            end_hour: 24.0,
            continues: end_hour > 0.0,
        });
    }
    if end_hour > 0.0 && (1..=max_row).contains(&(row + 1)) {
        segments.push(RowSegment {
            row: row + 1,
            start_hour: 0.0,
            end_hour,
            continues: false,
        });
    }
    segments
}

/// Assign a (day, hour) span to row-local fragments, walking intermediate
/// days for spans longer than one midnight crossing.
///
/// Same-day spans and single-crossing wraps go through
/// [`split_row_interval`]; inverted spans (end before start) are degenerate
/// and dropped.
pub fn assign_day_span(start: DayHour, end: DayHour, max_row: u32) -> Vec<RowSegment> {
    if end.day == start.day {
        if end.hour > start.hour {
            return split_row_interval(start.day, start.hour, end.hour, max_row);
        }
        return Vec::new();
    }
    if end.day == start.day + 1 && end.hour < start.hour {
        return split_row_interval(start.day, start.hour, end.hour, max_row);
    }
    if end.day < start.day {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for day in start.day..=end.day {
        let from = if day == start.day { start.hour } else { 0.0 };
        let to = if day == end.day { end.hour } else { 24.0 };
        if to <= from || day < 1 || day > max_row {
            continue;
        }
        let ends_at_next_midnight = day + 1 == end.day && end.hour == 0.0;
        segments.push(RowSegment {
            row: day,
            start_hour: from,
            end_hour: to,
            continues: day < end.day && !ends_at_next_midnight,
        });
    }
    segments
}

/// Split a continuous elapsed-hour span at every 24-hour boundary.
///
/// Rows are 0-based and open-ended; row `n` covers the half-open range
/// `[24n, 24n + 24)`, so a span ending exactly on a boundary does not
/// occupy the next row.
pub fn split_elapsed_span(start_elapsed: f64, end_elapsed: f64) -> Vec<RowSegment> {
    if end_elapsed <= start_elapsed {
        return Vec::new();
    }
    let start = start_elapsed.max(0.0);
    if end_elapsed <= start {
        return Vec::new();
    }

    let first_row = (start / 24.0).floor() as u32;
    let last_row = if end_elapsed % 24.0 == 0.0 {
        (end_elapsed / 24.0) as u32 - 1
    } else {
        (end_elapsed / 24.0).floor() as u32
    };

    let mut segments = Vec::with_capacity((last_row - first_row + 1) as usize);
    for row in first_row..=last_row {
        let row_start = row as f64 * 24.0;
        let from = (start - row_start).max(0.0);
        let to = (end_elapsed - row_start).min(24.0);
        if to <= from {
            continue;
        }
        segments.push(RowSegment {
            row,
            start_hour: from,
            end_hour: to,
            continues: row < last_row,
        });
    }
    segments
}
