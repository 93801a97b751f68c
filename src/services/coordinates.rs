//! Coordinate selection: which time representation to trust, per view.
//!
//! Every record carries several optional representations of the same
//! real-world interval (precomputed home-base day/hour pairs, canonical UTC
//! instants, bare HH:MM clock strings). Each view declares an ordered chain
//! of resolvers and takes the first fully-present set; representations are
//! never mixed within a single interval.
//!
//! The home-base grid is the ground-truth view and accepts only the
//! home-base pair — an interval without one is skipped with a diagnosable
//! error rather than reconstructed through another zone's arithmetic. The
//! elapsed view only needs a self-consistent relative ordering and tolerates
//! the loosest fallback.

use thiserror::Error;

use crate::models::{
    parse_clock_hhmm, parse_utc_instant, DayHour, DutyRecord, RestBlock, SleepBlock,
};
use crate::views::ViewKind;

/// Start/end of one interval in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanEndpoints {
    pub start: DayHour,
    pub end: DayHour,
}

/// Why an interval could not be placed on the current view.
///
/// Both variants are local to one interval and never abort processing of
/// the remaining roster.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("{record}: missing {representation} required by the {view} view")]
    MissingRepresentation {
        record: String,
        representation: &'static str,
        view: &'static str,
    },
    #[error("{record}: unparsable timestamp in {field}")]
    MalformedTimestamp {
        record: String,
        field: &'static str,
    },
}

/// A single resolution strategy: present, or not.
pub type SpanResolver<R> = fn(&R) -> Option<SpanEndpoints>;

/// First-match-wins composition over an ordered resolver chain.
pub fn resolve_first_match<R>(record: &R, chain: &[SpanResolver<R>]) -> Option<SpanEndpoints> {
    chain.iter().find_map(|resolve| resolve(record))
}

fn view_name(view: ViewKind) -> &'static str {
    match view {
        ViewKind::HomeBase => "home-base",
        ViewKind::Utc => "UTC",
        ViewKind::Elapsed => "elapsed",
    }
}

fn span_from_pairs(
    start_day: Option<u32>,
    start_hour: Option<f64>,
    end_day: Option<u32>,
    end_hour: Option<f64>,
) -> Option<SpanEndpoints> {
    Some(SpanEndpoints {
        start: DayHour::new(start_day?, start_hour?),
        end: DayHour::new(end_day?, end_hour?),
    })
}

fn span_from_instants(start: Option<&str>, end: Option<&str>) -> Option<SpanEndpoints> {
    let start = parse_utc_instant(start?)?;
    let end = parse_utc_instant(end?)?;
    Some(SpanEndpoints {
        start: DayHour::from_utc(&start),
        end: DayHour::from_utc(&end),
    })
}

/// Clock strings anchored to a known calendar day. An end clock at or
/// before the start clock wrapped past midnight into the next day.
fn span_from_clocks(start: Option<&str>, end: Option<&str>, day: u32) -> Option<SpanEndpoints> {
    let start_hour = parse_clock_hhmm(start?)?;
    let end_hour = parse_clock_hhmm(end?)?;
    let end_day = if end_hour > start_hour { day } else { day + 1 };
    Some(SpanEndpoints {
        start: DayHour::new(day, start_hour),
        end: DayHour::new(end_day, end_hour),
    })
}

// ---------------------------------------------------------------------------
// Duty resolvers
// ---------------------------------------------------------------------------

fn duty_home_pair(duty: &DutyRecord) -> Option<SpanEndpoints> {
    span_from_pairs(
        duty.report_day,
        duty.report_hour,
        duty.release_day,
        duty.release_hour,
    )
}

fn duty_utc_instants(duty: &DutyRecord) -> Option<SpanEndpoints> {
    span_from_instants(
        duty.report_time_utc.as_deref(),
        duty.release_time_utc.as_deref(),
    )
}

fn duty_local_clocks(duty: &DutyRecord) -> Option<SpanEndpoints> {
    use chrono::Datelike;
    span_from_clocks(
        duty.report_time_local.as_deref(),
        duty.release_time_local.as_deref(),
        duty.date.day(),
    )
}

const DUTY_HOME_BASE_CHAIN: &[SpanResolver<DutyRecord>] = &[duty_home_pair];
const DUTY_UTC_CHAIN: &[SpanResolver<DutyRecord>] = &[duty_utc_instants, duty_home_pair];
const DUTY_ELAPSED_CHAIN: &[SpanResolver<DutyRecord>] =
    &[duty_home_pair, duty_utc_instants, duty_local_clocks];

fn duty_chain(view: ViewKind) -> &'static [SpanResolver<DutyRecord>] {
    match view {
        ViewKind::HomeBase => DUTY_HOME_BASE_CHAIN,
        ViewKind::Utc => DUTY_UTC_CHAIN,
        ViewKind::Elapsed => DUTY_ELAPSED_CHAIN,
    }
}

/// Resolve a duty's report/release span for the given view.
pub fn select_duty_span(duty: &DutyRecord, view: ViewKind) -> Result<SpanEndpoints, SelectError> {
    if let Some(span) = resolve_first_match(duty, duty_chain(view)) {
        return Ok(span);
    }
    let utc_present = duty.report_time_utc.is_some() || duty.release_time_utc.is_some();
    let utc_usable = duty_utc_instants(duty).is_some();
    if view != ViewKind::HomeBase && utc_present && !utc_usable {
        return Err(SelectError::MalformedTimestamp {
            record: duty.duty_id.clone(),
            field: "report_time_utc/release_time_utc",
        });
    }
    Err(SelectError::MissingRepresentation {
        record: duty.duty_id.clone(),
        representation: match view {
            ViewKind::HomeBase => "report_day/report_hour pair",
            ViewKind::Utc => "UTC instant or precomputed day/hour pair",
            ViewKind::Elapsed => "any usable time representation",
        },
        view: view_name(view),
    })
}

// ---------------------------------------------------------------------------
// Sleep resolvers
// ---------------------------------------------------------------------------

fn sleep_home_pair(block: &SleepBlock) -> Option<SpanEndpoints> {
    span_from_pairs(
        block.sleep_start_day,
        block.sleep_start_hour,
        block.sleep_end_day,
        block.sleep_end_hour,
    )
}

fn sleep_utc_instants(block: &SleepBlock) -> Option<SpanEndpoints> {
    span_from_instants(
        block.sleep_start_utc.as_deref(),
        block.sleep_end_utc.as_deref(),
    )
}

fn sleep_local_clocks(block: &SleepBlock) -> Option<SpanEndpoints> {
    use chrono::Datelike;
    span_from_clocks(
        block.sleep_start_time.as_deref(),
        block.sleep_end_time.as_deref(),
        block.date?.day(),
    )
}

const SLEEP_HOME_BASE_CHAIN: &[SpanResolver<SleepBlock>] = &[sleep_home_pair];
const SLEEP_UTC_CHAIN: &[SpanResolver<SleepBlock>] = &[sleep_utc_instants, sleep_home_pair];
const SLEEP_ELAPSED_CHAIN: &[SpanResolver<SleepBlock>] =
    &[sleep_home_pair, sleep_utc_instants, sleep_local_clocks];

fn sleep_chain(view: ViewKind) -> &'static [SpanResolver<SleepBlock>] {
    match view {
        ViewKind::HomeBase => SLEEP_HOME_BASE_CHAIN,
        ViewKind::Utc => SLEEP_UTC_CHAIN,
        ViewKind::Elapsed => SLEEP_ELAPSED_CHAIN,
    }
}

/// Resolve a sleep block's span for the given view. `label` identifies the
/// block in diagnostics (sleep blocks carry no id of their own).
pub fn select_sleep_span(
    block: &SleepBlock,
    label: &str,
    view: ViewKind,
) -> Result<SpanEndpoints, SelectError> {
    if let Some(span) = resolve_first_match(block, sleep_chain(view)) {
        return Ok(span);
    }
    let utc_present = block.sleep_start_utc.is_some() || block.sleep_end_utc.is_some();
    if view != ViewKind::HomeBase && utc_present && sleep_utc_instants(block).is_none() {
        return Err(SelectError::MalformedTimestamp {
            record: label.to_string(),
            field: "sleep_start_utc/sleep_end_utc",
        });
    }
    Err(SelectError::MissingRepresentation {
        record: label.to_string(),
        representation: match view {
            ViewKind::HomeBase => "sleep_start_day/sleep_start_hour pair",
            ViewKind::Utc => "UTC instant or precomputed day/hour pair",
            ViewKind::Elapsed => "any usable time representation",
        },
        view: view_name(view),
    })
}

// ---------------------------------------------------------------------------
// In-flight rest resolvers
// ---------------------------------------------------------------------------

fn rest_home_pair(block: &RestBlock) -> Option<SpanEndpoints> {
    span_from_pairs(
        block.start_day_home_tz,
        block.start_hour_home_tz,
        block.end_day_home_tz,
        block.end_hour_home_tz,
    )
}

fn rest_utc_instants(block: &RestBlock) -> Option<SpanEndpoints> {
    span_from_instants(block.start_utc.as_deref(), block.end_utc.as_deref())
}

const REST_HOME_BASE_CHAIN: &[SpanResolver<RestBlock>] = &[rest_home_pair];
const REST_UTC_CHAIN: &[SpanResolver<RestBlock>] = &[rest_utc_instants, rest_home_pair];
// Rest blocks carry no calendar day of their own, so there is no clock-string
// anchor; the elapsed chain ends at the UTC instants.
const REST_ELAPSED_CHAIN: &[SpanResolver<RestBlock>] = &[rest_home_pair, rest_utc_instants];

fn rest_chain(view: ViewKind) -> &'static [SpanResolver<RestBlock>] {
    match view {
        ViewKind::HomeBase => REST_HOME_BASE_CHAIN,
        ViewKind::Utc => REST_UTC_CHAIN,
        ViewKind::Elapsed => REST_ELAPSED_CHAIN,
    }
}

/// Resolve an in-flight rest block's span for the given view.
pub fn select_rest_span(
    block: &RestBlock,
    label: &str,
    view: ViewKind,
) -> Result<SpanEndpoints, SelectError> {
    if let Some(span) = resolve_first_match(block, rest_chain(view)) {
        return Ok(span);
    }
    let utc_present = block.start_utc.is_some() || block.end_utc.is_some();
    if view != ViewKind::HomeBase && utc_present && rest_utc_instants(block).is_none() {
        return Err(SelectError::MalformedTimestamp {
            record: label.to_string(),
            field: "start_utc/end_utc",
        });
    }
    Err(SelectError::MissingRepresentation {
        record: label.to_string(),
        representation: match view {
            ViewKind::HomeBase => "start_day_home_tz/start_hour_home_tz pair",
            ViewKind::Utc => "UTC instant or precomputed day/hour pair",
            ViewKind::Elapsed => "any usable time representation",
        },
        view: view_name(view),
    })
}
