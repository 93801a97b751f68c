//! Per-view chronogram transform.
//!
//! One parametrized orchestrator produces all three renderings (home-base,
//! UTC, elapsed) of the same roster: the views differ only in which
//! resolver chain the coordinate selector applies and how resolved spans
//! map onto rows, so the "three views, one truth" guarantee is structural
//! rather than by convention.
//!
//! The philosophy throughout is "render everything resolvable, diagnosably
//! drop the rest": a partial calendar view is strictly more useful to the
//! analyst than an aborted render, so no per-interval condition is fatal.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use log::warn;
use thiserror::Error;

use crate::config::ChronogramParams;
use crate::models::{
    days_in_month, parse_month, DutyRecord, RiskLevel, RosterAnalysis, SleepBlock,
};
use crate::views::{
    ChronogramData, DutyBar, DutyLimitMarker, LimitKind, RestBar, RowLabel, SleepBar, ViewKind,
    WoclBand,
};

use super::coordinates::{self, SpanEndpoints};
use super::dedup::dedupe_bars;
use super::phase::accumulate_phase_shifts;
use super::splitter::{assign_day_span, split_elapsed_span, RowSegment};
use super::tz_offset::utc_offset_hours;

/// Transform-level failures. Per-interval problems never surface here;
/// they become diagnostics on the result instead.
#[derive(Debug, Error)]
pub enum ChronogramError {
    #[error("unparsable reference month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

/// Map a resolved span onto row-local fragments for the given view.
fn assign_view_span(view: ViewKind, span: SpanEndpoints, max_row: u32) -> Vec<RowSegment> {
    match view {
        ViewKind::HomeBase | ViewKind::Utc => assign_day_span(span.start, span.end, max_row),
        ViewKind::Elapsed => {
            split_elapsed_span(span.start.elapsed_hours(), span.end.elapsed_hours())
        }
    }
}

/// Wrap a clock window into `[0, 24)`, splitting in two when it crosses
/// midnight. `offset_hours` shifts the window (zone offset or phase shift).
fn band_windows(start_hour: f64, duration_hours: f64, offset_hours: f64) -> Vec<(f64, f64)> {
    if duration_hours >= 24.0 {
        return vec![(0.0, 24.0)];
    }
    let base = (start_hour + offset_hours).rem_euclid(24.0);
    let end = base + duration_hours;
    if end <= 24.0 {
        vec![(base, end)]
    } else {
        vec![(base, 24.0), (0.0, end - 24.0)]
    }
}

fn push_limit_marker(
    markers: &mut Vec<DutyLimitMarker>,
    view: ViewKind,
    span: SpanEndpoints,
    limit_hours: f64,
    kind: LimitKind,
    duty_id: &str,
    max_row: u32,
) {
    if limit_hours <= 0.0 {
        return;
    }
    match view {
        ViewKind::HomeBase | ViewKind::Utc => {
            let total = span.start.hour + limit_hours;
            let row = span.start.day + (total / 24.0).floor() as u32;
            let hour = total % 24.0;
            if (1..=max_row).contains(&row) {
                markers.push(DutyLimitMarker {
                    duty_id: duty_id.to_string(),
                    row,
                    hour,
                    kind,
                });
            }
        }
        ViewKind::Elapsed => {
            let elapsed = span.start.elapsed_hours() + limit_hours;
            let row = (elapsed / 24.0).floor() as u32;
            markers.push(DutyLimitMarker {
                duty_id: duty_id.to_string(),
                row,
                hour: elapsed - row as f64 * 24.0,
                kind,
            });
        }
    }
}

fn collect_sleep_bars(
    bars: &mut Vec<SleepBar>,
    diagnostics: &mut Vec<String>,
    block: &SleepBlock,
    label: &str,
    from_rest_day: bool,
    view: ViewKind,
    max_row: u32,
) {
    match coordinates::select_sleep_span(block, label, view) {
        Ok(span) => {
            for seg in assign_view_span(view, span, max_row) {
                bars.push(SleepBar {
                    row: seg.row,
                    start_hour: seg.start_hour,
                    end_hour: seg.end_hour,
                    continues: seg.continues,
                    effective_hours: block.effective_hours,
                    quality_factor: block.quality_factor,
                    from_rest_day,
                    source: label.to_string(),
                });
            }
        }
        Err(err) => {
            warn!("skipping sleep interval: {}", err);
            diagnostics.push(err.to_string());
        }
    }
}

fn duty_warnings(duty: &DutyRecord, params: &ChronogramParams) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(prior) = duty.prior_sleep {
        if prior.value() < params.warnings.low_prior_sleep_hours {
            warnings.push(format!("low prior sleep ({:.1} h)", prior.value()));
        }
    }
    if let Some(wocl) = duty.wocl_hours {
        if wocl.value() > params.warnings.high_wocl_hours {
            warnings.push(format!("high WOCL exposure ({:.1} h)", wocl.value()));
        }
    }
    if duty.used_discretion {
        warnings.push("commander's discretion used".to_string());
    }
    warnings
}

fn build_row_labels(
    roster: &RosterAnalysis,
    view: ViewKind,
    year: i32,
    month: u32,
    total_rows: u32,
    duty_bars: &[DutyBar],
    params: &ChronogramParams,
) -> Vec<RowLabel> {
    let duty_index: HashMap<&str, &DutyRecord> = roster
        .duties
        .iter()
        .map(|duty| (duty.duty_id.as_str(), duty))
        .collect();

    let rows: Vec<u32> = match view {
        ViewKind::HomeBase | ViewKind::Utc => (1..=total_rows).collect(),
        ViewKind::Elapsed => (0..total_rows).collect(),
    };

    rows.into_iter()
        .map(|row| {
            let mut has_duty = false;
            let mut worst = RiskLevel::Unknown;
            let mut warnings = Vec::new();
            let mut seen_duties = HashSet::new();

            for bar in duty_bars.iter().filter(|bar| bar.row == row) {
                has_duty = true;
                worst = worst.max(bar.risk_level);
                if !seen_duties.insert(bar.duty_id.as_str()) {
                    continue;
                }
                if let Some(duty) = duty_index.get(bar.duty_id.as_str()) {
                    for warning in duty_warnings(duty, params) {
                        if !warnings.contains(&warning) {
                            warnings.push(warning);
                        }
                    }
                }
            }

            let text = match view {
                ViewKind::HomeBase | ViewKind::Utc => NaiveDate::from_ymd_opt(year, month, row)
                    .map(|date| date.format("%d %b").to_string())
                    .unwrap_or_else(|| format!("Day {}", row)),
                ViewKind::Elapsed => format!("Day {}", row + 1),
            };

            RowLabel {
                row,
                text,
                has_duty,
                risk_level: worst,
                warnings,
            }
        })
        .collect()
}

/// Compute the complete layout for one view of the roster.
///
/// Pure function of its inputs: records are never mutated, nothing is
/// cached, and every call rebuilds the result from scratch. The output
/// shape is identical across views, so a downstream renderer can treat all
/// three uniformly.
pub fn compute_chronogram_data(
    roster: &RosterAnalysis,
    view: ViewKind,
    params: &ChronogramParams,
) -> Result<ChronogramData, ChronogramError> {
    let (year, month) = parse_month(&roster.month)
        .ok_or_else(|| ChronogramError::InvalidMonth(roster.month.clone()))?;
    let month_days = days_in_month(year, month);
    if month_days == 0 {
        return Err(ChronogramError::InvalidMonth(roster.month.clone()));
    }

    let mut diagnostics: Vec<String> = Vec::new();
    let mut duty_bars: Vec<DutyBar> = Vec::new();
    let mut limit_markers: Vec<DutyLimitMarker> = Vec::new();

    for duty in &roster.duties {
        match coordinates::select_duty_span(duty, view) {
            Ok(span) => {
                for seg in assign_view_span(view, span, month_days) {
                    duty_bars.push(DutyBar {
                        duty_id: duty.duty_id.clone(),
                        row: seg.row,
                        start_hour: seg.start_hour,
                        end_hour: seg.end_hour,
                        continues: seg.continues,
                        risk_level: duty.risk_level,
                        avg_performance: duty.avg_performance,
                        duty_hours: duty.duty_hours,
                    });
                }
                if let Some(limit) = duty.max_fdp_hours {
                    push_limit_marker(
                        &mut limit_markers,
                        view,
                        span,
                        limit.value(),
                        LimitKind::Base,
                        &duty.duty_id,
                        month_days,
                    );
                }
                if let Some(limit) = duty.extended_fdp_hours {
                    push_limit_marker(
                        &mut limit_markers,
                        view,
                        span,
                        limit.value(),
                        LimitKind::Extended,
                        &duty.duty_id,
                        month_days,
                    );
                }
            }
            Err(err) => {
                warn!("skipping duty interval: {}", err);
                diagnostics.push(err.to_string());
            }
        }
    }

    let mut sleep_bars: Vec<SleepBar> = Vec::new();
    for duty in &roster.duties {
        if let Some(quality) = &duty.sleep_quality {
            let label = format!("{} sleep", duty.duty_id);
            for block in &quality.sleep_blocks {
                collect_sleep_bars(
                    &mut sleep_bars,
                    &mut diagnostics,
                    block,
                    &label,
                    false,
                    view,
                    month_days,
                );
            }
        }
    }
    for rest_day in &roster.rest_days_sleep {
        let label = match rest_day.date {
            Some(date) => format!("rest-day sleep {}", date),
            None => "rest-day sleep".to_string(),
        };
        for block in &rest_day.sleep_blocks {
            collect_sleep_bars(
                &mut sleep_bars,
                &mut diagnostics,
                block,
                &label,
                true,
                view,
                month_days,
            );
        }
    }

    let mut rest_bars: Vec<RestBar> = Vec::new();
    for duty in &roster.duties {
        let label = format!("{} in-flight rest", duty.duty_id);
        for block in &duty.inflight_rest_blocks {
            match coordinates::select_rest_span(block, &label, view) {
                Ok(span) => {
                    for seg in assign_view_span(view, span, month_days) {
                        rest_bars.push(RestBar {
                            duty_id: duty.duty_id.clone(),
                            row: seg.row,
                            start_hour: seg.start_hour,
                            end_hour: seg.end_hour,
                            continues: seg.continues,
                            effective_sleep_hours: block.effective_sleep_hours,
                            quality_factor: block.quality_factor,
                        });
                    }
                }
                Err(err) => {
                    warn!("skipping in-flight rest interval: {}", err);
                    diagnostics.push(err.to_string());
                }
            }
        }
    }

    // Sleep and rest fragments can arrive via more than one fallback path;
    // duty bars cannot collide by construction and are left alone.
    let sleep_bars = dedupe_bars(sleep_bars, params.dedup.tolerance_decimals);
    let rest_bars = dedupe_bars(rest_bars, params.dedup.tolerance_decimals);

    let phase_shifts = match view {
        ViewKind::Elapsed => accumulate_phase_shifts(&roster.duties, month_days, &params.adaptation),
        _ => Vec::new(),
    };

    let wocl_bands: Vec<WoclBand> = match view {
        ViewKind::HomeBase => {
            band_windows(params.wocl.start_hour, params.wocl.duration_hours, 0.0)
                .into_iter()
                .map(|(start_hour, end_hour)| WoclBand {
                    row: None,
                    start_hour,
                    end_hour,
                })
                .collect()
        }
        ViewKind::Utc => {
            // The window stays fixed to home-base clock time; on the UTC grid
            // that is the home window shifted by the zone offset at the epoch.
            let zone = roster.home_base_timezone.as_deref().unwrap_or("");
            let offset = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|epoch| utc_offset_hours(zone, epoch))
                .unwrap_or(0.0);
            band_windows(params.wocl.start_hour, params.wocl.duration_hours, -offset)
                .into_iter()
                .map(|(start_hour, end_hour)| WoclBand {
                    row: None,
                    start_hour,
                    end_hour,
                })
                .collect()
        }
        ViewKind::Elapsed => phase_shifts
            .iter()
            .flat_map(|sample| {
                let row = sample.day - 1;
                band_windows(
                    params.wocl.start_hour,
                    params.wocl.duration_hours,
                    sample.shift_hours,
                )
                .into_iter()
                .map(move |(start_hour, end_hour)| WoclBand {
                    row: Some(row),
                    start_hour,
                    end_hour,
                })
            })
            .collect(),
    };

    let total_rows = match view {
        ViewKind::HomeBase | ViewKind::Utc => month_days,
        ViewKind::Elapsed => {
            let mut last_row = month_days.saturating_sub(1);
            for row in duty_bars
                .iter()
                .map(|bar| bar.row)
                .chain(sleep_bars.iter().map(|bar| bar.row))
                .chain(rest_bars.iter().map(|bar| bar.row))
                .chain(limit_markers.iter().map(|marker| marker.row))
            {
                last_row = last_row.max(row);
            }
            last_row + 1
        }
    };

    let row_labels = build_row_labels(roster, view, year, month, total_rows, &duty_bars, params);

    let axis_label = match view {
        ViewKind::HomeBase => format!(
            "Home base time ({})",
            roster.home_base_timezone.as_deref().unwrap_or("local")
        ),
        ViewKind::Utc => "UTC".to_string(),
        ViewKind::Elapsed => "Elapsed hours since roster start".to_string(),
    };

    Ok(ChronogramData {
        view,
        axis_label,
        total_rows,
        duty_bars,
        sleep_bars,
        rest_bars,
        limit_markers,
        wocl_bands,
        phase_shifts,
        row_labels,
        diagnostics,
    })
}
