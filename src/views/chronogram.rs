use serde::{Deserialize, Serialize};

use crate::models::RiskLevel;

// =========================================================
// Chronogram view types
// =========================================================

/// Which calendar grid a transform targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Rows are calendar days in the subject's home timezone
    HomeBase,
    /// Rows are calendar days in UTC
    Utc,
    /// Rows are consecutive 24-hour blocks from the roster's start
    Elapsed,
}

/// One row-local duty fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyBar {
    pub duty_id: String,
    pub row: u32,
    /// 0.0..=24.0; `end_hour == 24` with `continues` set means the duty
    /// touches midnight and more follows in the next row
    pub start_hour: f64,
    pub end_hour: f64,
    pub continues: bool,
    pub risk_level: RiskLevel,
    pub avg_performance: Option<f64>,
    pub duty_hours: qtty::Hours,
}

/// One row-local sleep fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepBar {
    pub row: u32,
    pub start_hour: f64,
    pub end_hour: f64,
    pub continues: bool,
    pub effective_hours: qtty::Hours,
    pub quality_factor: f64,
    /// True when the fragment came from a rest-day record rather than a
    /// duty-attached one
    pub from_rest_day: bool,
    /// Which record produced the fragment, for tooltips
    pub source: String,
}

/// One row-local in-flight rest fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestBar {
    pub duty_id: String,
    pub row: u32,
    pub start_hour: f64,
    pub end_hour: f64,
    pub continues: bool,
    pub effective_sleep_hours: qtty::Hours,
    pub quality_factor: f64,
}

/// Which duty-length limit a marker denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitKind {
    /// Base flight-duty-period limit
    Base,
    /// Extended limit under commander's discretion
    Extended,
}

/// Vertical marker at the maximum permitted duty length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyLimitMarker {
    pub duty_id: String,
    pub row: u32,
    pub hour: f64,
    pub kind: LimitKind,
}

/// Low-alertness (WOCL) band.
///
/// `row == None` is a static band applying to every row of the grid; a
/// phase-shifted band carries the single row it decorates. A window that
/// wraps midnight is emitted as two bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WoclBand {
    pub row: Option<u32>,
    pub start_hour: f64,
    pub end_hour: f64,
}

/// Accumulated circadian shift applicable to one row, elapsed view only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseShiftSample {
    /// Day of month, 1-based
    pub day: u32,
    /// Signed hours; positive = eastward
    pub shift_hours: f64,
}

/// Label for one grid row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowLabel {
    pub row: u32,
    pub text: String,
    pub has_duty: bool,
    /// Worst risk level among the duties on this row
    pub risk_level: RiskLevel,
    pub warnings: Vec<String>,
}

/// Complete layout for one view. Identical in shape across the three views,
/// differing only in coordinate interpretation and axis label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronogramData {
    pub view: ViewKind,
    pub axis_label: String,
    pub total_rows: u32,
    pub duty_bars: Vec<DutyBar>,
    pub sleep_bars: Vec<SleepBar>,
    pub rest_bars: Vec<RestBar>,
    pub limit_markers: Vec<DutyLimitMarker>,
    pub wocl_bands: Vec<WoclBand>,
    /// Populated for the elapsed view, empty otherwise
    pub phase_shifts: Vec<PhaseShiftSample>,
    pub row_labels: Vec<RowLabel>,
    /// Human-readable reasons for intervals that could not be placed
    pub diagnostics: Vec<String>,
}
