// ============================================================================
// Roster analysis input records and JSON parsing
// ============================================================================
//
// These types mirror the JSON emitted by the upstream fatigue analysis.
// Every interval arrives with several candidate time representations (home-base
// day/hour pairs, canonical UTC instants, bare HH:MM clock strings); which one
// is trusted depends on the target view and is decided later, in the
// coordinate selector. Records are never mutated here.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn zero_hours() -> qtty::Hours {
    qtty::Hours::new(0.0)
}

fn default_quality_factor() -> f64 {
    1.0
}

/// Risk classification attached to a duty by the upstream model.
///
/// Ordered by severity so `max()` picks the worst level on a row.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Unknown,
    Low,
    Moderate,
    High,
    Critical,
    Extreme,
}

impl RiskLevel {
    /// Classify a performance score into a risk level.
    pub fn from_performance(performance: Option<f64>) -> Self {
        match performance {
            None => RiskLevel::Unknown,
            Some(p) if p >= 75.0 => RiskLevel::Low,
            Some(p) if p >= 65.0 => RiskLevel::Moderate,
            Some(p) if p >= 55.0 => RiskLevel::High,
            Some(p) if p >= 45.0 => RiskLevel::Critical,
            Some(_) => RiskLevel::Extreme,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskLevel::Unknown => "unknown",
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Extreme => "extreme",
        };
        write!(f, "{}", label)
    }
}

/// One flight leg inside a duty period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSegment {
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub departure: String,
    #[serde(default)]
    pub arrival: String,
    #[serde(default)]
    pub departure_day_utc: Option<u32>,
    #[serde(default)]
    pub departure_hour_utc: Option<f64>,
    #[serde(default)]
    pub arrival_day_utc: Option<u32>,
    #[serde(default)]
    pub arrival_hour_utc: Option<f64>,
}

/// Individual sleep period with timing and quality fields.
///
/// Primary day/hour pairs are expressed in the subject's home-base timezone;
/// `sleep_start_utc`/`sleep_end_utc` carry the canonical instants when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepBlock {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// HH:MM clock strings (home-base zone)
    #[serde(default)]
    pub sleep_start_time: Option<String>,
    #[serde(default)]
    pub sleep_end_time: Option<String>,
    /// Precomputed home-base (day, hour) pairs
    #[serde(default)]
    pub sleep_start_day: Option<u32>,
    #[serde(default)]
    pub sleep_start_hour: Option<f64>,
    #[serde(default)]
    pub sleep_end_day: Option<u32>,
    #[serde(default)]
    pub sleep_end_hour: Option<f64>,
    /// Canonical UTC instants (RFC 3339)
    #[serde(default)]
    pub sleep_start_utc: Option<String>,
    #[serde(default)]
    pub sleep_end_utc: Option<String>,
    #[serde(default = "zero_hours")]
    pub duration_hours: qtty::Hours,
    #[serde(default = "zero_hours")]
    pub effective_hours: qtty::Hours,
    #[serde(default = "default_quality_factor")]
    pub quality_factor: f64,
}

/// Sleep analysis attached to a duty (recovery sleep around that duty).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepQuality {
    #[serde(default)]
    pub sleep_blocks: Vec<SleepBlock>,
    #[serde(default = "zero_hours")]
    pub total_sleep_hours: qtty::Hours,
    #[serde(default = "zero_hours")]
    pub effective_sleep_hours: qtty::Hours,
    #[serde(default)]
    pub sleep_efficiency: f64,
}

/// Sleep pattern for a day without duties (or post-duty recovery).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestDaySleep {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub sleep_blocks: Vec<SleepBlock>,
    #[serde(default = "zero_hours")]
    pub total_sleep_hours: qtty::Hours,
    #[serde(default = "zero_hours")]
    pub effective_sleep_hours: qtty::Hours,
    #[serde(default)]
    pub sleep_efficiency: f64,
    #[serde(default)]
    pub strategy_type: String,
}

/// In-flight rest period taken by augmented crew during a duty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestBlock {
    /// Canonical UTC instants (RFC 3339)
    #[serde(default)]
    pub start_utc: Option<String>,
    #[serde(default)]
    pub end_utc: Option<String>,
    /// Precomputed home-base (day, hour) pairs
    #[serde(default)]
    pub start_day_home_tz: Option<u32>,
    #[serde(default)]
    pub start_hour_home_tz: Option<f64>,
    #[serde(default)]
    pub end_day_home_tz: Option<u32>,
    #[serde(default)]
    pub end_hour_home_tz: Option<f64>,
    /// HH:MM clock strings (home-base zone)
    #[serde(default)]
    pub start_home_tz: Option<String>,
    #[serde(default)]
    pub end_home_tz: Option<String>,
    #[serde(default = "zero_hours")]
    pub duration_hours: qtty::Hours,
    #[serde(default = "zero_hours")]
    pub effective_sleep_hours: qtty::Hours,
    #[serde(default = "default_quality_factor")]
    pub quality_factor: f64,
}

/// One duty period with its score fields and optional time representations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyRecord {
    pub duty_id: String,
    /// Calendar date of the duty (home-base zone)
    pub date: NaiveDate,
    #[serde(default)]
    pub duty_type: String,
    #[serde(default)]
    pub segments: Vec<FlightSegment>,

    /// Precomputed home-base (day, hour) pairs for report/release
    #[serde(default)]
    pub report_day: Option<u32>,
    #[serde(default)]
    pub report_hour: Option<f64>,
    #[serde(default)]
    pub release_day: Option<u32>,
    #[serde(default)]
    pub release_hour: Option<f64>,
    /// Canonical UTC instants (RFC 3339)
    #[serde(default)]
    pub report_time_utc: Option<String>,
    #[serde(default)]
    pub release_time_utc: Option<String>,
    /// HH:MM clock strings in an unspecified local zone
    #[serde(default)]
    pub report_time_local: Option<String>,
    #[serde(default)]
    pub release_time_local: Option<String>,

    #[serde(default = "zero_hours")]
    pub duty_hours: qtty::Hours,
    /// Base flight-duty-period limit; drives the limit marker
    #[serde(default)]
    pub max_fdp_hours: Option<qtty::Hours>,
    /// Extended limit under commander's discretion
    #[serde(default)]
    pub extended_fdp_hours: Option<qtty::Hours>,
    #[serde(default)]
    pub used_discretion: bool,

    #[serde(default)]
    pub min_performance: Option<f64>,
    #[serde(default)]
    pub avg_performance: Option<f64>,
    #[serde(default)]
    pub landing_performance: Option<f64>,
    #[serde(default)]
    pub risk_level: RiskLevel,

    /// This duty's own contribution to the circadian phase shift, in hours
    /// (signed; positive = eastward). Missing means "no shift induced".
    #[serde(default)]
    pub circadian_phase_shift: Option<f64>,
    #[serde(default)]
    pub prior_sleep: Option<qtty::Hours>,
    #[serde(default)]
    pub wocl_hours: Option<qtty::Hours>,
    #[serde(default)]
    pub sleep_debt: Option<qtty::Hours>,

    #[serde(default)]
    pub sleep_quality: Option<SleepQuality>,
    #[serde(default)]
    pub inflight_rest_blocks: Vec<RestBlock>,
}

/// Top-level roster analysis supplied by the upstream model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterAnalysis {
    #[serde(default)]
    pub analysis_id: String,
    #[serde(default)]
    pub pilot_id: String,
    /// Reference month ("YYYY-MM"); rows of the calendar grids index into it
    pub month: String,
    /// IANA identifier of the subject's home-base zone (e.g. "Asia/Qatar")
    #[serde(default)]
    pub home_base_timezone: Option<String>,
    /// SHA256 checksum of the analysis data
    #[serde(default)]
    pub checksum: String,
    #[serde(default)]
    pub duties: Vec<DutyRecord>,
    #[serde(default)]
    pub rest_days_sleep: Vec<RestDaySleep>,
}

impl RosterAnalysis {
    /// Reference (year, month) parsed from the month string.
    pub fn reference_month(&self) -> Option<(i32, u32)> {
        super::time::parse_month(&self.month)
    }

    /// Number of calendar days in the reference month.
    pub fn days_in_reference_month(&self) -> Option<u32> {
        self.reference_month()
            .map(|(y, m)| super::time::days_in_month(y, m))
            .filter(|d| *d > 0)
    }
}

fn validate_input_analysis(analysis_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(analysis_json).context("Invalid analysis JSON")?;
    let has_duties = value.as_object().and_then(|obj| obj.get("duties")).is_some();
    if !has_duties {
        anyhow::bail!("Missing required 'duties' field");
    }
    Ok(())
}

/// Parse a roster analysis from a JSON string.
///
/// Deserializes the upstream analysis JSON using Serde, verifies the
/// reference month, and computes a checksum when the input carries none.
/// Unknown fields are ignored: the upstream payload is far wider than what
/// the layout engine needs.
pub fn parse_analysis_json_str(analysis_json: &str) -> Result<RosterAnalysis> {
    validate_input_analysis(analysis_json)?;

    let mut analysis: RosterAnalysis = serde_json::from_str(analysis_json)
        .context("Failed to deserialize analysis JSON using Serde")?;

    if analysis.reference_month().is_none() {
        anyhow::bail!("Unparsable month '{}', expected YYYY-MM", analysis.month);
    }

    if analysis.checksum.is_empty() {
        analysis.checksum = compute_analysis_checksum(analysis_json);
    }

    Ok(analysis)
}

/// Compute a checksum for the analysis JSON
fn compute_analysis_checksum(json_str: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(json_str.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

// ============================================================================
// Tests
// ============================================================================
