//! Public API surface for the chronogram engine.
//!
//! This file consolidates the types a downstream renderer needs: the input
//! records, the per-view output DTOs, the engine parameters, and the
//! transform entry point. All DTO types derive Serialize/Deserialize for
//! JSON serialization.

pub use crate::views::chronogram::ChronogramData;
pub use crate::views::chronogram::DutyBar;
pub use crate::views::chronogram::DutyLimitMarker;
pub use crate::views::chronogram::LimitKind;
pub use crate::views::chronogram::PhaseShiftSample;
pub use crate::views::chronogram::RestBar;
pub use crate::views::chronogram::RowLabel;
pub use crate::views::chronogram::SleepBar;
pub use crate::views::chronogram::ViewKind;
pub use crate::views::chronogram::WoclBand;

pub use crate::models::roster::parse_analysis_json_str;
pub use crate::models::roster::DutyRecord;
pub use crate::models::roster::FlightSegment;
pub use crate::models::roster::RestBlock;
pub use crate::models::roster::RestDaySleep;
pub use crate::models::roster::RiskLevel;
pub use crate::models::roster::RosterAnalysis;
pub use crate::models::roster::SleepBlock;
pub use crate::models::roster::SleepQuality;
pub use crate::models::time::DayHour;

pub use crate::config::AdaptationRates;
pub use crate::config::ChronogramParams;
pub use crate::config::ConfigError;
pub use crate::config::WoclSettings;

pub use crate::services::chronogram::compute_chronogram_data;
pub use crate::services::chronogram::ChronogramError;
