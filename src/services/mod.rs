//! Layout computation services.
//!
//! This module contains the layout engine proper: interval splitting,
//! coordinate selection, circadian phase tracking, deduplication, and the
//! per-view orchestrator that composes them into a `ChronogramData`.

pub mod chronogram;

pub mod coordinates;

pub mod dedup;

pub mod phase;

pub mod splitter;

pub mod tz_offset;

#[cfg(test)]
mod coordinates_tests;
#[cfg(test)]
mod phase_tests;

pub use chronogram::compute_chronogram_data;
pub use dedup::dedupe_bars;
pub use phase::accumulate_phase_shifts;
pub use splitter::{assign_day_span, split_elapsed_span, split_row_interval};
pub use tz_offset::utc_offset_hours;
