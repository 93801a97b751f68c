//! Deduplication of positionally identical bars.
//!
//! The same recovery interval can reach the layout through more than one
//! source (a rest-day record and a duty-attached record describing the same
//! sleep); without this pass the same visual bar would render twice. Two
//! bars are duplicates iff they share a row and their start/end hours match
//! when rounded to a fixed number of decimal places.

use std::collections::HashSet;

use crate::views::{RestBar, SleepBar};

/// Positional identity of a bar fragment.
pub trait BarPosition {
    fn row(&self) -> u32;
    fn start_hour(&self) -> f64;
    fn end_hour(&self) -> f64;
}

impl BarPosition for SleepBar {
    fn row(&self) -> u32 {
        self.row
    }
    fn start_hour(&self) -> f64 {
        self.start_hour
    }
    fn end_hour(&self) -> f64 {
        self.end_hour
    }
}

impl BarPosition for RestBar {
    fn row(&self) -> u32 {
        self.row
    }
    fn start_hour(&self) -> f64 {
        self.start_hour
    }
    fn end_hour(&self) -> f64 {
        self.end_hour
    }
}

fn position_key<B: BarPosition>(bar: &B, decimals: u32) -> String {
    let precision = decimals as usize;
    format!(
        "{}|{:.prec$}|{:.prec$}",
        bar.row(),
        bar.start_hour(),
        bar.end_hour(),
        prec = precision
    )
}

/// Drop bars whose rounded position was already seen; first occurrence wins.
///
/// O(n) over a set of rounded keys; idempotent by construction.
pub fn dedupe_bars<B: BarPosition>(bars: Vec<B>, decimals: u32) -> Vec<B> {
    let mut seen = HashSet::with_capacity(bars.len());
    bars.into_iter()
        .filter(|bar| seen.insert(position_key(bar, decimals)))
        .collect()
}
