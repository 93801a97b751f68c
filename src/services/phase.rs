//! Circadian phase-shift accumulation.
//!
//! The subject's body clock drifts as duties carry them across time zones
//! and drifts back toward home-base time during rest. The accumulated shift
//! decides where the low-alertness band sits on each row of the elapsed
//! view.
//!
//! The accumulation is a pure left-fold over duties in ascending date order
//! and must not be reordered: each day's sample depends on the one before
//! it. Westward adaptation (phase delay) is faster than eastward (phase
//! advance), so positive (eastward) shift decays at the westward rate and
//! vice versa.

use chrono::Datelike;

use crate::config::AdaptationRates;
use crate::models::DutyRecord;
use crate::views::PhaseShiftSample;

/// One day of drift back toward zero.
fn decay_one_day(shift: f64, rates: &AdaptationRates) -> f64 {
    if shift > 0.0 {
        (shift - rates.westward_hours_per_day).max(0.0)
    } else if shift < 0.0 {
        (shift + rates.eastward_hours_per_day).min(0.0)
    } else {
        0.0
    }
}

/// Fold the duty sequence into one phase-shift sample per roster day.
///
/// Every day in `1..=total_days` gets a defined sample: days before the
/// first duty hold 0, rest days between duties decay day-by-day, duty days
/// add the duty's own contribution (missing contribution counts as 0 — the
/// duty is still processed), and days after the last duty keep decaying.
/// The accumulated shift is clamped to ± `rates.max_shift_hours` after each
/// contribution. An empty duty sequence leaves every sample at 0.
pub fn accumulate_phase_shifts(
    duties: &[DutyRecord],
    total_days: u32,
    rates: &AdaptationRates,
) -> Vec<PhaseShiftSample> {
    let mut samples: Vec<PhaseShiftSample> = (1..=total_days)
        .map(|day| PhaseShiftSample {
            day,
            shift_hours: 0.0,
        })
        .collect();
    if total_days == 0 {
        return samples;
    }

    let mut ordered: Vec<&DutyRecord> = duties.iter().collect();
    ordered.sort_by_key(|duty| duty.date);

    let mut shift = 0.0_f64;
    let mut prev_day: Option<u32> = None;

    for duty in ordered {
        let day = duty.date.day();
        if day > total_days {
            continue;
        }

        if let Some(prev) = prev_day {
            // rest days between duties decay toward zero, one day at a time
            for rest_day in prev + 1..day {
                shift = decay_one_day(shift, rates);
                samples[(rest_day - 1) as usize].shift_hours = shift;
            }
        }

        let contribution = duty.circadian_phase_shift.unwrap_or(0.0);
        shift = (shift + contribution).clamp(-rates.max_shift_hours, rates.max_shift_hours);
        samples[(day - 1) as usize].shift_hours = shift;
        prev_day = Some(day);
    }

    if let Some(last) = prev_day {
        for day in last + 1..=total_days {
            shift = decay_one_day(shift, rates);
            samples[(day - 1) as usize].shift_hours = shift;
        }
    }

    samples
}
