#[cfg(test)]
mod tests {
    use crate::config::AdaptationRates;
    use crate::models::{DutyRecord, RiskLevel};
    use crate::services::phase::accumulate_phase_shifts;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn shift_duty(day: u32, shift: Option<f64>) -> DutyRecord {
        DutyRecord {
            duty_id: format!("D{}", day),
            date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            duty_type: String::new(),
            segments: vec![],
            report_day: None,
            report_hour: None,
            release_day: None,
            release_hour: None,
            report_time_utc: None,
            release_time_utc: None,
            report_time_local: None,
            release_time_local: None,
            duty_hours: qtty::Hours::new(0.0),
            max_fdp_hours: None,
            extended_fdp_hours: None,
            used_discretion: false,
            min_performance: None,
            avg_performance: None,
            landing_performance: None,
            risk_level: RiskLevel::Unknown,
            circadian_phase_shift: shift,
            prior_sleep: None,
            wocl_hours: None,
            sleep_debt: None,
            sleep_quality: None,
            inflight_rest_blocks: vec![],
        }
    }

    fn rates() -> AdaptationRates {
        AdaptationRates {
            westward_hours_per_day: 1.5,
            eastward_hours_per_day: 1.0,
            max_shift_hours: 12.0,
        }
    }

    fn sample(samples: &[crate::views::PhaseShiftSample], day: u32) -> f64 {
        samples[(day - 1) as usize].shift_hours
    }

    #[test]
    fn test_empty_duties_all_zero() {
        let samples = accumulate_phase_shifts(&[], 28, &rates());
        assert_eq!(samples.len(), 28);
        assert!(samples.iter().all(|s| s.shift_hours == 0.0));
        assert_eq!(samples[0].day, 1);
        assert_eq!(samples[27].day, 28);
    }

    #[test]
    fn test_eastward_shift_decays_at_westward_rate() {
        // +2.0h eastward on day 5, next duty day 9: three full rest days decay
        // the shift to zero before the day-9 contribution is added
        let duties = vec![shift_duty(5, Some(2.0)), shift_duty(9, Some(-1.0))];
        let samples = accumulate_phase_shifts(&duties, 28, &rates());

        assert_eq!(sample(&samples, 5), 2.0);
        assert!((sample(&samples, 6) - 0.5).abs() < 1e-9);
        assert_eq!(sample(&samples, 7), 0.0);
        assert_eq!(sample(&samples, 8), 0.0);
        assert_eq!(sample(&samples, 9), -1.0);
    }

    #[test]
    fn test_days_before_first_duty_hold_zero() {
        let duties = vec![shift_duty(10, Some(3.0))];
        let samples = accumulate_phase_shifts(&duties, 28, &rates());
        for day in 1..10 {
            assert_eq!(sample(&samples, day), 0.0);
        }
        assert_eq!(sample(&samples, 10), 3.0);
    }

    #[test]
    fn test_trailing_days_keep_decaying() {
        let duties = vec![shift_duty(25, Some(4.0))];
        let samples = accumulate_phase_shifts(&duties, 28, &rates());
        assert_eq!(sample(&samples, 25), 4.0);
        assert!((sample(&samples, 26) - 2.5).abs() < 1e-9);
        assert!((sample(&samples, 27) - 1.0).abs() < 1e-9);
        assert_eq!(sample(&samples, 28), 0.0);
    }

    #[test]
    fn test_westward_shift_decays_at_eastward_rate() {
        let duties = vec![shift_duty(2, Some(-3.0))];
        let samples = accumulate_phase_shifts(&duties, 8, &rates());
        assert_eq!(sample(&samples, 2), -3.0);
        assert!((sample(&samples, 3) + 2.0).abs() < 1e-9);
        assert!((sample(&samples, 4) + 1.0).abs() < 1e-9);
        assert_eq!(sample(&samples, 5), 0.0);
        assert_eq!(sample(&samples, 6), 0.0, "decay never overshoots zero");
    }

    #[test]
    fn test_shift_clamped_to_bound() {
        let duties = vec![shift_duty(3, Some(20.0))];
        let samples = accumulate_phase_shifts(&duties, 10, &rates());
        assert_eq!(sample(&samples, 3), 12.0);

        let duties = vec![shift_duty(3, Some(8.0)), shift_duty(4, Some(8.0))];
        let samples = accumulate_phase_shifts(&duties, 10, &rates());
        assert_eq!(sample(&samples, 4), 12.0);
    }

    #[test]
    fn test_missing_contribution_is_zero_not_skip() {
        // the duty still participates in the scan; the gap before it decays
        let duties = vec![shift_duty(2, Some(4.0)), shift_duty(5, None)];
        let samples = accumulate_phase_shifts(&duties, 10, &rates());
        assert!((sample(&samples, 3) - 2.5).abs() < 1e-9);
        assert!((sample(&samples, 4) - 1.0).abs() < 1e-9);
        assert_eq!(sample(&samples, 5), 0.0);
    }

    #[test]
    fn test_same_day_duties_accumulate_without_decay() {
        let duties = vec![shift_duty(6, Some(1.5)), shift_duty(6, Some(2.0))];
        let samples = accumulate_phase_shifts(&duties, 10, &rates());
        assert!((sample(&samples, 6) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_date() {
        let duties = vec![shift_duty(9, Some(-1.0)), shift_duty(5, Some(2.0))];
        let samples = accumulate_phase_shifts(&duties, 28, &rates());
        assert_eq!(sample(&samples, 5), 2.0);
        assert_eq!(sample(&samples, 9), -1.0);
    }

    #[test]
    fn test_duty_outside_month_ignored() {
        let duties = vec![shift_duty(20, Some(2.0))];
        let samples = accumulate_phase_shifts(&duties, 10, &rates());
        assert!(samples.iter().all(|s| s.shift_hours == 0.0));
    }

    proptest! {
        #[test]
        fn prop_shift_always_within_clamp(
            contributions in proptest::collection::vec((1u32..29, -30.0f64..30.0), 0..12),
        ) {
            let duties: Vec<_> = contributions
                .iter()
                .map(|(day, shift)| shift_duty(*day, Some(*shift)))
                .collect();
            let samples = accumulate_phase_shifts(&duties, 28, &rates());
            prop_assert_eq!(samples.len(), 28);
            for s in &samples {
                prop_assert!(s.shift_hours >= -12.0 && s.shift_hours <= 12.0);
            }
        }
    }
}
