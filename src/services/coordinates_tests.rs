#[cfg(test)]
mod tests {
    use crate::models::{DutyRecord, RestBlock, RiskLevel, SleepBlock};
    use crate::services::coordinates::{
        select_duty_span, select_rest_span, select_sleep_span, SelectError,
    };
    use crate::views::ViewKind;
    use chrono::NaiveDate;

    fn base_duty(id: &str, day: u32) -> DutyRecord {
        DutyRecord {
            duty_id: id.to_string(),
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
            circadian_phase_shift: None,
            prior_sleep: None,
            wocl_hours: None,
            sleep_debt: None,
            sleep_quality: None,
            inflight_rest_blocks: vec![],
        }
    }

    fn base_sleep_block() -> SleepBlock {
        SleepBlock {
            date: None,
            sleep_start_time: None,
            sleep_end_time: None,
            sleep_start_day: None,
            sleep_start_hour: None,
            sleep_end_day: None,
            sleep_end_hour: None,
            sleep_start_utc: None,
            sleep_end_utc: None,
            duration_hours: qtty::Hours::new(0.0),
            effective_hours: qtty::Hours::new(0.0),
            quality_factor: 1.0,
        }
    }

    fn base_rest_block() -> RestBlock {
        RestBlock {
            start_utc: None,
            end_utc: None,
            start_day_home_tz: None,
            start_hour_home_tz: None,
            end_day_home_tz: None,
            end_hour_home_tz: None,
            start_home_tz: None,
            end_home_tz: None,
            duration_hours: qtty::Hours::new(0.0),
            effective_sleep_hours: qtty::Hours::new(0.0),
            quality_factor: 1.0,
        }
    }

    #[test]
    fn test_home_base_uses_precomputed_pair() {
        let mut duty = base_duty("D1", 3);
        duty.report_day = Some(3);
        duty.report_hour = Some(6.5);
        duty.release_day = Some(3);
        duty.release_hour = Some(14.0);

        let span = select_duty_span(&duty, ViewKind::HomeBase).unwrap();
        assert_eq!(span.start.day, 3);
        assert_eq!(span.start.hour, 6.5);
        assert_eq!(span.end.hour, 14.0);
    }

    #[test]
    fn test_home_base_never_reconstructs_from_utc() {
        // UTC instants alone are not good enough for the ground-truth grid
        let mut duty = base_duty("D2", 3);
        duty.report_time_utc = Some("2026-02-03T03:30:00+00:00".to_string());
        duty.release_time_utc = Some("2026-02-03T11:00:00+00:00".to_string());

        let err = select_duty_span(&duty, ViewKind::HomeBase).unwrap_err();
        assert!(matches!(err, SelectError::MissingRepresentation { .. }));
        assert!(err.to_string().contains("D2"));
    }

    #[test]
    fn test_home_base_partial_pair_is_missing() {
        let mut duty = base_duty("D3", 3);
        duty.report_day = Some(3);
        duty.report_hour = Some(6.5);
        // release pair absent: representations are never partially mixed
        assert!(select_duty_span(&duty, ViewKind::HomeBase).is_err());
    }

    #[test]
    fn test_utc_view_prefers_utc_instants() {
        let mut duty = base_duty("D4", 3);
        // 01:30+03:00 is 22:30 UTC the previous day
        duty.report_time_utc = Some("2026-02-03T01:30:00+03:00".to_string());
        duty.release_time_utc = Some("2026-02-03T09:30:00+03:00".to_string());
        duty.report_day = Some(3);
        duty.report_hour = Some(1.5);
        duty.release_day = Some(3);
        duty.release_hour = Some(9.5);

        let span = select_duty_span(&duty, ViewKind::Utc).unwrap();
        assert_eq!(span.start.day, 2);
        assert!((span.start.hour - 22.5).abs() < 1e-9);
        assert_eq!(span.end.day, 3);
        assert!((span.end.hour - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_utc_view_falls_back_to_pair() {
        let mut duty = base_duty("D5", 3);
        duty.report_day = Some(3);
        duty.report_hour = Some(6.5);
        duty.release_day = Some(3);
        duty.release_hour = Some(14.0);

        let span = select_duty_span(&duty, ViewKind::Utc).unwrap();
        assert_eq!(span.start.day, 3);
        assert_eq!(span.start.hour, 6.5);
    }

    #[test]
    fn test_utc_view_malformed_instant_falls_back_to_pair() {
        let mut duty = base_duty("D6", 3);
        duty.report_time_utc = Some("yesterday-ish".to_string());
        duty.release_time_utc = Some("2026-02-03T11:00:00+00:00".to_string());
        duty.report_day = Some(3);
        duty.report_hour = Some(6.5);
        duty.release_day = Some(3);
        duty.release_hour = Some(14.0);

        let span = select_duty_span(&duty, ViewKind::Utc).unwrap();
        assert_eq!(span.start.hour, 6.5, "should have used the pair");
    }

    #[test]
    fn test_utc_view_malformed_instant_without_fallback() {
        let mut duty = base_duty("D7", 3);
        duty.report_time_utc = Some("yesterday-ish".to_string());
        duty.release_time_utc = Some("2026-02-03T11:00:00+00:00".to_string());

        let err = select_duty_span(&duty, ViewKind::Utc).unwrap_err();
        assert!(matches!(err, SelectError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_elapsed_prefers_home_pair() {
        let mut duty = base_duty("D8", 3);
        duty.report_day = Some(3);
        duty.report_hour = Some(6.5);
        duty.release_day = Some(3);
        duty.release_hour = Some(14.0);
        duty.report_time_utc = Some("2026-02-03T03:30:00+00:00".to_string());
        duty.release_time_utc = Some("2026-02-03T11:00:00+00:00".to_string());

        let span = select_duty_span(&duty, ViewKind::Elapsed).unwrap();
        assert_eq!(span.start.hour, 6.5, "home pair outranks UTC instants");
    }

    #[test]
    fn test_elapsed_falls_back_to_utc_then_clock() {
        let mut duty = base_duty("D9", 3);
        duty.report_time_utc = Some("2026-02-03T03:30:00+00:00".to_string());
        duty.release_time_utc = Some("2026-02-03T11:00:00+00:00".to_string());
        let span = select_duty_span(&duty, ViewKind::Elapsed).unwrap();
        assert!((span.start.hour - 3.5).abs() < 1e-9);

        let mut duty = base_duty("D10", 3);
        duty.report_time_local = Some("08:15".to_string());
        duty.release_time_local = Some("17:45".to_string());
        let span = select_duty_span(&duty, ViewKind::Elapsed).unwrap();
        assert_eq!(span.start.day, 3);
        assert!((span.start.hour - 8.25).abs() < 1e-9);
        assert_eq!(span.end.day, 3);
        assert!((span.end.hour - 17.75).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_clock_wraps_to_next_day() {
        let mut duty = base_duty("D11", 3);
        duty.report_time_local = Some("22:00".to_string());
        duty.release_time_local = Some("06:00".to_string());

        let span = select_duty_span(&duty, ViewKind::Elapsed).unwrap();
        assert_eq!(span.start.day, 3);
        assert_eq!(span.end.day, 4);
        assert_eq!(span.end.hour, 6.0);
    }

    #[test]
    fn test_elapsed_nothing_usable() {
        let duty = base_duty("D12", 3);
        let err = select_duty_span(&duty, ViewKind::Elapsed).unwrap_err();
        assert!(err.to_string().contains("elapsed"));
    }

    #[test]
    fn test_sleep_home_base_pair_only() {
        let mut block = base_sleep_block();
        block.sleep_start_utc = Some("2026-02-03T22:00:00+00:00".to_string());
        block.sleep_end_utc = Some("2026-02-04T06:00:00+00:00".to_string());
        assert!(select_sleep_span(&block, "night sleep", ViewKind::HomeBase).is_err());

        block.sleep_start_day = Some(3);
        block.sleep_start_hour = Some(23.0);
        block.sleep_end_day = Some(4);
        block.sleep_end_hour = Some(7.0);
        let span = select_sleep_span(&block, "night sleep", ViewKind::HomeBase).unwrap();
        assert_eq!(span.start.hour, 23.0);
    }

    #[test]
    fn test_sleep_elapsed_clock_fallback_needs_date() {
        let mut block = base_sleep_block();
        block.sleep_start_time = Some("23:00".to_string());
        block.sleep_end_time = Some("07:00".to_string());
        assert!(
            select_sleep_span(&block, "night sleep", ViewKind::Elapsed).is_err(),
            "clock strings alone have no calendar anchor"
        );

        block.date = NaiveDate::from_ymd_opt(2026, 2, 3);
        let span = select_sleep_span(&block, "night sleep", ViewKind::Elapsed).unwrap();
        assert_eq!(span.start.day, 3);
        assert_eq!(span.end.day, 4);
    }

    #[test]
    fn test_rest_block_chains() {
        let mut block = base_rest_block();
        block.start_utc = Some("2026-02-10T08:00:00+00:00".to_string());
        block.end_utc = Some("2026-02-10T10:00:00+00:00".to_string());

        assert!(select_rest_span(&block, "D1 rest", ViewKind::HomeBase).is_err());
        let span = select_rest_span(&block, "D1 rest", ViewKind::Utc).unwrap();
        assert_eq!(span.start.day, 10);
        assert_eq!(span.start.hour, 8.0);

        block.start_day_home_tz = Some(10);
        block.start_hour_home_tz = Some(11.0);
        block.end_day_home_tz = Some(10);
        block.end_hour_home_tz = Some(13.0);
        let span = select_rest_span(&block, "D1 rest", ViewKind::HomeBase).unwrap();
        assert_eq!(span.start.hour, 11.0);

        // elapsed prefers the home pair over the instants
        let span = select_rest_span(&block, "D1 rest", ViewKind::Elapsed).unwrap();
        assert_eq!(span.start.hour, 11.0);
    }

    #[test]
    fn test_rest_block_has_no_clock_anchor() {
        let mut block = base_rest_block();
        block.start_home_tz = Some("08:00".to_string());
        block.end_home_tz = Some("10:00".to_string());
        assert!(select_rest_span(&block, "D1 rest", ViewKind::Elapsed).is_err());
    }
}
