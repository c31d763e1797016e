#[cfg(test)]
mod tests {
    use crate::utils::{anchor, day, hours, offset};
    use chrono::Duration;
    use cohort_rules::MatchWindow;
    use cohort_rules::algorithm::infection::{Partition, classify};
    use cohort_rules::models::EventTime;

    fn window() -> MatchWindow {
        MatchWindow::default()
    }

    #[test]
    fn test_before_bound_is_closed() {
        let at_bound = classify(hours(0), hours(-72), &window()).unwrap();
        assert_eq!(at_bound.partition, Partition::Before);
        assert_eq!(at_bound.offset, Duration::hours(72));

        let past_bound = offset(-Duration::hours(72) - Duration::seconds(1));
        assert!(classify(hours(0), past_bound, &window()).is_none());
    }

    #[test]
    fn test_after_bound_is_closed() {
        let at_bound = classify(hours(0), hours(24), &window()).unwrap();
        assert_eq!(at_bound.partition, Partition::After);
        assert_eq!(at_bound.offset, Duration::hours(24));

        let past_bound = offset(Duration::hours(24) + Duration::seconds(1));
        assert!(classify(hours(0), past_bound, &window()).is_none());
    }

    #[test]
    fn test_one_second_after_is_after_partition() {
        let position = classify(hours(0), offset(Duration::seconds(1)), &window()).unwrap();
        assert_eq!(position.partition, Partition::After);
        assert!(!position.day_granularity);
    }

    #[test]
    fn test_date_only_candidate_uses_day_bounds() {
        for days_before in 1..=3 {
            let position = classify(hours(0), day(-days_before), &window()).unwrap();
            assert_eq!(position.partition, Partition::Before);
            assert_eq!(position.offset, Duration::days(days_before));
            assert!(position.day_granularity);
        }
        assert!(classify(hours(0), day(-4), &window()).is_none());

        let next_day = classify(hours(0), day(1), &window()).unwrap();
        assert_eq!(next_day.partition, Partition::After);
        assert_eq!(next_day.offset, Duration::days(1));
        assert!(classify(hours(0), day(2), &window()).is_none());
    }

    #[test]
    fn test_date_only_is_not_treated_as_midnight() {
        // T-3 days at midnight would be more than 72h before a noon anchor
        assert!(classify(hours(0), day(-3), &window()).is_some());
        assert!(
            classify(
                hours(0),
                EventTime::Timestamp(day(-3).as_datetime()),
                &window()
            )
            .is_none()
        );
    }

    #[test]
    fn test_same_date_falls_before() {
        let late_anchor = EventTime::Timestamp(anchor().date().and_hms_opt(23, 59, 0).unwrap());
        let position = classify(late_anchor, day(0), &window()).unwrap();
        assert_eq!(position.partition, Partition::Before);
        assert_eq!(position.offset, Duration::zero());
    }

    #[test]
    fn test_date_only_anchor_with_timestamp_candidate() {
        let late_next_day = EventTime::Timestamp(
            (anchor().date() + Duration::days(1))
                .and_hms_opt(23, 59, 59)
                .unwrap(),
        );
        let position = classify(day(0), late_next_day, &window()).unwrap();
        assert_eq!(position.partition, Partition::After);
        assert!(position.day_granularity);
    }

    #[test]
    fn test_configured_window_rounds_days_up() {
        let narrow = MatchWindow::from_hours(48, 12);
        assert_eq!(narrow.before_days, 2);
        assert_eq!(narrow.after_days, 1);
        assert!(classify(hours(0), hours(-49), &narrow).is_none());
        assert!(classify(hours(0), day(-2), &narrow).is_some());
        assert!(classify(hours(0), day(-3), &narrow).is_none());
    }
}
