#[cfg(test)]
mod tests {
    use crate::utils::{ENCOUNTER, anchor, day, hours, specimen, systemic};
    use chrono::{Duration, NaiveDateTime};
    use cohort_rules::MatchWindow;
    use cohort_rules::algorithm::infection::{InfectionMatch, match_encounter};
    use cohort_rules::algorithm::sepsis::{SepsisCriteria, SepsisRecord, classify_encounter};
    use cohort_rules::models::{AdministrationEvent, OrganDysfunctionTimeline, SpecimenEvent};
    use cohort_rules::{EngineConfig, ScoringEngine};

    fn at(hours: i64) -> NaiveDateTime {
        anchor() + Duration::hours(hours)
    }

    fn timeline(points: &[(i64, i32)]) -> OrganDysfunctionTimeline {
        OrganDysfunctionTimeline::new(points.iter().map(|(h, s)| (at(*h), *s)).collect())
    }

    fn matches(
        administrations: &[AdministrationEvent],
        specimens: &[SpecimenEvent],
    ) -> Vec<InfectionMatch> {
        match_encounter(administrations, specimens, &MatchWindow::default())
    }

    fn classify(matches: &[InfectionMatch], scores: &OrganDysfunctionTimeline) -> SepsisRecord {
        classify_encounter(ENCOUNTER, matches, scores, &SepsisCriteria::default())
    }

    /// Two suspicion episodes: onset at -1h and at +118h
    fn two_episodes() -> Vec<InfectionMatch> {
        matches(
            &[systemic(10, hours(0)), systemic(11, hours(120))],
            &[specimen(1, hours(-1)), specimen(2, hours(118))],
        )
    }

    #[test]
    fn test_no_suspicion_means_no_sepsis() {
        let record = classify(&[], &timeline(&[(0, 4)]));
        assert!(!record.suspected_infection());
        assert!(!record.sepsis());
        assert_eq!(record.onset(), None);
        assert_eq!(record.organ_score(), None);
        assert_eq!(record.candidates(), 0);

        let unmatched = matches(&[systemic(10, hours(0))], &[]);
        assert!(!classify(&unmatched, &timeline(&[(0, 4)])).sepsis());
    }

    #[test]
    fn test_missing_score_uses_baseline() {
        let pairs = matches(&[systemic(10, hours(0))], &[specimen(1, hours(-2))]);
        let record = classify(&pairs, &OrganDysfunctionTimeline::default());
        assert!(record.suspected_infection());
        assert_eq!(record.onset(), Some(at(-2)));
        assert_eq!(record.organ_score(), Some(0));
        assert!(record.organ_score_imputed());
        assert!(!record.sepsis());

        let high_baseline = SepsisCriteria {
            baseline: 2,
            ..SepsisCriteria::default()
        };
        let record = classify_encounter(
            ENCOUNTER,
            &pairs,
            &OrganDysfunctionTimeline::default(),
            &high_baseline,
        );
        assert!(record.organ_score_imputed());
        assert!(record.sepsis());
    }

    #[test]
    fn test_score_window_is_closed() {
        let pairs = matches(&[systemic(10, hours(0))], &[specimen(1, hours(0))]);
        assert!(classify(&pairs, &timeline(&[(-48, 2)])).sepsis());
        assert!(classify(&pairs, &timeline(&[(24, 2)])).sepsis());

        let outside = classify(&pairs, &timeline(&[(-49, 5), (25, 5)]));
        assert!(!outside.sepsis());
        assert!(outside.organ_score_imputed());
    }

    #[test]
    fn test_worst_score_in_window_is_used() {
        let pairs = matches(&[systemic(10, hours(0))], &[specimen(1, hours(-1))]);
        let record = classify(&pairs, &timeline(&[(-10, 1), (0, 3), (10, 0)]));
        assert_eq!(record.organ_score(), Some(3));
        assert!(!record.organ_score_imputed());
        assert!(record.sepsis());
    }

    #[test]
    fn test_later_candidate_can_qualify() {
        let record = classify(&two_episodes(), &timeline(&[(0, 0), (119, 3)]));
        assert!(record.sepsis());
        assert_eq!(record.onset(), Some(at(118)));
        assert_eq!(record.administration_id(), Some(11));
        assert_eq!(record.specimen_id(), Some(2));
        assert_eq!(record.candidates(), 2);
    }

    #[test]
    fn test_earliest_candidate_reported_when_none_qualifies() {
        let record = classify(&two_episodes(), &timeline(&[(0, 0), (119, 1)]));
        assert!(!record.sepsis());
        assert_eq!(record.onset(), Some(at(-1)));
        assert_eq!(record.organ_score(), Some(0));
        assert!(!record.organ_score_imputed());
    }

    #[test]
    fn test_earliest_qualifying_candidate_wins() {
        let record = classify(&two_episodes(), &timeline(&[(0, 2), (119, 4)]));
        assert!(record.sepsis());
        assert_eq!(record.onset(), Some(at(-1)));
        assert_eq!(record.administration_id(), Some(10));
    }

    #[test]
    fn test_date_only_onset_resolves_to_midnight() {
        let pairs = matches(&[systemic(10, hours(0))], &[specimen(1, day(-1))]);
        let record = classify(&pairs, &OrganDysfunctionTimeline::default());
        assert!(record.onset_date_only());
        assert_eq!(record.onset(), Some(day(-1).as_datetime()));
    }

    #[test]
    fn test_time_resolved_onset_precedes_date_only_onset_on_same_day() {
        // 11 pairs with the date-only culture (onset on day 0, no time),
        // 12 with the 13:00 culture
        let pairs = matches(
            &[systemic(11, hours(0)), systemic(12, hours(2))],
            &[specimen(1, day(0)), specimen(2, hours(1))],
        );
        let record = classify(&pairs, &OrganDysfunctionTimeline::default());
        assert_eq!(record.candidates(), 2);
        assert_eq!(record.administration_id(), Some(12));
        assert_eq!(record.specimen_id(), Some(2));
        assert_eq!(record.onset(), Some(at(1)));
        assert!(!record.onset_date_only());
    }

    #[test]
    fn test_oversized_windows_do_not_overflow() {
        let pairs = matches(&[systemic(10, hours(0))], &[specimen(1, hours(-1))]);
        let unbounded = SepsisCriteria {
            window_before: Duration::MAX,
            window_after: Duration::MAX,
            ..SepsisCriteria::default()
        };
        let record = classify_encounter(ENCOUNTER, &pairs, &timeline(&[(-5000, 3)]), &unbounded);
        assert_eq!(record.organ_score(), Some(3));
        assert!(record.sepsis());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let pairs = two_episodes();
        let scores = timeline(&[(0, 1), (119, 3)]);
        assert_eq!(classify(&pairs, &scores), classify(&pairs, &scores));
    }

    #[test]
    fn test_engine_threshold_is_configurable() {
        let encounter = crate::utils::bundle(Some(70))
            .with_administrations(vec![systemic(10, hours(1))])
            .with_specimens(vec![specimen(1, hours(0))])
            .with_organ_scores(timeline(&[(2, 3)]));

        let default_engine = ScoringEngine::new(EngineConfig::default()).unwrap();
        assert!(default_engine.evaluate(&encounter).sepsis.sepsis());

        let strict = ScoringEngine::new(EngineConfig::default().with_organ_threshold(4)).unwrap();
        assert!(!strict.evaluate(&encounter).sepsis.sepsis());
    }
}
