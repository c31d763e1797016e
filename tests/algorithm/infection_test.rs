#[cfg(test)]
mod tests {
    use crate::utils::{ENCOUNTER, administration, anchor, day, hours, specimen, systemic};
    use cohort_rules::MatchWindow;
    use cohort_rules::algorithm::infection::{MatchDirection, match_administration, match_encounter};
    use cohort_rules::models::{CulturePolarity, SpecimenEvent};

    #[test]
    fn test_before_specimen_wins_over_closer_after_specimen() {
        let specimens = [specimen(1, hours(1)), specimen(2, hours(-70))];
        let pair = match_administration(&systemic(10, hours(0)), &specimens, &MatchWindow::default())
            .unwrap();
        assert_eq!(pair.specimen_id, 2);
        assert_eq!(pair.direction, MatchDirection::Before);
        assert_eq!(pair.suspected_infection_time(), hours(-70));
    }

    #[test]
    fn test_earliest_specimen_within_partition() {
        let before = [specimen(1, hours(-10)), specimen(2, hours(-50))];
        let pair =
            match_administration(&systemic(10, hours(0)), &before, &MatchWindow::default()).unwrap();
        assert_eq!(pair.specimen_id, 2);

        let after = [specimen(3, hours(20)), specimen(4, hours(2))];
        let pair =
            match_administration(&systemic(10, hours(0)), &after, &MatchWindow::default()).unwrap();
        assert_eq!(pair.specimen_id, 4);
        assert_eq!(pair.direction, MatchDirection::After);
        assert_eq!(pair.suspected_infection_time(), hours(0));
    }

    #[test]
    fn test_equal_times_break_ties_by_id() {
        let specimens = [specimen(7, hours(-5)), specimen(3, hours(-5))];
        let pair =
            match_administration(&systemic(10, hours(0)), &specimens, &MatchWindow::default())
                .unwrap();
        assert_eq!(pair.specimen_id, 3);
    }

    #[test]
    fn test_time_resolved_specimen_precedes_date_only_on_same_day() {
        let specimens = [specimen(1, day(-1)), specimen(2, hours(-20))];
        let pair =
            match_administration(&systemic(10, hours(0)), &specimens, &MatchWindow::default())
                .unwrap();
        assert_eq!(pair.specimen_id, 2);
        assert!(!pair.day_granularity);
    }

    #[test]
    fn test_date_only_specimen_on_administration_day_is_before() {
        let specimens = [specimen(1, day(0)), specimen(2, hours(1))];
        let pair =
            match_administration(&systemic(10, hours(0)), &specimens, &MatchWindow::default())
                .unwrap();
        assert_eq!(pair.specimen_id, 1);
        assert_eq!(pair.direction, MatchDirection::Before);
        assert!(pair.day_granularity);
        assert_eq!(pair.suspected_infection_time(), day(0));
        assert_eq!(
            pair.suspected_infection_instant(),
            anchor().date().and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_topical_and_unclassified_routes_are_ineligible() {
        let specimens = [specimen(1, hours(-1))];
        let administrations = [
            administration(10, "OU", hours(0)),
            administration(11, "INHALATION", hours(0)),
            administration(12, "IV", hours(0)),
        ];
        let matches = match_encounter(&administrations, &specimens, &MatchWindow::default());
        assert_eq!(matches.len(), 3);
        assert!(!matches[0].eligible);
        assert!(matches[0].pair.is_none());
        assert_eq!(matches[0].direction(), MatchDirection::None);
        assert!(!matches[1].eligible);
        assert!(matches[1].pair.is_none());
        assert!(matches[2].is_suspected_infection());
    }

    #[test]
    fn test_specimen_may_serve_several_administrations() {
        let specimens = [specimen(1, hours(-2))];
        let administrations = [systemic(10, hours(0)), systemic(11, hours(12))];
        let matches = match_encounter(&administrations, &specimens, &MatchWindow::default());
        assert!(
            matches
                .iter()
                .all(|m| m.pair.as_ref().is_some_and(|p| p.specimen_id == 1))
        );
    }

    #[test]
    fn test_specimens_of_other_encounters_are_ignored() {
        let foreign = SpecimenEvent::new(
            1,
            ENCOUNTER + 1,
            hours(-1),
            "BLOOD CULTURE",
            CulturePolarity::Positive,
        );
        assert!(
            match_administration(&systemic(10, hours(0)), &[foreign], &MatchWindow::default())
                .is_none()
        );
    }

    #[test]
    fn test_culture_polarity_does_not_affect_matching() {
        for polarity in [
            CulturePolarity::Positive,
            CulturePolarity::Negative,
            CulturePolarity::Unknown,
        ] {
            let culture = SpecimenEvent::new(1, ENCOUNTER, hours(-3), "URINE", polarity);
            let pair =
                match_administration(&systemic(10, hours(0)), &[culture], &MatchWindow::default())
                    .unwrap();
            assert_eq!(pair.specimen_polarity, polarity);
        }
    }

    #[test]
    fn test_no_specimen_in_window() {
        let specimens = [specimen(1, hours(-80)), specimen(2, hours(30))];
        let matches = match_encounter(&[systemic(10, hours(0))], &specimens, &MatchWindow::default());
        assert!(matches[0].eligible);
        assert!(!matches[0].is_suspected_infection());
    }
}
