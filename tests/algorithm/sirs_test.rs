#[cfg(test)]
mod tests {
    use crate::utils::{ENCOUNTER, anchor, bundle};
    use chrono::Duration;
    use cohort_rules::algorithm::sirs::{self, SirsInputs};
    use cohort_rules::models::{PhysiologicObservation, SpecimenSource, Variable};
    use cohort_rules::{EngineConfig, ScoringEngine};

    fn obs(variable: Variable, value: f64, hours: i64) -> PhysiologicObservation {
        PhysiologicObservation::new(ENCOUNTER, variable, value, anchor() + Duration::hours(hours))
    }

    fn score(observations: &[PhysiologicObservation]) -> sirs::SirsScore {
        let inputs = SirsInputs::aggregate(
            observations,
            anchor() - Duration::hours(6),
            anchor() + Duration::hours(24),
        );
        sirs::evaluate(&inputs)
    }

    #[test]
    fn test_missing_inputs_meet_nothing() {
        let result = score(&[]);
        assert_eq!(result.total(), 0);
        assert!(!result.meets(1));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let normal = score(&[
            obs(Variable::TemperatureCelsius, 38.0, 0),
            obs(Variable::TemperatureCelsius, 36.0, 1),
            obs(Variable::HeartRate, 90.0, 0),
            obs(Variable::RespiratoryRate, 20.0, 0),
            obs(Variable::WhiteBloodCells, 12.0, 0),
            obs(Variable::WhiteBloodCells, 4.0, 1),
            obs(Variable::BandNeutrophils, 10.0, 0),
        ]);
        assert_eq!(normal.total(), 0);

        let abnormal = score(&[
            obs(Variable::TemperatureCelsius, 38.1, 0),
            obs(Variable::HeartRate, 91.0, 0),
            obs(Variable::RespiratoryRate, 21.0, 0),
            obs(Variable::BandNeutrophils, 11.0, 0),
        ]);
        assert_eq!(abnormal.criteria(), [true, true, true, true]);
        assert_eq!(abnormal.total(), 4);
    }

    #[test]
    fn test_low_extremes_count() {
        let result = score(&[
            obs(Variable::TemperatureCelsius, 35.9, 0),
            obs(Variable::WhiteBloodCells, 3.9, 0),
        ]);
        assert!(result.temperature);
        assert!(result.white_cells);
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn test_only_arterial_paco2_counts() {
        let venous = obs(Variable::PaCO2, 28.0, 0).with_source(SpecimenSource::Venous);
        let unspecified = obs(Variable::PaCO2, 28.0, 0);
        assert!(!score(&[venous, unspecified]).respiratory);

        let arterial = obs(Variable::PaCO2, 28.0, 0).with_source(SpecimenSource::Arterial);
        assert!(score(&[arterial]).respiratory);
    }

    #[test]
    fn test_fahrenheit_is_converted() {
        // 101.3 F = 38.5 C
        let inputs = SirsInputs::aggregate(
            &[obs(Variable::TemperatureFahrenheit, 101.3, 0)],
            anchor(),
            anchor(),
        );
        let celsius = inputs.temperature_max.unwrap();
        assert!((celsius - 38.5).abs() < 1e-9);
        assert!(sirs::evaluate(&inputs).temperature);
        // 98.6 F = 37 C
        assert!(!score(&[obs(Variable::TemperatureFahrenheit, 98.6, 0)]).temperature);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        assert!(score(&[obs(Variable::HeartRate, 120.0, -6)]).heart_rate);
        assert!(score(&[obs(Variable::HeartRate, 120.0, 24)]).heart_rate);
        assert!(!score(&[obs(Variable::HeartRate, 120.0, -7)]).heart_rate);
        assert!(!score(&[obs(Variable::HeartRate, 120.0, 25)]).heart_rate);
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        let result = score(&[obs(Variable::HeartRate, f64::NAN, 0)]);
        assert!(!result.heart_rate);
    }

    #[test]
    fn test_engine_uses_admission_relative_window() {
        let engine = ScoringEngine::new(EngineConfig::default().with_sirs_window(0, 12)).unwrap();
        let encounter = bundle(Some(60)).with_observations(vec![
            obs(Variable::HeartRate, 130.0, -1),
            obs(Variable::RespiratoryRate, 30.0, 6),
        ]);
        let evaluation = engine.evaluate(&encounter);
        assert!(!evaluation.sirs.heart_rate);
        assert!(evaluation.sirs.respiratory);
        assert_eq!(evaluation.sirs.total(), 1);
    }
}
