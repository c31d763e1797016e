#[cfg(test)]
mod tests {
    use crate::utils::ENCOUNTER;
    use cohort_rules::algorithm::comorbidity::charlson::{CharlsonCategory, CharlsonScore};
    use cohort_rules::algorithm::comorbidity::elixhauser::{ElixhauserCategory, ElixhauserScore};
    use cohort_rules::algorithm::comorbidity::{CategoryFlags, CodeClassifier};
    use cohort_rules::models::{CodingSystem, DiagnosisEvent};

    fn icd10(codes: &[&str]) -> Vec<DiagnosisEvent> {
        diagnoses(codes, CodingSystem::Icd10)
    }

    fn icd9(codes: &[&str]) -> Vec<DiagnosisEvent> {
        diagnoses(codes, CodingSystem::Icd9)
    }

    fn diagnoses(codes: &[&str], system: CodingSystem) -> Vec<DiagnosisEvent> {
        codes
            .iter()
            .zip(1..)
            .map(|(code, seq)| DiagnosisEvent::new(ENCOUNTER, *code, system, seq))
            .collect()
    }

    fn charlson() -> CodeClassifier<CharlsonCategory> {
        CodeClassifier::compile().unwrap()
    }

    fn elixhauser() -> CodeClassifier<ElixhauserCategory> {
        CodeClassifier::compile().unwrap()
    }

    #[test]
    fn test_mild_and_severe_liver_scores_severe_only() {
        let flags = charlson().classify(&icd10(&["K70.3", "K72.1"]));
        assert!(flags.contains(CharlsonCategory::SevereLiverDisease));
        assert!(!flags.contains(CharlsonCategory::MildLiverDisease));
        assert_eq!(CharlsonScore::from_flags(flags, None).index(), 3);
    }

    #[test]
    fn test_diabetes_hierarchy() {
        let flags = charlson().classify(&icd10(&["E11.9", "E11.2"]));
        assert_eq!(
            flags.iter().collect::<Vec<_>>(),
            vec![CharlsonCategory::DiabetesWithComplications]
        );
        assert_eq!(CharlsonScore::from_flags(flags, None).index(), 2);
    }

    #[test]
    fn test_metastatic_supersedes_malignancy() {
        let flags = charlson().classify(&icd9(&["1628", "1970"]));
        assert!(flags.contains(CharlsonCategory::MetastaticSolidTumor));
        assert!(!flags.contains(CharlsonCategory::MalignantCancer));
        assert_eq!(CharlsonScore::from_flags(flags, None).index(), 6);
    }

    #[test]
    fn test_unrelated_categories_accumulate() {
        // MI, CHF, dementia and AIDS
        let flags = charlson().classify(&icd10(&["I21.4", "I50.9", "F03", "B20"]));
        assert_eq!(flags.len(), 4);
        assert_eq!(CharlsonScore::from_flags(flags, None).index(), 1 + 1 + 1 + 6);
    }

    #[test]
    fn test_unmapped_codes_are_ignored() {
        let classifier = charlson();
        let events = icd10(&["Z00.0", "I50.0", "XYZ"]);
        let flags = classifier.classify(&events);
        assert_eq!(flags.names(), vec!["congestive_heart_failure"]);
        assert_eq!(classifier.unmapped_count(&events), 2);
    }

    #[test]
    fn test_list_position_is_irrelevant() {
        let classifier = charlson();
        let primary = vec![DiagnosisEvent::new(ENCOUNTER, "I50.0", CodingSystem::Icd10, 1)];
        let secondary = vec![DiagnosisEvent::new(ENCOUNTER, "I50.0", CodingSystem::Icd10, 17)];
        assert_eq!(classifier.classify(&primary), classifier.classify(&secondary));
    }

    #[test]
    fn test_coding_system_selects_table() {
        let classifier = charlson();
        assert!(
            classifier
                .classify(&icd9(&["4280"]))
                .contains(CharlsonCategory::CongestiveHeartFailure)
        );
        assert!(classifier.classify(&icd10(&["4280"])).is_empty());
        assert!(classifier.classify(&icd9(&["I50.0"])).is_empty());
    }

    #[test]
    fn test_codes_are_normalized() {
        let classifier = charlson();
        let flags = classifier.classify(&icd10(&[" i50.0 "]));
        assert!(flags.contains(CharlsonCategory::CongestiveHeartFailure));
        let matches = classifier.lookup("428.0", CodingSystem::Icd9);
        assert_eq!(matches.as_slice(), &[CharlsonCategory::CongestiveHeartFailure]);
    }

    #[test]
    fn test_one_code_may_hit_two_categories() {
        let flags = charlson().classify(&icd9(&["40403"]));
        assert!(flags.contains(CharlsonCategory::CongestiveHeartFailure));
        assert!(flags.contains(CharlsonCategory::RenalDisease));
    }

    #[test]
    fn test_range_rows_match_inner_codes() {
        let classifier = charlson();
        // I425-I429
        assert!(
            classifier
                .classify(&icd10(&["I42.7"]))
                .contains(CharlsonCategory::CongestiveHeartFailure)
        );
        assert!(classifier.classify(&icd10(&["I42.1"])).is_empty());
        // 042-044
        assert!(classifier.classify(&icd9(&["043"])).contains(CharlsonCategory::Aids));
    }

    #[test]
    fn test_age_points_are_added() {
        let flags = charlson().classify(&icd10(&["I50.0"]));
        let score = CharlsonScore::from_flags(flags.clone(), Some(75));
        assert_eq!(score.age_points, 3);
        assert_eq!(score.index(), 4);
        assert_eq!(CharlsonScore::from_flags(flags, None).index(), 1);
    }

    #[test]
    fn test_unknown_category_names_contribute_nothing() {
        let flags = CategoryFlags::<CharlsonCategory>::from_names(["dementia", "frailty"]);
        assert_eq!(flags.len(), 1);
        assert_eq!(CharlsonScore::from_flags(flags, Some(40)).index(), 1);
    }

    #[test]
    fn test_named_flags_resolve_hierarchy() {
        let flags = CategoryFlags::<CharlsonCategory>::from_names([
            "mild_liver_disease",
            "severe_liver_disease",
        ]);
        assert_eq!(flags.names(), vec!["severe_liver_disease"]);
    }

    #[test]
    fn test_flags_cover_every_category() {
        let flags = charlson().classify(&icd10(&["I50.0"]));
        let all = flags.flags();
        assert_eq!(all.len(), 17);
        assert_eq!(all.iter().filter(|(_, present)| *present).count(), 1);
    }

    #[test]
    fn test_elixhauser_count_and_van_walraven() {
        let flags = elixhauser().classify(&icd10(&["I50.0", "N18.3", "F32.9"]));
        let score = ElixhauserScore::from_flags(flags);
        assert_eq!(score.count(), 3);
        assert_eq!(score.van_walraven(), 7 + 5 - 3);
    }

    #[test]
    fn test_elixhauser_hypertension_hierarchy() {
        let flags = elixhauser().classify(&icd10(&["I10", "I13.0"]));
        assert!(flags.contains(ElixhauserCategory::HypertensionComplicated));
        assert!(!flags.contains(ElixhauserCategory::HypertensionUncomplicated));
        assert!(flags.contains(ElixhauserCategory::CongestiveHeartFailure));
        assert_eq!(ElixhauserScore::from_flags(flags).van_walraven(), 7);
    }

    #[test]
    fn test_elixhauser_negative_weights() {
        // Obesity -4, drug abuse -7
        let flags = CategoryFlags::<ElixhauserCategory>::from_names(["obesity", "drug_abuse"]);
        assert_eq!(ElixhauserScore::from_flags(flags).van_walraven(), -11);
    }

    #[test]
    fn test_no_diagnoses_scores_zero() {
        let flags = elixhauser().classify(&[]);
        let score = ElixhauserScore::from_flags(flags);
        assert_eq!(score.count(), 0);
        assert_eq!(score.van_walraven(), 0);
    }
}
