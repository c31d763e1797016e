#[cfg(test)]
mod tests {
    use crate::utils::{anchor, date};
    use cohort_rules::models::records::{
        AdministrationRecord, CohortRecords, DiagnosisRecord, EncounterRecord, SpecimenRecord,
    };
    use cohort_rules::models::rows::{InfectionRow, SepsisRow};
    use cohort_rules::utils::{read_records, write_records};
    use cohort_rules::{EngineConfig, ScoringEngine};
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cohort_rules_test_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_parquet_round_trip_keeps_optional_fields() {
        let rows = vec![
            SepsisRow {
                encounter_id: 1,
                suspected_infection: true,
                onset: Some(anchor()),
                onset_date_only: false,
                administration_id: Some(10),
                specimen_id: Some(20),
                organ_score: Some(3),
                organ_score_imputed: false,
                candidates: 2,
                sepsis: true,
            },
            SepsisRow {
                encounter_id: 2,
                suspected_infection: false,
                onset: None,
                onset_date_only: false,
                administration_id: None,
                specimen_id: None,
                organ_score: None,
                organ_score_imputed: false,
                candidates: 0,
                sepsis: false,
            },
        ];
        let path = temp_file("sepsis.parquet");
        write_records(&path, &rows).unwrap();
        let read: Vec<SepsisRow> = read_records(&path).unwrap();
        assert_eq!(read, rows);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_infection_rows_round_trip() {
        let rows = vec![
            InfectionRow {
                encounter_id: 1,
                administration_id: 10,
                administration_time: anchor(),
                administration_date_only: false,
                eligible: true,
                specimen_id: Some(20),
                specimen_time: Some(date(2020, 3, 8).and_hms_opt(0, 0, 0).unwrap()),
                direction: "before".to_string(),
                offset_hours: Some(48.0),
                day_granularity: true,
                suspected_infection_time: Some(date(2020, 3, 8).and_hms_opt(0, 0, 0).unwrap()),
                culture_positive: Some(true),
            },
            InfectionRow {
                encounter_id: 1,
                administration_id: 11,
                administration_time: date(2020, 3, 11).and_hms_opt(0, 0, 0).unwrap(),
                administration_date_only: true,
                eligible: false,
                specimen_id: None,
                specimen_time: None,
                direction: "none".to_string(),
                offset_hours: None,
                day_granularity: false,
                suspected_infection_time: None,
                culture_positive: None,
            },
        ];
        let path = temp_file("infections.parquet");
        write_records(&path, &rows).unwrap();
        let read: Vec<InfectionRow> = read_records(&path).unwrap();
        assert_eq!(read, rows);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_all_null_optional_columns_round_trip() {
        let rows = vec![SpecimenRecord {
            id: 5,
            encounter_id: 1,
            charttime: None,
            chartdate: Some(date(2020, 3, 9)),
            spec_type: "URINE".to_string(),
            polarity: None,
        }];
        let path = temp_file("specimens.parquet");
        write_records(&path, &rows).unwrap();
        let read: Vec<SpecimenRecord> = read_records(&path).unwrap();
        assert_eq!(read, rows);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_table_round_trip() {
        let path = temp_file("empty_sepsis.parquet");
        write_records::<SepsisRow>(&path, &[]).unwrap();
        let read: Vec<SepsisRow> = read_records(&path).unwrap();
        assert!(read.is_empty());
        std::fs::remove_file(&path).ok();

        let path = temp_file("empty_infections.parquet");
        write_records::<InfectionRow>(&path, &[]).unwrap();
        let read: Vec<InfectionRow> = read_records(&path).unwrap();
        assert!(read.is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_records_flow_into_evaluation() {
        let records = CohortRecords {
            encounters: vec![EncounterRecord {
                encounter_id: 1,
                admit_time: anchor(),
                age: None,
                birth_date: Some(date(1945, 1, 1)),
            }],
            diagnoses: vec![
                DiagnosisRecord {
                    encounter_id: 1,
                    icd_code: "I50.0".to_string(),
                    icd_version: None,
                    seq_num: 1,
                    chart_date: Some(date(2020, 3, 10)),
                },
                DiagnosisRecord {
                    encounter_id: 1,
                    icd_code: "4280".to_string(),
                    icd_version: Some(7),
                    seq_num: 2,
                    chart_date: None,
                },
            ],
            administrations: vec![AdministrationRecord {
                id: 10,
                encounter_id: 1,
                drug: "ceftriaxone".to_string(),
                route: "IV".to_string(),
                start_time: Some(anchor()),
                start_date: None,
            }],
            specimens: vec![SpecimenRecord {
                id: 20,
                encounter_id: 1,
                charttime: None,
                chartdate: Some(date(2020, 3, 8)),
                spec_type: "BLOOD CULTURE".to_string(),
                polarity: Some("positive".to_string()),
            }],
            ..CohortRecords::default()
        };
        let config = EngineConfig::default();
        let bundles = records.into_cohort(&config).assemble();
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].encounter.age_years, Some(75));
        // unknown version 7 is skipped
        assert_eq!(bundles[0].diagnoses.len(), 1);

        let evaluation = ScoringEngine::new(config).unwrap().evaluate(&bundles[0]);
        // CHF 1 + age 75 (3 points) -> 4
        assert_eq!(evaluation.charlson.index(), 4);
        let pair = evaluation.infections[0].pair.as_ref().unwrap();
        assert_eq!(pair.specimen_id, 20);
        assert!(pair.day_granularity);
        assert!(evaluation.sepsis.onset_date_only());
    }
}
