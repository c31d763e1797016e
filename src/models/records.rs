//! Flat input records as they arrive from Parquet tables
//!
//! Each record type mirrors one input table. Conversion into domain events
//! is fallible per row; [`CohortRecords::into_cohort`] skips rows that cannot
//! be converted and reports how many were dropped.

use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::utils::io::ParquetRecord;
use crate::utils::logging::log_skipped_rows;

use super::diagnosis::{CodingSystem, DiagnosisEvent};
use super::encounter::{Cohort, Encounter, EncounterId};
use super::events::{AdministrationEvent, CulturePolarity, EventId, EventTime, Route, SpecimenEvent};
use super::observation::{PhysiologicObservation, SpecimenSource, Variable};

/// One row of the encounters table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub encounter_id: EncounterId,
    pub admit_time: NaiveDateTime,
    /// Age at admission; takes precedence over `birth_date`
    pub age: Option<u32>,
    pub birth_date: Option<NaiveDate>,
}

impl EncounterRecord {
    /// Convert into an encounter, deriving age from the birth date if needed
    #[must_use]
    pub fn into_encounter(self) -> Encounter {
        let encounter = Encounter::new(self.encounter_id, self.admit_time, self.age);
        match (self.age, self.birth_date) {
            (None, Some(birth_date)) => encounter.with_birth_date(birth_date),
            _ => encounter,
        }
    }
}

/// One row of the diagnoses table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    pub encounter_id: EncounterId,
    pub icd_code: String,
    /// 9 or 10; when absent the era is taken from `chart_date`
    pub icd_version: Option<i32>,
    pub seq_num: u32,
    pub chart_date: Option<NaiveDate>,
}

impl DiagnosisRecord {
    /// Convert into a diagnosis event
    ///
    /// # Errors
    /// Fails on an unknown version tag, or when neither a version nor a date
    /// is available to decide the coding era
    pub fn into_event(self, icd10_transition: NaiveDate) -> Result<DiagnosisEvent> {
        let coding_system = match (self.icd_version, self.chart_date) {
            (Some(version), _) => CodingSystem::from_version(version).ok_or_else(|| {
                Error::invalid_record(format!("unknown ICD version {version} for '{}'", self.icd_code))
            })?,
            (None, Some(date)) => CodingSystem::for_date(date, icd10_transition),
            (None, None) => {
                return Err(Error::invalid_record(format!(
                    "diagnosis '{}' has neither version nor date",
                    self.icd_code
                )));
            }
        };
        Ok(DiagnosisEvent::new(
            self.encounter_id,
            self.icd_code,
            coding_system,
            self.seq_num,
        ))
    }
}

/// One row of the antibiotic administrations table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrationRecord {
    pub id: EventId,
    pub encounter_id: EncounterId,
    pub drug: String,
    pub route: String,
    pub start_time: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDate>,
}

impl AdministrationRecord {
    /// Convert into an administration event
    ///
    /// # Errors
    /// Fails when the row has neither a start time nor a start date
    pub fn into_event(self) -> Result<AdministrationEvent> {
        let start = EventTime::from_parts(self.start_time, self.start_date).ok_or_else(|| {
            Error::invalid_record(format!("administration {} has no start", self.id))
        })?;
        Ok(AdministrationEvent::new(
            self.id,
            self.encounter_id,
            self.drug,
            Route::classify(&self.route),
            start,
        ))
    }
}

/// One row of the culture specimens table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecimenRecord {
    pub id: EventId,
    pub encounter_id: EncounterId,
    pub charttime: Option<NaiveDateTime>,
    pub chartdate: Option<NaiveDate>,
    pub spec_type: String,
    /// "positive", "negative" or absent
    pub polarity: Option<String>,
}

impl SpecimenRecord {
    /// Convert into a specimen event
    ///
    /// # Errors
    /// Fails when the row has neither a chart time nor a chart date
    pub fn into_event(self) -> Result<SpecimenEvent> {
        let time = EventTime::from_parts(self.charttime, self.chartdate).ok_or_else(|| {
            Error::invalid_record(format!("specimen {} has neither time nor date", self.id))
        })?;
        Ok(SpecimenEvent::new(
            self.id,
            self.encounter_id,
            time,
            self.spec_type,
            CulturePolarity::from_tag(self.polarity.as_deref()),
        ))
    }
}

/// One row of the physiologic observations table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub encounter_id: EncounterId,
    pub variable: String,
    pub value: f64,
    pub charttime: NaiveDateTime,
    /// Sample source tag, relevant for blood gases
    pub source: Option<String>,
}

impl ObservationRecord {
    /// Convert into an observation
    ///
    /// # Errors
    /// Fails on a variable name outside the SIRS inputs
    pub fn into_observation(self) -> Result<PhysiologicObservation> {
        let variable = Variable::from_name(&self.variable).ok_or_else(|| {
            Error::invalid_record(format!("unknown variable '{}'", self.variable))
        })?;
        Ok(
            PhysiologicObservation::new(self.encounter_id, variable, self.value, self.charttime)
                .with_source(SpecimenSource::from_tag(self.source.as_deref())),
        )
    }
}

/// One row of the organ dysfunction scores table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganScoreRecord {
    pub encounter_id: EncounterId,
    pub time: NaiveDateTime,
    pub score: i32,
}

impl ParquetRecord for EncounterRecord {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            admit_time: NaiveDateTime::default(),
            age: Some(0),
            birth_date: Some(NaiveDate::default()),
        }
    }
}

impl ParquetRecord for DiagnosisRecord {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            icd_code: String::new(),
            icd_version: Some(10),
            seq_num: 0,
            chart_date: Some(NaiveDate::default()),
        }
    }
}

impl ParquetRecord for AdministrationRecord {
    fn schema_sample() -> Self {
        Self {
            id: 0,
            encounter_id: 0,
            drug: String::new(),
            route: String::new(),
            start_time: Some(NaiveDateTime::default()),
            start_date: Some(NaiveDate::default()),
        }
    }
}

impl ParquetRecord for SpecimenRecord {
    fn schema_sample() -> Self {
        Self {
            id: 0,
            encounter_id: 0,
            charttime: Some(NaiveDateTime::default()),
            chartdate: Some(NaiveDate::default()),
            spec_type: String::new(),
            polarity: Some(String::new()),
        }
    }
}

impl ParquetRecord for ObservationRecord {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            variable: String::new(),
            value: 0.0,
            charttime: NaiveDateTime::default(),
            source: Some(String::new()),
        }
    }
}

impl ParquetRecord for OrganScoreRecord {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            time: NaiveDateTime::default(),
            score: 0,
        }
    }
}

/// All input tables of a cohort
#[derive(Debug, Clone, Default)]
pub struct CohortRecords {
    pub encounters: Vec<EncounterRecord>,
    pub diagnoses: Vec<DiagnosisRecord>,
    pub administrations: Vec<AdministrationRecord>,
    pub specimens: Vec<SpecimenRecord>,
    pub observations: Vec<ObservationRecord>,
    pub organ_scores: Vec<OrganScoreRecord>,
}

impl CohortRecords {
    /// Convert every table into domain events, skipping unconvertible rows
    #[must_use]
    pub fn into_cohort(self, config: &EngineConfig) -> Cohort {
        let transition = config.icd10_transition_date;
        let cohort = Cohort {
            encounters: self
                .encounters
                .into_iter()
                .map(EncounterRecord::into_encounter)
                .collect(),
            diagnoses: convert_rows("diagnosis", self.diagnoses, |r| r.into_event(transition)),
            administrations: convert_rows(
                "administration",
                self.administrations,
                AdministrationRecord::into_event,
            ),
            specimens: convert_rows("specimen", self.specimens, SpecimenRecord::into_event),
            observations: convert_rows(
                "observation",
                self.observations,
                ObservationRecord::into_observation,
            ),
            organ_scores: self
                .organ_scores
                .into_iter()
                .map(|r| (r.encounter_id, r.time, r.score))
                .collect(),
        };
        info!(
            "Converted {} encounters, {} diagnoses, {} administrations, {} specimens, {} observations",
            cohort.encounters.len(),
            cohort.diagnoses.len(),
            cohort.administrations.len(),
            cohort.specimens.len(),
            cohort.observations.len()
        );
        cohort
    }
}

fn convert_rows<R, T>(table: &str, rows: Vec<R>, convert: impl Fn(R) -> Result<T>) -> Vec<T> {
    let mut skipped = 0usize;
    let converted = rows
        .into_iter()
        .filter_map(|row| match convert(row) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Skipping {table} row: {e}");
                skipped += 1;
                None
            }
        })
        .collect_vec();
    log_skipped_rows(table, skipped);
    converted
}
