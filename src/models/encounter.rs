//! Encounter model and per-encounter event bundles
//!
//! An encounter (hospital admission or ICU stay) owns every event recorded
//! within it. [`Cohort::assemble`] groups flat event lists into bundles.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use log::{info, warn};
use rustc_hash::FxHashMap;

use super::diagnosis::DiagnosisEvent;
use super::events::{AdministrationEvent, SpecimenEvent};
use super::observation::{OrganDysfunctionTimeline, PhysiologicObservation};

/// Identifier of an encounter
pub type EncounterId = i64;

/// A hospitalization or ICU stay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    /// Unique encounter identifier
    pub id: EncounterId,
    /// Admission time, the anchor for relative windows
    pub admit_time: NaiveDateTime,
    /// Age in whole years at admission, if known
    pub age_years: Option<u32>,
}

impl Encounter {
    /// Create a new encounter
    #[must_use]
    pub const fn new(id: EncounterId, admit_time: NaiveDateTime, age_years: Option<u32>) -> Self {
        Self {
            id,
            admit_time,
            age_years,
        }
    }

    /// Set the age from a date of birth, measured at admission
    #[must_use]
    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.age_years = age_at(birth_date, self.admit_time.date());
        self
    }
}

/// Age in completed years on `date`, `None` if born after it
#[must_use]
pub fn age_at(birth_date: NaiveDate, date: NaiveDate) -> Option<u32> {
    let mut years = date.year() - birth_date.year();
    if (date.month(), date.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// All events of one encounter
#[derive(Debug, Clone)]
pub struct EncounterBundle {
    /// The encounter
    pub encounter: Encounter,
    /// Diagnosis codes, any position
    pub diagnoses: Vec<DiagnosisEvent>,
    /// Treatment administrations
    pub administrations: Vec<AdministrationEvent>,
    /// Culture specimens
    pub specimens: Vec<SpecimenEvent>,
    /// Physiologic observations
    pub observations: Vec<PhysiologicObservation>,
    /// Pre-materialized organ dysfunction scores
    pub organ_scores: OrganDysfunctionTimeline,
}

impl EncounterBundle {
    /// Create an empty bundle for an encounter
    #[must_use]
    pub fn new(encounter: Encounter) -> Self {
        Self {
            encounter,
            diagnoses: Vec::new(),
            administrations: Vec::new(),
            specimens: Vec::new(),
            observations: Vec::new(),
            organ_scores: OrganDysfunctionTimeline::default(),
        }
    }

    /// Encounter identifier
    #[must_use]
    pub const fn id(&self) -> EncounterId {
        self.encounter.id
    }

    /// Set the diagnoses
    #[must_use]
    pub fn with_diagnoses(mut self, diagnoses: Vec<DiagnosisEvent>) -> Self {
        self.diagnoses = diagnoses;
        self
    }

    /// Set the administrations
    #[must_use]
    pub fn with_administrations(mut self, administrations: Vec<AdministrationEvent>) -> Self {
        self.administrations = administrations;
        self
    }

    /// Set the specimens
    #[must_use]
    pub fn with_specimens(mut self, specimens: Vec<SpecimenEvent>) -> Self {
        self.specimens = specimens;
        self
    }

    /// Set the observations
    #[must_use]
    pub fn with_observations(mut self, observations: Vec<PhysiologicObservation>) -> Self {
        self.observations = observations;
        self
    }

    /// Set the organ dysfunction timeline
    #[must_use]
    pub fn with_organ_scores(mut self, organ_scores: OrganDysfunctionTimeline) -> Self {
        self.organ_scores = organ_scores;
        self
    }
}

/// Flat event lists for a whole cohort, before grouping
#[derive(Debug, Clone, Default)]
pub struct Cohort {
    /// Encounters
    pub encounters: Vec<Encounter>,
    /// Diagnosis events
    pub diagnoses: Vec<DiagnosisEvent>,
    /// Administration events
    pub administrations: Vec<AdministrationEvent>,
    /// Specimen events
    pub specimens: Vec<SpecimenEvent>,
    /// Physiologic observations
    pub observations: Vec<PhysiologicObservation>,
    /// Organ dysfunction score points as `(encounter, time, score)`
    pub organ_scores: Vec<(EncounterId, NaiveDateTime, i32)>,
}

impl Cohort {
    /// Group every event under its encounter
    ///
    /// Bundles come back in encounter order. Events that reference an
    /// encounter not in the cohort are dropped and counted in the log.
    #[must_use]
    pub fn assemble(self) -> Vec<EncounterBundle> {
        let mut bundles: FxHashMap<EncounterId, EncounterBundle> = self
            .encounters
            .into_iter()
            .map(|encounter| (encounter.id, EncounterBundle::new(encounter)))
            .collect();

        let mut orphans = 0usize;

        for diagnosis in self.diagnoses {
            match bundles.get_mut(&diagnosis.encounter_id) {
                Some(bundle) => bundle.diagnoses.push(diagnosis),
                None => orphans += 1,
            }
        }
        for administration in self.administrations {
            match bundles.get_mut(&administration.encounter_id) {
                Some(bundle) => bundle.administrations.push(administration),
                None => orphans += 1,
            }
        }
        for specimen in self.specimens {
            match bundles.get_mut(&specimen.encounter_id) {
                Some(bundle) => bundle.specimens.push(specimen),
                None => orphans += 1,
            }
        }
        for observation in self.observations {
            match bundles.get_mut(&observation.encounter_id) {
                Some(bundle) => bundle.observations.push(observation),
                None => orphans += 1,
            }
        }

        let score_groups = self
            .organ_scores
            .into_iter()
            .into_group_map_by(|(encounter_id, _, _)| *encounter_id);
        for (encounter_id, points) in score_groups {
            match bundles.get_mut(&encounter_id) {
                Some(bundle) => {
                    bundle.organ_scores = OrganDysfunctionTimeline::new(
                        points.into_iter().map(|(_, time, score)| (time, score)).collect(),
                    );
                }
                None => orphans += points.len(),
            }
        }

        if orphans > 0 {
            warn!("Dropped {orphans} events referencing unknown encounters");
        }

        let bundles = bundles
            .into_values()
            .sorted_unstable_by_key(EncounterBundle::id)
            .collect_vec();
        info!("Assembled {} encounter bundles", bundles.len());
        bundles
    }
}
