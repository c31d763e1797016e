//! Seeded synthetic cohort
//!
//! Produces a deterministic cohort that exercises every rule: diagnoses from
//! both coding eras, systemic and topical antibiotics, cultures with and
//! without a time of day, SIRS observations and organ dysfunction scores.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::models::diagnosis::{CodingSystem, DiagnosisEvent};
use crate::models::encounter::{Cohort, Encounter, EncounterId};
use crate::models::events::{
    AdministrationEvent, CulturePolarity, EventId, EventTime, Route, SpecimenEvent,
};
use crate::models::observation::{PhysiologicObservation, SpecimenSource, Variable};

const ICD9_CODES: &[&str] = &[
    "4280", "41071", "25000", "25040", "5712", "5722", "1970", "1628", "40403", "2765", "42731",
    "2859", "78552", "99591", "486", "2962", "3051", "V4511",
];

const ICD10_CODES: &[&str] = &[
    "I50.0", "I21.4", "E11.9", "E11.2", "K70.3", "K76.6", "C78.7", "C34.9", "N18.3", "I13.0",
    "E87.1", "I48.0", "D64.9", "R65.21", "A41.9", "J18.9", "B20", "F32.9",
];

const ROUTES: &[&str] = &["IV", "IV DRIP", "PO", "PO/NG", "IM", "TP", "OU", "INHALATION"];
const DRUGS: &[&str] = &["vancomycin", "piperacillin", "ceftriaxone", "ciprofloxacin", "bacitracin"];
const SPECIMEN_TYPES: &[&str] = &["BLOOD CULTURE", "URINE", "SPUTUM", "SWAB"];
const POLARITIES: &[CulturePolarity] = &[
    CulturePolarity::Positive,
    CulturePolarity::Negative,
    CulturePolarity::Unknown,
];

struct Generator {
    rng: StdRng,
    transition: NaiveDate,
    next_event_id: EventId,
    cohort: Cohort,
}

impl Generator {
    fn next_id(&mut self) -> EventId {
        self.next_event_id += 1;
        self.next_event_id
    }

    fn event_time(&mut self, at: NaiveDateTime, date_only_probability: f64) -> EventTime {
        if self.rng.random_bool(date_only_probability) {
            EventTime::DateOnly(at.date())
        } else {
            EventTime::Timestamp(at)
        }
    }

    fn encounter(&mut self, id: EncounterId, base: NaiveDateTime) {
        let admit_time = base
            + Duration::days(self.rng.random_range(0..2_555))
            + Duration::minutes(self.rng.random_range(0..1_440));
        let age = (!self.rng.random_bool(0.05)).then(|| self.rng.random_range(18..96));
        self.cohort.encounters.push(Encounter::new(id, admit_time, age));

        self.diagnoses(id, admit_time);
        self.administrations(id, admit_time);
        self.specimens(id, admit_time);
        self.observations(id, admit_time);
        self.organ_scores(id, admit_time);
    }

    fn diagnoses(&mut self, id: EncounterId, admit_time: NaiveDateTime) {
        let system = CodingSystem::for_date(admit_time.date(), self.transition);
        let pool = match system {
            CodingSystem::Icd9 => ICD9_CODES,
            CodingSystem::Icd10 => ICD10_CODES,
        };
        let count = self.rng.random_range(0..9);
        for seq_num in 1..=count {
            if let Some(code) = pool.choose(&mut self.rng) {
                self.cohort
                    .diagnoses
                    .push(DiagnosisEvent::new(id, *code, system, seq_num));
            }
        }
    }

    fn administrations(&mut self, id: EncounterId, admit_time: NaiveDateTime) {
        for _ in 0..self.rng.random_range(0..4) {
            let at = admit_time + Duration::hours(self.rng.random_range(-12..96));
            let start = self.event_time(at, 0.2);
            let route = ROUTES.choose(&mut self.rng).copied().unwrap_or("IV");
            let drug = DRUGS.choose(&mut self.rng).copied().unwrap_or("vancomycin");
            let event_id = self.next_id();
            self.cohort.administrations.push(AdministrationEvent::new(
                event_id,
                id,
                drug,
                Route::classify(route),
                start,
            ));
        }
    }

    fn specimens(&mut self, id: EncounterId, admit_time: NaiveDateTime) {
        for _ in 0..self.rng.random_range(0..4) {
            let at = admit_time + Duration::hours(self.rng.random_range(-72..120));
            let time = self.event_time(at, 0.3);
            let specimen_type = SPECIMEN_TYPES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("BLOOD CULTURE");
            let polarity = POLARITIES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(CulturePolarity::Unknown);
            let event_id = self.next_id();
            self.cohort.specimens.push(SpecimenEvent::new(
                event_id,
                id,
                time,
                specimen_type,
                polarity,
            ));
        }
    }

    fn observations(&mut self, id: EncounterId, admit_time: NaiveDateTime) {
        for hour in (-8..30).step_by(4) {
            let time = admit_time + Duration::hours(hour);
            let mut push = |variable, value| {
                self.cohort
                    .observations
                    .push(PhysiologicObservation::new(id, variable, value, time));
            };
            push(Variable::HeartRate, self.rng.random_range(55.0..135.0));
            push(Variable::RespiratoryRate, self.rng.random_range(10.0..32.0));
            if self.rng.random_bool(0.5) {
                push(Variable::TemperatureCelsius, self.rng.random_range(35.0..39.5));
            } else {
                push(Variable::TemperatureFahrenheit, self.rng.random_range(95.0..103.0));
            }
            if self.rng.random_bool(0.3) {
                push(Variable::WhiteBloodCells, self.rng.random_range(2.0..20.0));
            }
            if self.rng.random_bool(0.1) {
                push(Variable::BandNeutrophils, self.rng.random_range(0.0..20.0));
            }
            if self.rng.random_bool(0.2) {
                let source = [
                    SpecimenSource::Arterial,
                    SpecimenSource::Venous,
                    SpecimenSource::Unspecified,
                ]
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(SpecimenSource::Unspecified);
                let value = self.rng.random_range(25.0..50.0);
                self.cohort.observations.push(
                    PhysiologicObservation::new(id, Variable::PaCO2, value, time).with_source(source),
                );
            }
        }
    }

    fn organ_scores(&mut self, id: EncounterId, admit_time: NaiveDateTime) {
        for hour in (-24..120).step_by(12) {
            if self.rng.random_bool(0.6) {
                let score = self.rng.random_range(0..6);
                self.cohort
                    .organ_scores
                    .push((id, admit_time + Duration::hours(hour), score));
            }
        }
    }
}

/// Generate `encounters` synthetic encounters from a fixed seed
///
/// The same seed always yields the same cohort.
#[must_use]
pub fn generate_cohort(encounters: usize, seed: u64) -> Cohort {
    let base = NaiveDate::from_ymd_opt(2011, 1, 1)
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();

    let mut generator = Generator {
        rng: StdRng::seed_from_u64(seed),
        transition: EngineConfig::default().icd10_transition_date,
        next_event_id: 0,
        cohort: Cohort::default(),
    };
    for id in (1..).take(encounters) {
        generator.encounter(id, base);
    }

    let cohort = generator.cohort;
    info!(
        "Generated synthetic cohort: {} encounters, {} diagnoses, {} administrations, {} specimens",
        cohort.encounters.len(),
        cohort.diagnoses.len(),
        cohort.administrations.len(),
        cohort.specimens.len()
    );
    cohort
}
