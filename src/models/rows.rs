//! Output rows written after evaluation
//!
//! Every row type is flat (primitives and chrono values only) so it maps
//! directly onto an Arrow schema.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::algorithm::comorbidity::charlson::CharlsonScore;
use crate::algorithm::comorbidity::elixhauser::ElixhauserScore;
use crate::algorithm::infection::InfectionMatch;
use crate::algorithm::pipeline::EncounterEvaluation;
use crate::algorithm::sepsis::SepsisRecord;
use crate::algorithm::sirs::{SirsInputs, SirsScore};

use crate::utils::io::ParquetRecord;

use super::encounter::EncounterId;
use super::events::EventId;

/// Index name used for Charlson rows
pub const CHARLSON_INDEX: &str = "charlson";
/// Index name used for Elixhauser rows
pub const ELIXHAUSER_INDEX: &str = "elixhauser_van_walraven";

/// Comorbidity index of one encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexScoreRow {
    pub encounter_id: EncounterId,
    pub index_name: String,
    /// Present categories after hierarchy resolution
    pub category_count: u32,
    /// Charlson index including age, or van Walraven score
    pub weighted_score: i32,
    /// Charlson only
    pub age_points: Option<i32>,
    /// Present category names joined with `|`
    pub categories: String,
}

impl IndexScoreRow {
    /// Row for a Charlson score
    #[must_use]
    pub fn charlson(encounter_id: EncounterId, score: &CharlsonScore) -> Self {
        Self {
            encounter_id,
            index_name: CHARLSON_INDEX.to_string(),
            category_count: count(score.flags.len()),
            weighted_score: score.index(),
            age_points: Some(score.age_points),
            categories: score.flags.names().join("|"),
        }
    }

    /// Row for an Elixhauser score
    #[must_use]
    pub fn elixhauser(encounter_id: EncounterId, score: &ElixhauserScore) -> Self {
        Self {
            encounter_id,
            index_name: ELIXHAUSER_INDEX.to_string(),
            category_count: count(score.count()),
            weighted_score: score.van_walraven(),
            age_points: None,
            categories: score.flags.names().join("|"),
        }
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_precision_loss)]
fn hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}

/// SIRS result of one encounter, with the values it was scored on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirsRow {
    pub encounter_id: EncounterId,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub heart_rate_max: Option<f64>,
    pub resp_rate_max: Option<f64>,
    pub paco2_min: Option<f64>,
    pub wbc_min: Option<f64>,
    pub wbc_max: Option<f64>,
    pub bands_max: Option<f64>,
    pub temperature: bool,
    pub heart_rate: bool,
    pub respiratory: bool,
    pub white_cells: bool,
    pub total: u8,
    /// Whether `total` reaches the configured threshold
    pub positive: bool,
}

impl SirsRow {
    /// Build a row from windowed inputs and their score
    #[must_use]
    pub fn new(
        encounter_id: EncounterId,
        inputs: &SirsInputs,
        score: &SirsScore,
        positive_threshold: u8,
    ) -> Self {
        Self {
            encounter_id,
            temperature_min: inputs.temperature_min,
            temperature_max: inputs.temperature_max,
            heart_rate_max: inputs.heart_rate_max,
            resp_rate_max: inputs.resp_rate_max,
            paco2_min: inputs.paco2_min,
            wbc_min: inputs.wbc_min,
            wbc_max: inputs.wbc_max,
            bands_max: inputs.bands_max,
            temperature: score.temperature,
            heart_rate: score.heart_rate,
            respiratory: score.respiratory,
            white_cells: score.white_cells,
            total: score.total(),
            positive: score.meets(positive_threshold),
        }
    }
}

/// Matching outcome of one administration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfectionRow {
    pub encounter_id: EncounterId,
    pub administration_id: EventId,
    /// Administration start; date-only starts are reported at midnight
    pub administration_time: NaiveDateTime,
    pub administration_date_only: bool,
    pub eligible: bool,
    pub specimen_id: Option<EventId>,
    pub specimen_time: Option<NaiveDateTime>,
    /// "before", "after" or "none"
    pub direction: String,
    /// Whole days when `day_granularity` is set
    pub offset_hours: Option<f64>,
    pub day_granularity: bool,
    pub suspected_infection_time: Option<NaiveDateTime>,
    /// Culture result, absent when unknown or unmatched
    pub culture_positive: Option<bool>,
}

impl InfectionRow {
    /// Flatten one matching outcome
    #[must_use]
    pub fn from_match(infection: &InfectionMatch) -> Self {
        let pair = infection.pair.as_ref();
        Self {
            encounter_id: infection.encounter_id,
            administration_id: infection.administration_id,
            administration_time: infection.administration_time.as_datetime(),
            administration_date_only: !infection.administration_time.has_time(),
            eligible: infection.eligible,
            specimen_id: pair.map(|p| p.specimen_id),
            specimen_time: pair.map(|p| p.specimen_time.as_datetime()),
            direction: infection.direction().to_string(),
            offset_hours: pair.map(|p| hours(p.offset)),
            day_granularity: pair.is_some_and(|p| p.day_granularity),
            suspected_infection_time: pair.map(|p| p.suspected_infection_instant()),
            culture_positive: pair.and_then(|p| p.specimen_polarity.as_option()),
        }
    }
}

/// Composite classification of one encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SepsisRow {
    pub encounter_id: EncounterId,
    pub suspected_infection: bool,
    pub onset: Option<NaiveDateTime>,
    pub onset_date_only: bool,
    pub administration_id: Option<EventId>,
    pub specimen_id: Option<EventId>,
    pub organ_score: Option<i32>,
    pub organ_score_imputed: bool,
    pub candidates: u32,
    pub sepsis: bool,
}

impl From<&SepsisRecord> for SepsisRow {
    fn from(record: &SepsisRecord) -> Self {
        Self {
            encounter_id: record.encounter_id(),
            suspected_infection: record.suspected_infection(),
            onset: record.onset(),
            onset_date_only: record.onset_date_only(),
            administration_id: record.administration_id(),
            specimen_id: record.specimen_id(),
            organ_score: record.organ_score(),
            organ_score_imputed: record.organ_score_imputed(),
            candidates: count(record.candidates()),
            sepsis: record.sepsis(),
        }
    }
}

impl ParquetRecord for IndexScoreRow {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            index_name: String::new(),
            category_count: 0,
            weighted_score: 0,
            age_points: Some(0),
            categories: String::new(),
        }
    }
}

impl ParquetRecord for SirsRow {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            temperature_min: Some(0.0),
            temperature_max: Some(0.0),
            heart_rate_max: Some(0.0),
            resp_rate_max: Some(0.0),
            paco2_min: Some(0.0),
            wbc_min: Some(0.0),
            wbc_max: Some(0.0),
            bands_max: Some(0.0),
            temperature: false,
            heart_rate: false,
            respiratory: false,
            white_cells: false,
            total: 0,
            positive: false,
        }
    }
}

impl ParquetRecord for InfectionRow {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            administration_id: 0,
            administration_time: NaiveDateTime::default(),
            administration_date_only: false,
            eligible: false,
            specimen_id: Some(0),
            specimen_time: Some(NaiveDateTime::default()),
            direction: String::new(),
            offset_hours: Some(0.0),
            day_granularity: false,
            suspected_infection_time: Some(NaiveDateTime::default()),
            culture_positive: Some(false),
        }
    }
}

impl ParquetRecord for SepsisRow {
    fn schema_sample() -> Self {
        Self {
            encounter_id: 0,
            suspected_infection: false,
            onset: Some(NaiveDateTime::default()),
            onset_date_only: false,
            administration_id: Some(0),
            specimen_id: Some(0),
            organ_score: Some(0),
            organ_score_imputed: false,
            candidates: 0,
            sepsis: false,
        }
    }
}

/// All output tables of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTables {
    pub index_scores: Vec<IndexScoreRow>,
    pub sirs: Vec<SirsRow>,
    pub infections: Vec<InfectionRow>,
    pub sepsis: Vec<SepsisRow>,
}

impl OutputTables {
    /// Flatten evaluations into rows, keeping encounter order
    #[must_use]
    pub fn from_evaluations(evaluations: &[EncounterEvaluation], sirs_threshold: u8) -> Self {
        let mut tables = Self::default();
        for evaluation in evaluations {
            let id = evaluation.encounter_id;
            tables
                .index_scores
                .push(IndexScoreRow::charlson(id, &evaluation.charlson));
            tables
                .index_scores
                .push(IndexScoreRow::elixhauser(id, &evaluation.elixhauser));
            tables.sirs.push(SirsRow::new(
                id,
                &evaluation.sirs_inputs,
                &evaluation.sirs,
                sirs_threshold,
            ));
            tables
                .infections
                .extend(evaluation.infections.iter().map(InfectionRow::from_match));
            tables.sepsis.push(SepsisRow::from(&evaluation.sepsis));
        }
        tables
    }
}
