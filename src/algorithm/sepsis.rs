//! Sepsis-3 cohort classification
//!
//! An encounter is classified as septic when an administration/specimen pair
//! raises suspicion of infection and the worst organ dysfunction score in the
//! window around the suspected infection time reaches the threshold. When no
//! score exists in that window the configured baseline is assumed, and the
//! record says so.

use chrono::{Duration, NaiveDateTime};
use itertools::Itertools;

use crate::config::{EngineConfig, hours_delta};
use crate::models::encounter::EncounterId;
use crate::models::events::EventId;
use crate::models::observation::OrganDysfunctionTimeline;

use super::infection::{InfectionMatch, MatchedPair};

/// Provider of windowed worst organ dysfunction scores
pub trait OrganDysfunctionSource {
    /// Worst score with a time inside `[start, end]`, if any
    fn worst_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<i32>;
}

impl OrganDysfunctionSource for OrganDysfunctionTimeline {
    fn worst_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<i32> {
        Self::worst_between(self, start, end)
    }
}

/// Windows and thresholds of the composite rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SepsisCriteria {
    /// Window start before the suspected infection time
    pub window_before: Duration,
    /// Window end after the suspected infection time
    pub window_after: Duration,
    /// Score needed for a positive classification
    pub threshold: i32,
    /// Score assumed when the window holds none
    pub baseline: i32,
}

impl SepsisCriteria {
    /// Read the composite rule settings from the engine configuration
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            window_before: hours_delta(config.organ_window_before_hours),
            window_after: hours_delta(config.organ_window_after_hours),
            threshold: config.organ_dysfunction_threshold,
            baseline: config.organ_baseline_score,
        }
    }
}

impl Default for SepsisCriteria {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Composite result of one encounter; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SepsisRecord {
    encounter_id: EncounterId,
    onset: Option<NaiveDateTime>,
    onset_date_only: bool,
    administration_id: Option<EventId>,
    specimen_id: Option<EventId>,
    organ_score: Option<i32>,
    organ_score_imputed: bool,
    candidates: usize,
    sepsis: bool,
}

impl SepsisRecord {
    fn no_suspicion(encounter_id: EncounterId) -> Self {
        Self {
            encounter_id,
            onset: None,
            onset_date_only: false,
            administration_id: None,
            specimen_id: None,
            organ_score: None,
            organ_score_imputed: false,
            candidates: 0,
            sepsis: false,
        }
    }

    /// Encounter identifier
    #[must_use]
    pub const fn encounter_id(&self) -> EncounterId {
        self.encounter_id
    }

    /// Suspected infection time of the reported candidate
    #[must_use]
    pub const fn onset(&self) -> Option<NaiveDateTime> {
        self.onset
    }

    /// Whether the onset came from a date-only event (reported at midnight)
    #[must_use]
    pub const fn onset_date_only(&self) -> bool {
        self.onset_date_only
    }

    /// Administration of the reported candidate
    #[must_use]
    pub const fn administration_id(&self) -> Option<EventId> {
        self.administration_id
    }

    /// Specimen of the reported candidate
    #[must_use]
    pub const fn specimen_id(&self) -> Option<EventId> {
        self.specimen_id
    }

    /// Windowed worst organ dysfunction score, `None` without suspicion of infection
    #[must_use]
    pub const fn organ_score(&self) -> Option<i32> {
        self.organ_score
    }

    /// Whether the score is the assumed baseline rather than a measured value
    #[must_use]
    pub const fn organ_score_imputed(&self) -> bool {
        self.organ_score_imputed
    }

    /// Number of onset candidates considered
    #[must_use]
    pub const fn candidates(&self) -> usize {
        self.candidates
    }

    /// Whether any matched pair exists
    #[must_use]
    pub const fn suspected_infection(&self) -> bool {
        self.candidates > 0
    }

    /// Sepsis-3 classification
    #[must_use]
    pub const fn sepsis(&self) -> bool {
        self.sepsis
    }
}

/// Classify one encounter from its infection matches and organ scores
///
/// Candidates are tried in [`EventTime`](crate::models::EventTime) order of
/// suspected infection time, so on the same day a time-resolved onset comes
/// before a date-only one. The first one whose windowed score reaches the
/// threshold is the onset; if none does, the earliest candidate is reported
/// as negative.
#[must_use]
pub fn classify_encounter(
    encounter_id: EncounterId,
    matches: &[InfectionMatch],
    source: &impl OrganDysfunctionSource,
    criteria: &SepsisCriteria,
) -> SepsisRecord {
    let candidates = matches
        .iter()
        .filter_map(|m| m.pair.as_ref())
        .sorted_by_key(|pair| {
            (
                pair.suspected_infection_time(),
                pair.administration_time,
                pair.specimen_time,
                pair.administration_id,
            )
        })
        .collect_vec();

    let Some(&earliest) = candidates.first() else {
        return SepsisRecord::no_suspicion(encounter_id);
    };

    let evaluate = |pair: &MatchedPair| {
        let onset = pair.suspected_infection_instant();
        let start = onset
            .checked_sub_signed(criteria.window_before)
            .unwrap_or(NaiveDateTime::MIN);
        let end = onset
            .checked_add_signed(criteria.window_after)
            .unwrap_or(NaiveDateTime::MAX);
        let measured = source.worst_between(start, end);
        let (score, imputed) = measured.map_or((criteria.baseline, true), |score| (score, false));
        SepsisRecord {
            encounter_id,
            onset: Some(onset),
            onset_date_only: !pair.suspected_infection_time().has_time(),
            administration_id: Some(pair.administration_id),
            specimen_id: Some(pair.specimen_id),
            organ_score: Some(score),
            organ_score_imputed: imputed,
            candidates: candidates.len(),
            sepsis: score >= criteria.threshold,
        }
    };

    candidates
        .iter()
        .copied()
        .map(&evaluate)
        .find(SepsisRecord::sepsis)
        .unwrap_or_else(|| evaluate(earliest))
}
